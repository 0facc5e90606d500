/// Identifier of the control; also the key of its entry in the shared addon store.
pub const ADDON_ID: &str = "storybook/colormode";

/// Key under which the host supplies the control's parameters.
pub const PARAM_KEY: &str = "colorMode";

/// Tooltip shown on the toolbar button.
pub const TOOL_TIP_TITLE: &str = "Change the current color mode";

/// Id of the implicit mode that always sits at position 0.
pub const DEFAULT_MODE_ID: &str = "default";

/// Display name of the implicit default mode.
pub const DEFAULT_MODE_NAME: &str = "Default";

/// Topic carrying the id of the newly selected mode.
pub const CHANGE_MODE: &str = "storybook/colormode/change";

/// Topic carrying a signed step request (`-1` previous, `+1` next).
pub const STEP_MODE: &str = "storybook/colormode/step";

/// Topic carrying key presses forwarded from preview contexts.
pub const PREVIEW_KEYDOWN: &str = "preview-keydown";

/// Class flagging a root element that already received its initial mode.
pub const DIRTY_CLASS: &str = "dirty-color-mode-addon";

/// Prefix of the presentation marker class, followed by the mode id.
pub const MARKER_PREFIX: &str = "theme-ui-";
