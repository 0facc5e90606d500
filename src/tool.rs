use std::rc::Rc;

use thiserror::Error;

use crate::channel::{subscribe, ChannelHandle, Subscription, KEYDOWN, MODE_STEP};
use crate::config::ColorModeParams;
use crate::keys::{decode, KeyAction, KeyBindings, KeyPress};
use crate::menu::{self, ClickOutcome, MenuState, ModeLink};
use crate::modes::{Mode, ModeList, RegistryError};
use crate::selection::{Selection, SelectionError};
use crate::store::AddonStore;

/// Reasons a control cannot be mounted at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// The toolbar control of the manager context.
///
/// Besides local input it serves two inbound topics: step requests and key
/// presses forwarded from previews. Both go through the same selection, so
/// the only thing ever broadcast is the resulting mode id.
pub struct ColorModeTool {
    selection: Selection,
    bindings: KeyBindings,
    menu: MenuState,
    last_error: Option<SelectionError>,
    _subscriptions: Vec<Subscription>,
}

impl ColorModeTool {
    pub fn mount(
        params: &ColorModeParams,
        store: Rc<dyn AddonStore>,
        channel: &ChannelHandle,
    ) -> Result<Self, MountError> {
        let list = params.mode_list()?;
        let selection = Selection::initialize(
            list,
            params.default_mode.as_str(),
            store,
            Rc::clone(channel),
        )?;
        let bindings = params.bindings;

        let stepper = selection.clone();
        let on_step = subscribe(channel, MODE_STEP, move |step: i32| {
            stepper.step(i64::from(step));
        });

        let forwarded = selection.clone();
        let on_key = subscribe(channel, KEYDOWN, move |press: KeyPress| {
            if let Err(e) = forwarded.apply(decode(&press, &bindings)) {
                log::warn!("forwarded key ignored: {e}");
            }
        });

        Ok(Self {
            selection,
            bindings,
            menu: MenuState::default(),
            last_error: None,
            _subscriptions: vec![on_step, on_key],
        })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn list(&self) -> &ModeList {
        self.selection.list()
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn current_index(&self) -> usize {
        self.selection.current_index()
    }

    pub fn current_mode(&self) -> &Mode {
        self.selection.current_mode()
    }

    /// The control is highlighted whenever a non-default mode is selected.
    pub fn is_active(&self) -> bool {
        self.current_index() != 0
    }

    /// Name shown next to the icon; only while active.
    pub fn label(&self) -> Option<&str> {
        self.is_active().then(|| self.current_mode().name.as_str())
    }

    /// Most recent recoverable failure, cleared by the next successful input.
    pub fn last_error(&self) -> Option<&SelectionError> {
        self.last_error.as_ref()
    }

    /// Decode a local key press and apply it. Out-of-range digit selections
    /// are recorded, not raised.
    pub fn handle_key(&mut self, press: &KeyPress) -> KeyAction {
        let action = decode(press, &self.bindings);
        if action != KeyAction::None {
            self.record(self.selection.apply(action));
        }
        action
    }

    pub fn set_index(&mut self, index: i64) -> Result<(), SelectionError> {
        let result = self.selection.set_index(index);
        self.record(result);
        result
    }

    pub fn next_index(&mut self) {
        self.selection.next_index();
        self.last_error = None;
    }

    pub fn prev_index(&mut self) {
        self.selection.prev_index();
        self.last_error = None;
    }

    pub fn links(&self) -> Vec<ModeLink> {
        menu::to_links(self.list(), self.current_index())
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn open_menu(&mut self) {
        let current = self.current_index();
        self.menu.open_at(current);
    }

    pub fn close_menu(&mut self) {
        self.menu.close();
    }

    pub fn menu_up(&mut self) {
        let len = self.list().len();
        self.menu.move_up(len);
    }

    pub fn menu_down(&mut self) {
        let len = self.list().len();
        self.menu.move_down(len);
    }

    /// Click the link at `index` of the picker.
    pub fn click(&mut self, index: usize) -> Result<ClickOutcome, SelectionError> {
        let link = self
            .links()
            .into_iter()
            .nth(index)
            .ok_or(SelectionError::OutOfBounds(index as i64));
        let result = link.and_then(|l| menu::click(&l, &self.selection));
        self.record(result.map(|_| ()));
        if let Ok(outcome) = result {
            if outcome.close {
                self.menu.close();
            }
        }
        result
    }

    /// Click whichever link the picker cursor is on.
    pub fn click_highlighted(&mut self) -> Result<ClickOutcome, SelectionError> {
        self.click(self.menu.highlighted)
    }

    fn record(&mut self, result: Result<(), SelectionError>) {
        self.last_error = result.err();
    }
}

/// Lifecycle of a mounted control: a failed mount is kept as a static error
/// in place of the control instead of propagating further.
pub enum Control {
    Uninitialized,
    Ready(ColorModeTool),
    Failed(MountError),
}

impl Control {
    pub fn mount(params: &ColorModeParams, store: Rc<dyn AddonStore>, channel: &ChannelHandle) -> Self {
        match ColorModeTool::mount(params, store, channel) {
            Ok(tool) => Self::Ready(tool),
            Err(e) => {
                log::warn!("color mode control failed to mount: {e}");
                Self::Failed(e)
            }
        }
    }

    pub fn tool(&self) -> Option<&ColorModeTool> {
        match self {
            Self::Ready(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn tool_mut(&mut self) -> Option<&mut ColorModeTool> {
        match self {
            Self::Ready(tool) => Some(tool),
            _ => None,
        }
    }

    /// Message rendered in place of a control that failed to mount.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Failed(e) => Some(e.to_string()),
            _ => None,
        }
    }
}
