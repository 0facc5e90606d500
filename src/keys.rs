use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// DOM-style key codes understood by the decoder.
pub mod keycode {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const PAGE_UP: u32 = 33;
    pub const PAGE_DOWN: u32 = 34;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const DELETE: u32 = 46;
    pub const ZERO: u32 = 48;
    pub const NINE: u32 = 57;
    pub const A: u32 = 65;
    pub const Z: u32 = 90;
}

/// One key press, in the shape hosts forward across contexts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPress {
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub shift_key: bool,
    pub key_code: u32,
}

impl KeyPress {
    pub fn new(key_code: u32, prefix: Prefix) -> Self {
        Self {
            ctrl_key: prefix.ctrl_key,
            alt_key: prefix.alt_key,
            shift_key: prefix.shift_key,
            key_code,
        }
    }

    fn modifiers(&self) -> Prefix {
        Prefix {
            ctrl_key: self.ctrl_key,
            alt_key: self.alt_key,
            shift_key: self.shift_key,
        }
    }

    /// Translate a crossterm key event. Releases and keys without a DOM
    /// equivalent yield `None`.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let key_code = match event.code {
            KeyCode::Backspace => keycode::BACKSPACE,
            KeyCode::Tab | KeyCode::BackTab => keycode::TAB,
            KeyCode::Enter => keycode::ENTER,
            KeyCode::Esc => keycode::ESCAPE,
            KeyCode::PageUp => keycode::PAGE_UP,
            KeyCode::PageDown => keycode::PAGE_DOWN,
            KeyCode::End => keycode::END,
            KeyCode::Home => keycode::HOME,
            KeyCode::Left => keycode::LEFT,
            KeyCode::Up => keycode::UP,
            KeyCode::Right => keycode::RIGHT,
            KeyCode::Down => keycode::DOWN,
            KeyCode::Delete => keycode::DELETE,
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase() as u32,
            _ => return None,
        };

        Some(Self {
            ctrl_key: event.modifiers.contains(KeyModifiers::CONTROL),
            alt_key: event.modifiers.contains(KeyModifiers::ALT),
            shift_key: event.modifiers.contains(KeyModifiers::SHIFT)
                || event.code == KeyCode::BackTab,
            key_code,
        })
    }
}

/// Exact modifier combination a shortcut requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prefix {
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub shift_key: bool,
}

impl Prefix {
    pub const CTRL_ALT: Prefix = Prefix {
        ctrl_key: true,
        alt_key: true,
        shift_key: false,
    };

    /// Human-readable form, e.g. `Ctrl+Alt`.
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl_key {
            parts.push("Ctrl");
        }
        if self.alt_key {
            parts.push("Alt");
        }
        if self.shift_key {
            parts.push("Shift");
        }
        parts.join("+")
    }
}

/// Which prefix + keys step through modes. Digits 0-9 under the same prefix
/// always select by index and are not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyBindings {
    pub prefix: Prefix,
    pub previous_trigger: u32,
    pub next_trigger: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            prefix: Prefix::CTRL_ALT,
            previous_trigger: keycode::LEFT,
            next_trigger: keycode::RIGHT,
        }
    }
}

/// Outcome of decoding one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Previous,
    Next,
    SetIndex(usize),
    None,
}

/// Classify a key press against the bindings. The press's modifiers must equal
/// the prefix exactly; extra modifiers disqualify it.
pub fn decode(press: &KeyPress, bindings: &KeyBindings) -> KeyAction {
    if press.modifiers() != bindings.prefix {
        return KeyAction::None;
    }

    // Configured triggers win over digits if a user binds one to a digit key.
    if press.key_code == bindings.previous_trigger {
        KeyAction::Previous
    } else if press.key_code == bindings.next_trigger {
        KeyAction::Next
    } else if (keycode::ZERO..=keycode::NINE).contains(&press.key_code) {
        KeyAction::SetIndex((press.key_code - keycode::ZERO) as usize)
    } else {
        KeyAction::None
    }
}

/// Short display name for a key code, used in help text.
pub fn key_name(code: u32) -> String {
    match code {
        keycode::LEFT => "←".into(),
        keycode::RIGHT => "→".into(),
        keycode::UP => "↑".into(),
        keycode::DOWN => "↓".into(),
        keycode::ENTER => "Enter".into(),
        keycode::ESCAPE => "Esc".into(),
        keycode::TAB => "Tab".into(),
        keycode::HOME => "Home".into(),
        keycode::END => "End".into(),
        keycode::PAGE_UP => "PgUp".into(),
        keycode::PAGE_DOWN => "PgDn".into(),
        keycode::ZERO..=keycode::NINE | keycode::A..=keycode::Z => {
            char::from_u32(code).map_or_else(|| format!("#{code}"), |c| c.to_string())
        }
        other => format!("#{other}"),
    }
}
