use pretty_assertions::assert_eq;

use colormode::keys::{decode, keycode, KeyAction, KeyBindings, KeyPress, Prefix};

fn press(ctrl: bool, alt: bool, shift: bool, key_code: u32) -> KeyPress {
    KeyPress {
        ctrl_key: ctrl,
        alt_key: alt,
        shift_key: shift,
        key_code,
    }
}

#[test]
fn test_scenario_d_default_bindings() {
    let bindings = KeyBindings::default();
    assert_eq!(
        decode(&press(true, true, false, keycode::RIGHT), &bindings),
        KeyAction::Next
    );
    assert_eq!(
        decode(&press(false, true, false, keycode::RIGHT), &bindings),
        KeyAction::None
    );
}

#[test]
fn test_previous_trigger() {
    let bindings = KeyBindings::default();
    assert_eq!(
        decode(&press(true, true, false, keycode::LEFT), &bindings),
        KeyAction::Previous
    );
}

#[test]
fn test_extra_modifier_disqualifies() {
    let bindings = KeyBindings::default();
    assert_eq!(
        decode(&press(true, true, true, keycode::RIGHT), &bindings),
        KeyAction::None
    );
    assert_eq!(
        decode(&press(false, false, false, keycode::RIGHT), &bindings),
        KeyAction::None
    );
}

#[test]
fn test_digits_select_by_index() {
    let bindings = KeyBindings::default();
    for digit in 0..=9u32 {
        assert_eq!(
            decode(&press(true, true, false, keycode::ZERO + digit), &bindings),
            KeyAction::SetIndex(digit as usize)
        );
    }
    assert_eq!(
        decode(&press(true, true, false, keycode::NINE + 1), &bindings),
        KeyAction::None
    );
    assert_eq!(
        decode(&press(false, false, false, keycode::ZERO + 1), &bindings),
        KeyAction::None
    );
}

#[test]
fn test_custom_bindings_keep_digits() {
    let bindings = KeyBindings {
        prefix: Prefix {
            ctrl_key: false,
            alt_key: false,
            shift_key: true,
        },
        previous_trigger: keycode::UP,
        next_trigger: keycode::DOWN,
    };

    assert_eq!(decode(&press(false, false, true, keycode::UP), &bindings), KeyAction::Previous);
    assert_eq!(decode(&press(false, false, true, keycode::DOWN), &bindings), KeyAction::Next);
    assert_eq!(decode(&press(false, false, true, keycode::RIGHT), &bindings), KeyAction::None);
    assert_eq!(
        decode(&press(false, false, true, keycode::ZERO + 2), &bindings),
        KeyAction::SetIndex(2)
    );
    assert_eq!(decode(&press(true, true, false, keycode::DOWN), &bindings), KeyAction::None);
}

#[test]
fn test_key_press_wire_shape() {
    let json = serde_json::to_value(press(true, true, false, keycode::LEFT)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"ctrlKey": true, "altKey": true, "shiftKey": false, "keyCode": 37})
    );
}

#[test]
fn test_bindings_deserialize_partial() {
    let bindings: KeyBindings = serde_json::from_str(r#"{"nextTrigger": 40}"#).unwrap();
    assert_eq!(bindings.next_trigger, keycode::DOWN);
    assert_eq!(bindings.previous_trigger, keycode::LEFT);
    assert_eq!(bindings.prefix, Prefix::CTRL_ALT);
}
