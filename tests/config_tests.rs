use std::fs;

use pretty_assertions::assert_eq;

use colormode::config::{load_params_file, parse_parameters, ColorModeParams, ParamFormat};
use colormode::keys::keycode;
use colormode::modes::RegistryError;

#[test]
fn test_load_toml_preserves_mode_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.toml");
    fs::write(
        &path,
        r#"
[colorMode]
defaultMode = "dark"

[colorMode.modes.zebra]
name = "Zebra"

[colorMode.modes.dark]
name = "Darkness"

[colorMode.modes.apple]
name = "Apple"
"#,
    )
    .unwrap();

    let params = load_params_file(&path).unwrap();
    assert_eq!(params.default_mode, "dark");

    let list = params.mode_list().unwrap();
    let ids: Vec<&str> = list.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["default", "zebra", "dark", "apple"]);
}

#[test]
fn test_load_json_with_bindings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.json");
    fs::write(
        &path,
        r#"{
  "colorMode": {
    "modes": { "dark": { "name": "Darkness" } },
    "bindings": {
      "prefix": { "ctrlKey": false, "altKey": true, "shiftKey": false },
      "previousTrigger": 38,
      "nextTrigger": 40
    }
  }
}"#,
    )
    .unwrap();

    let params = load_params_file(&path).unwrap();
    assert_eq!(params.default_mode, "default");
    assert!(!params.bindings.prefix.ctrl_key);
    assert!(params.bindings.prefix.alt_key);
    assert_eq!(params.bindings.previous_trigger, keycode::UP);
    assert_eq!(params.bindings.next_trigger, keycode::DOWN);
}

#[test]
fn test_file_without_control_section_uses_defaults() {
    let source = parse_parameters("[otherAddon]\nenabled = true\n", ParamFormat::Toml).unwrap();
    let params = ColorModeParams::from_source(&source).unwrap();
    assert_eq!(params, ColorModeParams::default());
}

#[test]
fn test_reserved_default_mode_key_rejected() {
    let source = parse_parameters(
        r#"{"colorMode": {"modes": {"default": {"name": "Mine"}}}}"#,
        ParamFormat::Json,
    )
    .unwrap();
    let params = ColorModeParams::from_source(&source).unwrap();
    assert_eq!(
        params.mode_list().unwrap_err(),
        RegistryError::ReservedId("default".into())
    );
}

#[test]
fn test_quoted_toml_key_with_space_rejected() {
    let source = parse_parameters(
        r#"
[colorMode.modes."my mode"]
name = "Mine"
"#,
        ParamFormat::Toml,
    )
    .unwrap();
    let params = ColorModeParams::from_source(&source).unwrap();
    assert_eq!(
        params.mode_list().unwrap_err(),
        RegistryError::InvalidId("my mode".into())
    );
}

#[test]
fn test_initial_mode_falls_back_for_unknown_default() {
    let mut params = ColorModeParams::default();
    params.default_mode = "sepia".into();
    assert_eq!(params.initial_mode(), "default");
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_params_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("failed to read parameters"));
}

#[test]
fn test_invalid_toml_is_error() {
    assert!(parse_parameters("[colorMode\nmodes = ", ParamFormat::Toml).is_err());
}
