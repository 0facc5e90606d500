use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{DEFAULT_MODE_ID, PARAM_KEY};
use crate::keys::KeyBindings;
use crate::modes::{ModeList, ModeMap, RegistryError};

/// Parameters the host supplies for the control under [`PARAM_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorModeParams {
    /// User-supplied modes, in display order
    pub modes: ModeMap,
    /// Id of the mode selected on first mount
    pub default_mode: String,
    /// Keyboard shortcuts for stepping through modes
    pub bindings: KeyBindings,
}

impl Default for ColorModeParams {
    fn default() -> Self {
        Self {
            modes: ModeMap::new(),
            default_mode: DEFAULT_MODE_ID.into(),
            bindings: KeyBindings::default(),
        }
    }
}

impl ColorModeParams {
    /// Read the control's parameters; an absent entry yields defaults.
    pub fn from_source(source: &dyn ParameterSource) -> Result<Self> {
        match source.parameter(PARAM_KEY) {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value)
                .with_context(|| format!("invalid '{PARAM_KEY}' parameters")),
        }
    }

    pub fn mode_list(&self) -> Result<ModeList, RegistryError> {
        ModeList::from_map(&self.modes)
    }

    /// The configured default when it names a listed mode, else the built-in one.
    pub fn initial_mode(&self) -> &str {
        match self.mode_list() {
            Ok(list) if list.position(&self.default_mode).is_some() => &self.default_mode,
            _ => DEFAULT_MODE_ID,
        }
    }
}

/// Read-only parameters provided by the host for one rendering context.
pub trait ParameterSource {
    fn parameter(&self, key: &str) -> Option<Value>;
}

/// Parameters held in memory, typically parsed from a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticParameters {
    entries: Map<String, Value>,
}

impl StaticParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a parsed document; anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => bail!("parameters must be a table, found {}", type_name(&other)),
        }
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.entries.insert(key.to_string(), value);
        self
    }
}

impl ParameterSource for StaticParameters {
    fn parameter(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

/// Supported parameter file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFormat {
    Json,
    Toml,
}

impl ParamFormat {
    /// Pick a format from the file extension, falling back to the content.
    pub fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::detect_content(content),
        }
    }

    pub fn detect_content(content: &str) -> Self {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') {
            Self::Json
        } else {
            Self::Toml
        }
    }
}

/// Parse a parameter document into a source.
pub fn parse_parameters(content: &str, format: ParamFormat) -> Result<StaticParameters> {
    let value: Value = match format {
        ParamFormat::Json => serde_json::from_str(content).context("failed to parse JSON parameters")?,
        ParamFormat::Toml => toml::from_str(content).context("failed to parse TOML parameters")?,
    };
    StaticParameters::from_value(value)
}

/// Load the control's parameters from a file.
pub fn load_params_file(path: &Path) -> Result<ColorModeParams> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read parameters from {}", path.display()))?;
    let source = parse_parameters(&content, ParamFormat::detect(path, &content))?;
    ColorModeParams::from_source(&source)
}

/// Get the configuration directory path.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "colormode").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default parameter file, `<config dir>/params.toml`.
pub fn default_params_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("params.toml"))
}

/// Load parameters from the default location, or return defaults when no
/// file exists there.
pub fn load_params() -> Result<ColorModeParams> {
    match default_params_path() {
        Some(path) if path.exists() => load_params_file(&path),
        _ => Ok(ColorModeParams::default()),
    }
}
