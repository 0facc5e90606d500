use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_MODE_ID, DEFAULT_MODE_NAME};

/// A selectable color mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    /// Stable key used on the channel and in the marker class
    pub id: String,
    /// Human-readable label
    pub name: String,
}

impl Mode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The implicit mode that always sits at position 0.
    pub fn default_mode() -> Self {
        Self::new(DEFAULT_MODE_ID, DEFAULT_MODE_NAME)
    }
}

/// Value side of a user-supplied mode mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeEntry {
    /// Display name for the mode
    pub name: String,
}

/// User-supplied mapping of mode id to mode entry, in declaration order.
pub type ModeMap = IndexMap<String, ModeEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("mode id '{0}' is reserved for the built-in default mode")]
    ReservedId(String),
    /// Ids end up as a single class name, so they may not be blank or contain whitespace
    #[error("mode id '{0}' is empty or contains whitespace")]
    InvalidId(String),
}

/// Ordered, default-prefixed list of every selectable mode.
///
/// Built once per configuration and never mutated afterwards; a list always
/// holds at least the default mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeList {
    modes: Vec<Mode>,
}

impl ModeList {
    /// Build the list from a mapping: the default mode first, then each entry
    /// in the mapping's iteration order.
    ///
    /// A mapping that declares its own `"default"` key is rejected rather than
    /// allowed to shadow the built-in entry.
    pub fn from_map(map: &ModeMap) -> Result<Self, RegistryError> {
        let mut modes = Vec::with_capacity(map.len() + 1);
        modes.push(Mode::default_mode());

        for (id, entry) in map {
            if id == DEFAULT_MODE_ID {
                return Err(RegistryError::ReservedId(id.clone()));
            }
            if id.is_empty() || id.contains(char::is_whitespace) {
                return Err(RegistryError::InvalidId(id.clone()));
            }
            modes.push(Mode::new(id.as_str(), entry.name.as_str()));
        }

        Ok(Self { modes })
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Mode> {
        self.modes.get(index)
    }

    /// Position of the mode with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.modes.iter().position(|m| m.id == id)
    }

    /// Whether `index` addresses an entry of this list. Signed so that
    /// negative indices coming from callers are representable.
    pub fn contains_index(&self, index: i64) -> bool {
        usize::try_from(index).is_ok_and(|i| i < self.modes.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mode> {
        self.modes.iter()
    }

    pub fn as_slice(&self) -> &[Mode] {
        &self.modes
    }
}

impl Default for ModeList {
    fn default() -> Self {
        Self {
            modes: vec![Mode::default_mode()],
        }
    }
}

impl<'a> IntoIterator for &'a ModeList {
    type Item = &'a Mode;
    type IntoIter = std::slice::Iter<'a, Mode>;

    fn into_iter(self) -> Self::IntoIter {
        self.modes.iter()
    }
}
