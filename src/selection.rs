use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::channel::{ChannelExt, ChannelHandle, MODE_CHANGED};
use crate::constants::ADDON_ID;
use crate::keys::KeyAction;
use crate::modes::{Mode, ModeList};
use crate::store::{self, AddonStore};

/// Persisted shape of the selection in the shared store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorModeState {
    /// The currently selected mode's index
    pub current_index: usize,
}

/// How the initial mode is given: by position or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultMode {
    Index(i64),
    Id(String),
}

impl From<&str> for DefaultMode {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<i64> for DefaultMode {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The configured default does not address the list. Fatal for the control.
    #[error("Default Index out of Bounds: ({0})")]
    DefaultOutOfBounds(i64),
    /// A direct selection outside the list. The selection is left untouched.
    #[error("Index out of bounds: ({0})")]
    OutOfBounds(i64),
}

impl SelectionError {
    pub fn index(&self) -> i64 {
        match self {
            Self::DefaultOutOfBounds(i) | Self::OutOfBounds(i) => *i,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DefaultOutOfBounds(_))
    }
}

/// The current-mode state machine.
///
/// The index itself lives in the shared [`AddonStore`] under [`ADDON_ID`], so
/// every `Selection` built over the same store sees the same current mode and
/// the last write wins. Each successful change publishes the resolved mode id
/// on [`MODE_CHANGED`]. Clones are further handles onto the same selection.
#[derive(Clone)]
pub struct Selection {
    list: ModeList,
    store: Rc<dyn AddonStore>,
    channel: ChannelHandle,
    default_index: usize,
}

impl Selection {
    /// Resolve the default and enter the ready state, publishing the current
    /// mode once.
    ///
    /// An index already present in the store (written by another context) is
    /// kept; the default only seeds an empty store. An id missing from the list
    /// resolves to `-1` and fails like any other out-of-range default.
    pub fn initialize(
        list: ModeList,
        default: impl Into<DefaultMode>,
        store: Rc<dyn AddonStore>,
        channel: ChannelHandle,
    ) -> Result<Self, SelectionError> {
        let requested = match default.into() {
            DefaultMode::Index(i) => i,
            DefaultMode::Id(id) => list.position(&id).map_or(-1, |p| p as i64),
        };
        if !list.contains_index(requested) {
            return Err(SelectionError::DefaultOutOfBounds(requested));
        }
        let default_index = requested as usize;

        let selection = Self {
            list,
            store,
            channel,
            default_index,
        };

        match selection.stored_index() {
            Some(i) if i < selection.list.len() => {
                log::debug!("resuming stored selection {i}");
            }
            Some(i) => {
                log::warn!("stored index {i} does not fit {} modes, using default", selection.list.len());
                selection.write(default_index);
            }
            None => selection.write(default_index),
        }

        selection.publish();
        Ok(selection)
    }

    pub fn list(&self) -> &ModeList {
        &self.list
    }

    pub fn default_index(&self) -> usize {
        self.default_index
    }

    pub fn current_index(&self) -> usize {
        match self.stored_index() {
            Some(i) if i < self.list.len() => i,
            _ => self.default_index,
        }
    }

    pub fn current_mode(&self) -> &Mode {
        // current_index is always within the list
        &self.list.as_slice()[self.current_index()]
    }

    /// Select `new_index` directly. Out-of-range values are rejected and the
    /// current selection stays as it was.
    pub fn set_index(&self, new_index: i64) -> Result<(), SelectionError> {
        if !self.list.contains_index(new_index) {
            log::warn!("rejecting selection of index {new_index}");
            return Err(SelectionError::OutOfBounds(new_index));
        }
        self.write(new_index as usize);
        self.publish();
        Ok(())
    }

    /// Select the mode with the given id.
    pub fn set_id(&self, id: &str) -> Result<(), SelectionError> {
        let index = self.list.position(id).map_or(-1, |p| p as i64);
        self.set_index(index)
    }

    /// Advance one mode, wrapping from last to first.
    pub fn next_index(&self) {
        self.step(1);
    }

    /// Go back one mode, wrapping from first to last.
    pub fn prev_index(&self) {
        self.step(-1);
    }

    /// Move by `delta` positions with wraparound in both directions.
    pub fn step(&self, delta: i64) {
        let len = self.list.len() as i64;
        // reduce first so the sum cannot overflow
        let next = (self.current_index() as i64 + delta.rem_euclid(len)).rem_euclid(len);
        self.write(next as usize);
        self.publish();
    }

    /// Apply a decoded key action.
    pub fn apply(&self, action: KeyAction) -> Result<(), SelectionError> {
        match action {
            KeyAction::Previous => self.prev_index(),
            KeyAction::Next => self.next_index(),
            KeyAction::SetIndex(i) => self.set_index(i as i64)?,
            KeyAction::None => {}
        }
        Ok(())
    }

    /// Broadcast the current mode id. Safe to repeat; subscribers are idempotent.
    pub fn publish(&self) {
        let id = &self.current_mode().id;
        log::debug!("publishing mode '{id}'");
        self.channel.publish(MODE_CHANGED, id);
    }

    fn stored_index(&self) -> Option<usize> {
        store::get_typed::<ColorModeState>(self.store.as_ref(), ADDON_ID).map(|s| s.current_index)
    }

    fn write(&self, current_index: usize) {
        store::set_typed(self.store.as_ref(), ADDON_ID, &ColorModeState { current_index });
    }
}
