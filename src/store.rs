use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Key-value state shared by every rendering context of one host session.
///
/// Values are stored as JSON so that any context can read what another wrote
/// without sharing Rust types.
pub trait AddonStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
}

/// Read a typed value; entries that fail to deserialize are treated as absent.
pub fn get_typed<T: DeserializeOwned>(store: &dyn AddonStore, key: &str) -> Option<T> {
    let value = store.get(key)?;
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring malformed store entry '{key}': {e}");
            None
        }
    }
}

/// Write a typed value.
pub fn set_typed<T: Serialize>(store: &dyn AddonStore, key: &str, value: &T) {
    match serde_json::to_value(value) {
        Ok(v) => store.set(key, v),
        Err(e) => log::warn!("failed to serialize store entry '{key}': {e}"),
    }
}

/// In-process store. Clones are handles onto the same map, so two contexts
/// holding clones observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    entries: Rc<RefCell<HashMap<String, Value>>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl AddonStore for SharedStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.borrow_mut().insert(key.to_string(), value);
    }
}
