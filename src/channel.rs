//! Publish/subscribe transport between rendering contexts.
//!
//! The object-safe [`Channel`] trait moves JSON payloads between listeners of a
//! named topic. [`Topic`] pins a payload type to each topic name, and the typed
//! helpers in [`ChannelExt`] do the conversion at the edges. Listeners are
//! released through a [`Subscription`] guard, so every subscribe is paired with
//! exactly one unsubscribe no matter how the owner goes away.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::constants::{CHANGE_MODE, PREVIEW_KEYDOWN, STEP_MODE};
use crate::keys::KeyPress;

/// Handle returned by [`Channel::add_listener`], used to remove that listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Rc<dyn Fn(&Value)>;

pub trait Channel {
    /// Deliver `payload` to every listener of `topic`, in registration order.
    fn emit(&self, topic: &str, payload: Value);
    fn add_listener(&self, topic: &str, listener: Listener) -> ListenerId;
    /// Returns false when no such listener was registered.
    fn remove_listener(&self, topic: &str, id: ListenerId) -> bool;
}

pub type ChannelHandle = Rc<dyn Channel>;

/// A topic name bound to its payload type.
pub struct Topic<T> {
    pub name: &'static str,
    _payload: PhantomData<fn(T) -> T>,
}

impl<T> Topic<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _payload: PhantomData,
        }
    }
}

impl<T> Clone for Topic<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Topic<T> {}

impl<T> fmt::Debug for Topic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Topic").field(&self.name).finish()
    }
}

/// Authoritative broadcast of the selected mode id.
pub const MODE_CHANGED: Topic<String> = Topic::new(CHANGE_MODE);

/// Step requests. Consumed only by the tool; never applied to the marker.
pub const MODE_STEP: Topic<i32> = Topic::new(STEP_MODE);

/// Key presses forwarded from preview contexts.
pub const KEYDOWN: Topic<KeyPress> = Topic::new(PREVIEW_KEYDOWN);

/// Typed helpers over any [`Channel`].
pub trait ChannelExt: Channel {
    fn publish<T: Serialize>(&self, topic: Topic<T>, payload: &T) {
        match serde_json::to_value(payload) {
            Ok(value) => self.emit(topic.name, value),
            Err(e) => log::warn!("dropping unserializable payload for '{}': {e}", topic.name),
        }
    }

    /// Register `handler` for `topic`. Payloads that do not decode as `T`
    /// are logged and skipped.
    fn listen<T, F>(&self, topic: Topic<T>, handler: F) -> ListenerId
    where
        T: DeserializeOwned + 'static,
        F: Fn(T) + 'static,
    {
        let name = topic.name;
        self.add_listener(
            name,
            Rc::new(move |value: &Value| match serde_json::from_value::<T>(value.clone()) {
                Ok(payload) => handler(payload),
                Err(e) => log::warn!("malformed payload on '{name}': {e}"),
            }),
        )
    }
}

impl<C: Channel + ?Sized> ChannelExt for C {}

/// Register `handler` and return a guard that removes it on drop.
pub fn subscribe<T, F>(channel: &ChannelHandle, topic: Topic<T>, handler: F) -> Subscription
where
    T: DeserializeOwned + 'static,
    F: Fn(T) + 'static,
{
    let id = channel.listen(topic, handler);
    Subscription {
        channel: Rc::clone(channel),
        topic: topic.name,
        id: Some(id),
    }
}

/// Live listener registration. Dropping it (or calling [`Subscription::cancel`])
/// removes the listener exactly once.
pub struct Subscription {
    channel: ChannelHandle,
    topic: &'static str,
    id: Option<ListenerId>,
}

impl Subscription {
    pub fn topic(&self) -> &'static str {
        self.topic
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            self.channel.remove_listener(self.topic, id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .finish()
    }
}

/// Single-process bus: synchronous, in-order delivery to each listener.
#[derive(Default)]
pub struct MemoryChannel {
    listeners: RefCell<HashMap<String, Vec<(ListenerId, Listener)>>>,
    next_id: Cell<u64>,
    history: RefCell<Vec<(String, Value)>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the shared handle form.
    pub fn handle() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn listener_count(&self, topic: &str) -> usize {
        self.listeners.borrow().get(topic).map_or(0, Vec::len)
    }

    /// Every payload emitted on `topic` so far, oldest first.
    pub fn emitted(&self, topic: &str) -> Vec<Value> {
        self.history
            .borrow()
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl Channel for MemoryChannel {
    fn emit(&self, topic: &str, payload: Value) {
        log::debug!("emit {topic} {payload}");
        self.history
            .borrow_mut()
            .push((topic.to_string(), payload.clone()));

        // Snapshot so listeners may publish, subscribe or unsubscribe re-entrantly.
        let targets: Vec<Listener> = self
            .listeners
            .borrow()
            .get(topic)
            .map(|ls| ls.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default();

        for listener in targets {
            listener(&payload);
        }
    }

    fn add_listener(&self, topic: &str, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .entry(topic.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    fn remove_listener(&self, topic: &str, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(list) = listeners.get_mut(topic) else {
            return false;
        };
        let before = list.len();
        list.retain(|(lid, _)| *lid != id);
        let removed = list.len() != before;
        if list.is_empty() {
            listeners.remove(topic);
        }
        removed
    }
}
