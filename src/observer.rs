use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::channel::{subscribe, ChannelHandle, Subscription, MODE_CHANGED};
use crate::constants::{DIRTY_CLASS, MARKER_PREFIX};

/// Ordered set of CSS classes on an element, with a counter of effective
/// mutations so callers can tell a real change from a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
    mutations: usize,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated class attribute, dropping duplicates.
    pub fn parse(class_name: &str) -> Self {
        let mut list = Self::new();
        for class in class_name.split_whitespace() {
            if !list.contains(class) {
                list.classes.push(class.to_string());
            }
        }
        list
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns false if the class was already present.
    pub fn add(&mut self, class: &str) -> bool {
        if self.contains(class) {
            return false;
        }
        self.classes.push(class.to_string());
        self.mutations += 1;
        true
    }

    /// Returns false if the class was not present.
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        let removed = self.classes.len() != before;
        if removed {
            self.mutations += 1;
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of effective add/remove operations so far.
    pub fn mutations(&self) -> usize {
        self.mutations
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.classes.join(" "))
    }
}

/// Root element shared by every context rendering into the same document.
pub type SharedRoot = Rc<RefCell<ClassList>>;

pub fn shared_root(class_name: &str) -> SharedRoot {
    Rc::new(RefCell::new(ClassList::parse(class_name)))
}

/// Marker class for a mode id, e.g. `theme-ui-dark`.
pub fn marker_class(mode_id: &str) -> String {
    format!("{MARKER_PREFIX}{mode_id}")
}

/// Mode id encoded by the element's marker class, if any.
pub fn marker_id(classes: &ClassList) -> Option<&str> {
    classes.iter().find_map(|c| c.strip_prefix(MARKER_PREFIX))
}

/// Put `mode_id`'s marker on the element, replacing any previous marker.
/// Returns false when that marker was already the only one applied.
pub fn set_marker(classes: &mut ClassList, mode_id: &str) -> bool {
    let wanted = marker_class(mode_id);
    let stale: Vec<String> = classes
        .iter()
        .filter(|c| c.starts_with(MARKER_PREFIX) && *c != wanted)
        .map(str::to_string)
        .collect();
    if stale.is_empty() && classes.contains(&wanted) {
        return false;
    }

    for class in stale {
        classes.remove(&class);
    }
    classes.add(&wanted);
    true
}

pub fn is_dirty(classes: &ClassList) -> bool {
    classes.contains(DIRTY_CLASS)
}

pub fn make_dirty(classes: &mut ClassList) {
    classes.add(DIRTY_CLASS);
}

/// Keeps a root element's marker in step with the mode-change broadcast.
///
/// Listens while alive; dropping the observer (or calling [`detach`]) removes
/// its listener.
///
/// [`detach`]: ModeObserver::detach
pub struct ModeObserver {
    root: SharedRoot,
    applied: Rc<Cell<usize>>,
    subscription: Subscription,
}

impl ModeObserver {
    /// Subscribe to mode changes for `root`.
    ///
    /// A root that no earlier observer touched gets `initial_mode` applied and
    /// is then flagged dirty, so later mounts leave the current marker alone.
    pub fn attach(channel: &ChannelHandle, root: SharedRoot, initial_mode: &str) -> Self {
        {
            let mut classes = root.borrow_mut();
            if !is_dirty(&classes) {
                set_marker(&mut classes, initial_mode);
                make_dirty(&mut classes);
            }
        }

        let applied = Rc::new(Cell::new(0));
        let target = Rc::clone(&root);
        let counter = Rc::clone(&applied);
        let subscription = subscribe(channel, MODE_CHANGED, move |mode_id: String| {
            if set_marker(&mut target.borrow_mut(), &mode_id) {
                log::debug!("root marker now {}", marker_class(&mode_id));
                counter.set(counter.get() + 1);
            }
        });

        Self {
            root,
            applied,
            subscription,
        }
    }

    pub fn root(&self) -> &SharedRoot {
        &self.root
    }

    /// Mode id currently marked on the root.
    pub fn current_mode(&self) -> Option<String> {
        marker_id(&self.root.borrow()).map(str::to_string)
    }

    /// Number of notifications that actually changed the marker.
    pub fn applied_count(&self) -> usize {
        self.applied.get()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }

    pub fn detach(mut self) {
        self.subscription.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_and_dirty() {
        let mut classes = ClassList::new();
        assert!(!is_dirty(&classes));
        make_dirty(&mut classes);
        assert!(is_dirty(&classes));
    }

    #[test]
    fn test_marker_added_next_to_other_classes() {
        let mut classes = ClassList::parse("test-class");
        assert!(set_marker(&mut classes, "dark"));
        assert!(classes.contains("theme-ui-dark"));
        assert!(classes.contains("test-class"));
    }

    #[test]
    fn test_marker_replaced() {
        let mut classes = ClassList::parse("theme-ui-random test-class");
        set_marker(&mut classes, "dark");
        assert!(classes.contains("theme-ui-dark"));
        assert!(!classes.contains("theme-ui-random"));
        assert_eq!(marker_id(&classes), Some("dark"));
    }

    #[test]
    fn test_same_marker_is_noop() {
        let mut classes = ClassList::parse("theme-ui-dark");
        let before = classes.mutations();
        assert!(!set_marker(&mut classes, "dark"));
        assert_eq!(classes.mutations(), before);
    }

    #[test]
    fn test_duplicate_markers_collapse() {
        let mut classes = ClassList::parse("theme-ui-dark theme-ui-random");
        assert!(set_marker(&mut classes, "dark"));
        assert_eq!(classes.to_string(), "theme-ui-dark");
        assert!(!set_marker(&mut classes, "dark"));
    }

    #[test]
    fn test_parse_and_display() {
        let classes = ClassList::parse("  a b  a c ");
        assert_eq!(classes.len(), 3);
        assert_eq!(classes.to_string(), "a b c");
    }
}
