use crate::modes::ModeList;
use crate::selection::{Selection, SelectionError};

/// One entry of the mode picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeLink {
    pub id: String,
    pub title: String,
    pub index: usize,
    /// Whether this is the currently selected mode
    pub active: bool,
}

/// Build picker entries for every mode in the list.
pub fn to_links(list: &ModeList, current_index: usize) -> Vec<ModeLink> {
    list.iter()
        .enumerate()
        .map(|(index, mode)| ModeLink {
            id: mode.id.clone(),
            title: mode.name.clone(),
            index,
            active: index == current_index,
        })
        .collect()
}

/// What a click on a link did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Whether the selection was changed
    pub selected: bool,
    /// The menu always closes after a click
    pub close: bool,
}

/// Picking the already active mode leaves the selection alone; either way
/// the menu closes.
pub fn click(link: &ModeLink, selection: &Selection) -> Result<ClickOutcome, SelectionError> {
    let selected = if selection.current_mode().id != link.id {
        selection.set_index(link.index as i64)?;
        true
    } else {
        false
    };
    Ok(ClickOutcome {
        selected,
        close: true,
    })
}

/// Cursor over the open picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
    pub highlighted: usize,
}

impl MenuState {
    /// Open with the current mode highlighted.
    pub fn open_at(&mut self, current_index: usize) {
        self.open = true;
        self.highlighted = current_index;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn move_up(&mut self, len: usize) {
        if len > 0 {
            self.highlighted = (self.highlighted + len - 1) % len;
        }
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 {
            self.highlighted = (self.highlighted + 1) % len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{ModeEntry, ModeMap};

    fn list() -> ModeList {
        let mut map = ModeMap::new();
        map.insert("dark".into(), ModeEntry { name: "Darkness".into() });
        ModeList::from_map(&map).unwrap()
    }

    #[test]
    fn test_links_mirror_list() {
        let links = to_links(&list(), 0);
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].id, "dark");
        assert_eq!(links[1].title, "Darkness");
        assert!(links[0].active);
        assert!(!links[1].active);
    }

    #[test]
    fn test_menu_cursor_wraps() {
        let mut menu = MenuState::default();
        menu.open_at(0);
        menu.move_up(3);
        assert_eq!(menu.highlighted, 2);
        menu.move_down(3);
        assert_eq!(menu.highlighted, 0);
        menu.close();
        assert!(!menu.open);
    }
}
