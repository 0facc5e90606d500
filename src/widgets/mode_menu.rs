use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Widget},
};

use crate::menu::ModeLink;

/// Floating mode picker anchored below the toolbar.
pub struct ModeMenuWidget<'a> {
    /// One link per mode, in list order
    pub links: &'a [ModeLink],
    /// Index of the link under the cursor
    pub highlighted: usize,
    /// Block title
    pub title: &'a str,
}

impl<'a> Widget for ModeMenuWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.links.is_empty() || area.height < 3 {
            return;
        }

        let visible_count = self.links.len().min(area.height as usize - 2);

        let max_width = self
            .links
            .iter()
            .take(visible_count)
            .map(|l| l.title.chars().count() + 6)
            .chain(std::iter::once(self.title.chars().count() + 4))
            .max()
            .unwrap_or(10);

        let popup_width = (max_width as u16).min(area.width);
        let popup_height = (visible_count as u16 + 2).min(area.height);
        let popup_area = Rect::new(area.x, area.y, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(self.title);

        let items: Vec<ListItem> = self
            .links
            .iter()
            .take(visible_count)
            .enumerate()
            .map(|(i, link)| ListItem::new(link_line(link, i == self.highlighted)))
            .collect();

        List::new(items).block(block).render(popup_area, buf);
    }
}

fn link_line(link: &ModeLink, highlighted: bool) -> Line<'static> {
    let style = if highlighted {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let marker = if link.active { "●" } else { " " };
    Line::from(vec![
        Span::styled(format!(" {marker} "), style),
        Span::styled(format!("{} ", link.title), style),
    ])
}
