use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::keys::{key_name, KeyBindings};

/// Help overlay listing the shortcuts of the configured bindings.
pub struct HelpOverlayWidget<'a> {
    pub bindings: &'a KeyBindings,
}

impl<'a> Widget for HelpOverlayWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 48.min(area.width.saturating_sub(4));
        let height = 12.min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let popup = Rect::new(x, y, width, height);

        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Yellow));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::White);

        let lines: Vec<Line> = help_entries(self.bindings)
            .into_iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("{key:>16}  "), key_style),
                    Span::styled(desc, desc_style),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Key/description pairs for the given bindings.
pub fn help_entries(bindings: &KeyBindings) -> Vec<(String, &'static str)> {
    let with_prefix = |key: String| {
        let prefix = bindings.prefix.label();
        if prefix.is_empty() {
            key
        } else {
            format!("{prefix}+{key}")
        }
    };

    vec![
        (with_prefix(key_name(bindings.previous_trigger)), "Previous mode"),
        (with_prefix(key_name(bindings.next_trigger)), "Next mode"),
        (with_prefix("0-9".into()), "Select mode by position"),
        ("m".into(), "Open mode picker"),
        ("↑/↓ Enter".into(), "Move / pick in picker"),
        ("?".into(), "Toggle this help"),
        ("q / Esc".into(), "Quit"),
    ]
}
