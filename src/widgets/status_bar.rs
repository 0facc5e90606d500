use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Bottom status bar showing the current mode id, its position and any
/// rejected input.
pub struct StatusBarWidget<'a> {
    /// Current mode id (e.g., "dark")
    pub mode: &'a str,
    /// Position within the list (e.g., "2/3")
    pub position: &'a str,
    /// Shortcut hint (e.g., "Ctrl+Alt+←/→")
    pub hint: &'a str,
    /// Optional message (e.g., a rejected selection)
    pub message: Option<&'a str>,
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let bg = Color::DarkGray;

        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_style(Style::default().bg(bg));
        }

        let mode_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::White).bg(bg);
        let position_style = Style::default().fg(Color::Yellow).bg(bg);
        let msg_style = Style::default().fg(Color::Red).bg(bg);

        let mut spans = vec![
            Span::styled(format!(" {} ", self.mode), mode_style),
            Span::styled(format!(" {} ", self.hint), hint_style),
        ];

        if let Some(msg) = self.message {
            spans.push(Span::styled(format!(" {msg} "), msg_style));
        }

        // Right-align position
        let left_len: usize = spans.iter().map(|s| s.width()).sum();
        let position_text = format!(" {} ", self.position);
        let padding = (area.width as usize).saturating_sub(left_len + position_text.len());
        if padding > 0 {
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        }
        spans.push(Span::styled(position_text, position_style));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
