use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// The toolbar button of the control.
/// Shows: ` ◐ Color Mode ` plus the active mode's name when a non-default mode
/// is selected, or a static error in place of the button when mounting failed.
pub struct ToolbarWidget<'a> {
    /// Button title
    pub title: &'a str,
    /// Active mode name, shown only while a non-default mode is selected
    pub label: Option<&'a str>,
    /// Whether the picker is open
    pub menu_open: bool,
    /// Mount failure shown instead of the button
    pub error: Option<&'a str>,
}

impl<'a> Widget for ToolbarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        if let Some(error) = self.error {
            let style = Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD);
            let line = Line::from(Span::styled(format!(" ✖ {error} "), style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let button_style = match (self.label.is_some(), self.menu_open) {
            (_, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (false, false) => Style::default().fg(Color::White).bg(Color::DarkGray),
        };

        let mut spans = vec![Span::styled(format!(" ◐ {} ", self.title), button_style)];
        if let Some(label) = self.label {
            spans.push(Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::Cyan),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
