use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Preview pane: what the observed root element currently carries.
pub struct PreviewWidget<'a> {
    /// Mode id encoded by the root's marker, if any
    pub mode: Option<&'a str>,
    /// Full class attribute of the root
    pub class_name: &'a str,
    /// Number of marker changes the observer applied
    pub applied: usize,
}

impl<'a> Widget for PreviewWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Preview ")
            .border_style(Style::default().fg(Color::DarkGray));

        let label_style = Style::default().fg(Color::DarkGray);
        let value_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(vec![
                Span::styled("mode:    ", label_style),
                Span::styled(self.mode.unwrap_or("-"), value_style),
            ]),
            Line::from(vec![
                Span::styled("class:   ", label_style),
                Span::styled(self.class_name, Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("applied: ", label_style),
                Span::styled(self.applied.to_string(), Style::default().fg(Color::White)),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
