use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use colormode::app::App;
use colormode::config::ColorModeParams;
use colormode::keys::KeyBindings;
use colormode::menu::ModeLink;
use colormode::modes::{ModeEntry, ModeMap};
use colormode::widgets::help_overlay::{help_entries, HelpOverlayWidget};
use colormode::widgets::mode_menu::ModeMenuWidget;
use colormode::widgets::preview::PreviewWidget;
use colormode::widgets::status_bar::StatusBarWidget;
use colormode::widgets::toolbar::ToolbarWidget;

/// Render tests using Ratatui's TestBackend, checking buffer contents.

fn buffer_line_to_string(buf: &Buffer, y: u16) -> String {
    let mut line = String::new();
    for x in 0..buf.area.width {
        line.push_str(buf[(x, y)].symbol());
    }
    line
}

fn buffer_to_string(buf: &Buffer) -> String {
    (0..buf.area.height)
        .map(|y| buffer_line_to_string(buf, y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_toolbar_inactive_shows_title_only() {
    let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
    terminal
        .draw(|frame| {
            frame.render_widget(
                ToolbarWidget {
                    title: "Color Mode",
                    label: None,
                    menu_open: false,
                    error: None,
                },
                frame.area(),
            );
        })
        .unwrap();

    let line = buffer_line_to_string(terminal.backend().buffer(), 0);
    assert!(line.contains("Color Mode"));
    assert!(!line.contains("Darkness"));
}

#[test]
fn test_toolbar_active_shows_label() {
    let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
    terminal
        .draw(|frame| {
            frame.render_widget(
                ToolbarWidget {
                    title: "Color Mode",
                    label: Some("Darkness"),
                    menu_open: false,
                    error: None,
                },
                frame.area(),
            );
        })
        .unwrap();

    let line = buffer_line_to_string(terminal.backend().buffer(), 0);
    assert!(line.contains("Color Mode"));
    assert!(line.contains("Darkness"));
}

#[test]
fn test_toolbar_error_replaces_button() {
    let mut terminal = Terminal::new(TestBackend::new(50, 1)).unwrap();
    terminal
        .draw(|frame| {
            frame.render_widget(
                ToolbarWidget {
                    title: "Color Mode",
                    label: None,
                    menu_open: false,
                    error: Some("Default Index out of Bounds: (3)"),
                },
                frame.area(),
            );
        })
        .unwrap();

    let line = buffer_line_to_string(terminal.backend().buffer(), 0);
    assert!(line.contains("Default Index out of Bounds: (3)"));
    assert!(!line.contains("Color Mode"));
}

#[test]
fn test_menu_lists_modes() {
    let links = vec![
        ModeLink {
            id: "default".into(),
            title: "Default".into(),
            index: 0,
            active: true,
        },
        ModeLink {
            id: "dark".into(),
            title: "Darkness".into(),
            index: 1,
            active: false,
        },
    ];

    let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
    terminal
        .draw(|frame| {
            frame.render_widget(
                ModeMenuWidget {
                    links: &links,
                    highlighted: 1,
                    title: " Modes ",
                },
                frame.area(),
            );
        })
        .unwrap();

    let screen = buffer_to_string(terminal.backend().buffer());
    assert!(screen.contains("Modes"));
    assert!(screen.contains("● Default"));
    assert!(screen.contains("Darkness"));
}

#[test]
fn test_preview_and_status_bar() {
    let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            let top = ratatui::layout::Rect::new(area.x, area.y, area.width, 5);
            let bottom = ratatui::layout::Rect::new(area.x, area.y + 5, area.width, 1);
            frame.render_widget(
                PreviewWidget {
                    mode: Some("dark"),
                    class_name: "dirty-color-mode-addon theme-ui-dark",
                    applied: 2,
                },
                top,
            );
            frame.render_widget(
                StatusBarWidget {
                    mode: "dark",
                    position: "2/3",
                    hint: "Ctrl+Alt+←/→",
                    message: Some("Index out of bounds: (7)"),
                },
                bottom,
            );
        })
        .unwrap();

    let buf = terminal.backend().buffer();
    let screen = buffer_to_string(buf);
    assert!(screen.contains("theme-ui-dark"));
    let status = buffer_line_to_string(buf, 5);
    assert!(status.contains("dark"));
    assert!(status.contains("2/3"));
    assert!(status.contains("Index out of bounds: (7)"));
}

#[test]
fn test_help_lists_configured_bindings() {
    let entries = help_entries(&KeyBindings::default());
    assert_eq!(entries[0].0, "Ctrl+Alt+←");
    assert_eq!(entries[1].0, "Ctrl+Alt+→");
    assert_eq!(entries[2].0, "Ctrl+Alt+0-9");

    let bindings = KeyBindings::default();
    let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
    terminal
        .draw(|frame| frame.render_widget(HelpOverlayWidget { bindings: &bindings }, frame.area()))
        .unwrap();
    let screen = buffer_to_string(terminal.backend().buffer());
    assert!(screen.contains("Next mode"));
}

#[test]
fn test_full_app_render() {
    let mut modes = ModeMap::new();
    modes.insert("dark".into(), ModeEntry { name: "Darkness".into() });
    let app = App::new(ColorModeParams {
        modes,
        default_mode: "dark".into(),
        ..ColorModeParams::default()
    });

    let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    let buf = terminal.backend().buffer();
    assert!(buffer_line_to_string(buf, 0).contains("Darkness"));
    assert!(buffer_to_string(buf).contains("theme-ui-dark"));
    assert!(buffer_line_to_string(buf, 9).contains("2/2"));
}
