use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::channel::{ChannelExt, ChannelHandle, MemoryChannel, KEYDOWN, MODE_STEP};
use crate::config::ColorModeParams;
use crate::constants::TOOL_TIP_TITLE;
use crate::keys::{key_name, KeyAction, KeyPress};
use crate::observer::{shared_root, ModeObserver, SharedRoot};
use crate::store::SharedStore;
use crate::tool::Control;
use crate::widgets::help_overlay::HelpOverlayWidget;
use crate::widgets::mode_menu::ModeMenuWidget;
use crate::widgets::preview::PreviewWidget;
use crate::widgets::status_bar::StatusBarWidget;
use crate::widgets::toolbar::ToolbarWidget;

/// Which context receives key presses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The toolbar control handles presses itself
    #[default]
    Toolbar,
    /// Presses are forwarded over the channel, as a preview frame would
    Preview,
}

impl Focus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toolbar => "TOOLBAR",
            Self::Preview => "PREVIEW",
        }
    }
}

/// Terminal host: one manager context (the toolbar control) and one preview
/// context (the observer and its root element) sharing a store and a channel.
pub struct App {
    pub params: ColorModeParams,
    pub store: SharedStore,
    pub channel: Rc<MemoryChannel>,
    pub control: Control,
    pub observer: ModeObserver,
    pub focus: Focus,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(params: ColorModeParams) -> Self {
        Self::with_root(params, shared_root(""))
    }

    /// Build the host around an existing root, e.g. one a previous mount
    /// already marked.
    pub fn with_root(params: ColorModeParams, root: SharedRoot) -> Self {
        let store = SharedStore::new();
        let channel = MemoryChannel::handle();
        let handle: ChannelHandle = channel.clone();

        let observer = ModeObserver::attach(&handle, root, params.initial_mode());

        let mut app = Self {
            params,
            store,
            channel,
            control: Control::Uninitialized,
            observer,
            focus: Focus::default(),
            show_help: false,
            should_quit: false,
        };
        app.remount();
        app
    }

    /// Tear the control down and mount it again over the same store, as a
    /// host does when the toolbar re-renders from scratch.
    pub fn remount(&mut self) {
        // release the old subscriptions before the new mount registers its own
        self.control = Control::Uninitialized;
        let handle: ChannelHandle = self.channel.clone();
        self.control = Control::mount(&self.params, Rc::new(self.store.clone()), &handle);
    }

    pub fn root(&self) -> &SharedRoot {
        self.observer.root()
    }

    /// Id of the selected mode, or `None` when the control failed to mount.
    pub fn get_output(&self) -> Option<String> {
        self.control.tool().map(|t| t.current_mode().id.clone())
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Release {
                return;
            }

            if self.show_help {
                self.show_help = false;
                return;
            }

            if is_quit(&key) && !self.menu_open() {
                self.should_quit = true;
                return;
            }

            if key.code == KeyCode::Tab {
                self.focus = match self.focus {
                    Focus::Toolbar => Focus::Preview,
                    Focus::Preview => Focus::Toolbar,
                };
                return;
            }

            match self.focus {
                Focus::Toolbar => self.handle_toolbar_key(key),
                Focus::Preview => self.handle_preview_key(key),
            }
        }
    }

    fn menu_open(&self) -> bool {
        self.control.tool().is_some_and(|t| t.menu().open)
    }

    fn handle_toolbar_key(&mut self, key: KeyEvent) {
        let Some(tool) = self.control.tool_mut() else {
            return;
        };

        if tool.menu().open {
            match key.code {
                KeyCode::Up => tool.menu_up(),
                KeyCode::Down => tool.menu_down(),
                KeyCode::Enter => {
                    // failures are kept on the tool and shown in the status bar
                    let _ = tool.click_highlighted();
                }
                KeyCode::Esc | KeyCode::Char('m') => tool.close_menu(),
                _ => {}
            }
            return;
        }

        if let Some(press) = KeyPress::from_key_event(&key) {
            if tool.handle_key(&press) != KeyAction::None {
                return;
            }
        }

        match key.code {
            KeyCode::Char('m') => tool.open_menu(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn handle_preview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('[') => self.channel.publish(MODE_STEP, &-1),
            KeyCode::Char(']') => self.channel.publish(MODE_STEP, &1),
            KeyCode::Char('?') => self.show_help = true,
            _ => {
                if let Some(press) = KeyPress::from_key_event(&key) {
                    self.channel.publish(KEYDOWN, &press);
                }
            }
        }
    }

    /// Render the full UI.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let error = self.control.error_message();
        let tool = self.control.tool();

        frame.render_widget(
            ToolbarWidget {
                title: "Color Mode",
                label: tool.and_then(|t| t.label()),
                menu_open: tool.is_some_and(|t| t.menu().open),
                error: error.as_deref(),
            },
            chunks[0],
        );

        let class_name = self.root().borrow().to_string();
        let marked = self.observer.current_mode();
        frame.render_widget(
            PreviewWidget {
                mode: marked.as_deref(),
                class_name: &class_name,
                applied: self.observer.applied_count(),
            },
            chunks[1],
        );

        let (mode, position, message) = match tool {
            Some(t) => (
                t.current_mode().id.clone(),
                format!("{}/{}", t.current_index() + 1, t.list().len()),
                t.last_error().map(|e| e.to_string()),
            ),
            None => ("-".to_string(), "-".to_string(), None),
        };
        let bindings = &self.params.bindings;
        let hint = format!(
            "{} {}+{}/{} · {TOOL_TIP_TITLE}",
            self.focus.label(),
            bindings.prefix.label(),
            key_name(bindings.previous_trigger),
            key_name(bindings.next_trigger),
        );
        frame.render_widget(
            StatusBarWidget {
                mode: &mode,
                position: &position,
                hint: &hint,
                message: message.as_deref(),
            },
            chunks[2],
        );

        if let Some(t) = tool.filter(|t| t.menu().open) {
            let links = t.links();
            frame.render_widget(
                ModeMenuWidget {
                    links: &links,
                    highlighted: t.menu().highlighted,
                    title: " Modes ",
                },
                chunks[1],
            );
        }

        if self.show_help {
            frame.render_widget(HelpOverlayWidget { bindings }, frame.area());
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('q') => key.modifiers.is_empty(),
        KeyCode::Char('c') => key.modifiers == KeyModifiers::CONTROL,
        _ => false,
    }
}
