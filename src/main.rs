use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use colormode::app::App;
use colormode::channel::MemoryChannel;
use colormode::config::{self, ColorModeParams};
use colormode::observer::marker_class;
use colormode::selection::Selection;
use colormode::store::SharedStore;

/// colormode: cycle through named color modes
///
/// Reads the `colorMode` parameters from a JSON or TOML file (or the default
/// parameter file in the config directory) and lets you step through the
/// modes with the configured shortcuts.
#[derive(Parser, Debug)]
#[command(name = "colormode", version, about, long_about = None)]
struct Cli {
    /// Parameter file (JSON or TOML); defaults to <config dir>/params.toml
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Override the default mode id
    #[arg(short = 'd', long = "default")]
    default_mode: Option<String>,

    /// Print the mode list and exit
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Print the marker class of the default mode and exit
    #[arg(short = 'c', long = "class")]
    class: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut params = match &cli.file {
        Some(path) => config::load_params_file(path)?,
        None => config::load_params()?,
    };
    if let Some(ref id) = cli.default_mode {
        params.default_mode = id.clone();
    }

    if cli.list || cli.class {
        return print_summary(&params, &cli);
    }

    if !io::stdout().is_terminal() {
        bail!("Interactive mode requires a terminal. Use --list or --class when piping output.");
    }

    let mut app = App::new(params);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    if let Some(id) = app.get_output() {
        println!("{id}");
    }
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            let evt = event::read()?;
            if let Event::Key(_) = evt {
                app.handle_event(evt);
            }
        }
    }

    Ok(())
}

fn print_summary(params: &ColorModeParams, cli: &Cli) -> Result<()> {
    let list = params.mode_list().context("invalid mode configuration")?;
    let selection = Selection::initialize(
        list,
        params.default_mode.as_str(),
        Rc::new(SharedStore::new()),
        MemoryChannel::handle(),
    )
    .context("invalid default mode")?;

    if cli.list {
        let current = selection.current_index();
        for (i, mode) in selection.list().iter().enumerate() {
            let marker = if i == current { '*' } else { ' ' };
            println!("{marker} {i} {:<16} {}", mode.id, mode.name);
        }
    }
    if cli.class {
        println!("{}", marker_class(&selection.current_mode().id));
    }
    Ok(())
}
