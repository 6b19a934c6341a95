use std::env;
use std::time::Instant;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::audio::RodioBackend;
use crate::library::scan;
use crate::player::Session;

mod event_loop;
mod keymap;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();
    logging::init(&settings.logging)?;
    if let Some(note) = fallback {
        eprintln!("cadenza: {note}; using defaults");
        warn!(%note, "using default settings");
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let roots = startup::resolve_roots(&args, &settings)?;

    let tracks = scan(&roots, &settings.library);
    info!(?roots, tracks = tracks.len(), "library scanned");

    let backend = RodioBackend::new()?;
    let mut session = Session::new(tracks, backend, &settings, Instant::now());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut session);

    // Release the open track before the terminal, whatever the loop returned.
    session.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    run_result
}
