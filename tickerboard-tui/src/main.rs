//! Tickerboard TUI: live watchlist dashboard.
//!
//! Panels:
//! 1. Watchlist: sortable, filterable grid with selection and inline edits
//! 2. Heatmap: percent-change tiles for the visible records
//! 3. Help: keyboard shortcuts

mod app;
mod input;
mod logger;
mod persistence;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use tickerboard_core::{Board, BoardConfig};

use crate::app::AppState;

#[derive(Parser)]
#[command(name = "tickerboard-tui", about = "Live stock watchlist dashboard")]
struct Args {
    /// Board/tick config (TOML). Defaults to <config dir>/tickerboard/config.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where `w` writes CSV exports.
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Directory for the rolling log file.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Fixed generator seed, overriding the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with live updates paused.
    #[arg(long)]
    paused: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = logger::init(args.log_dir.clone().unwrap_or_else(logger::default_log_dir))?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        error!(%info, "panic");
        default_hook(info);
    }));

    // Paths
    let app_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickerboard");
    let state_path = app_dir.join("state.json");

    let mut config = load_config(args.config.as_deref(), &app_dir.join("config.toml"))?;
    if args.seed.is_some() {
        config.board.seed = args.seed;
    }

    // Load persisted state
    let persisted = persistence::load(&state_path);

    // Build app state
    let board = Board::new(&config);
    let mut app = AppState::new(
        board,
        config.tick.interval(),
        state_path.clone(),
        args.export_dir.clone(),
    );

    // Apply persisted state
    let live = persistence::apply(&mut app, persisted) && !args.paused;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    if live {
        app.resume_ticks();
    }
    info!(records = app.board.len(), live, "tickerboard started");

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Stop the timer, then save state before exit
    let persisted = persistence::extract(&app);
    app.pause_ticks();
    if let Err(e) = persistence::save(&state_path, &persisted) {
        error!(error = %e, "failed to save view state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(ticks = app.ticks_applied, "tickerboard stopped");
    result
}

/// Explicit `--config` must load; the default location is optional.
fn load_config(explicit: Option<&Path>, default_path: &Path) -> Result<BoardConfig> {
    match explicit {
        Some(path) => BoardConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None if default_path.exists() => BoardConfig::from_file(default_path)
            .with_context(|| format!("loading config {}", default_path.display())),
        None => Ok(BoardConfig::default()),
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Apply queued ticks (non-blocking)
        app.drain_ticks();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
