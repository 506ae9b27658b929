mod app;
mod config;
mod event;
mod game;
mod input;
mod ui;

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use config::GameConfig;
use event::EventHandler;

const LOG_FILE: &str = "invaders.log";

/// Next to the executable first, then the working directory.
fn log_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            paths.push(dir.join(LOG_FILE));
        }
    }
    paths.push(PathBuf::from(LOG_FILE));
    paths
}

/// First candidate that can be created, or `None` when none can.
fn open_log(candidates: &[PathBuf]) -> Option<(PathBuf, File)> {
    candidates
        .iter()
        .find_map(|path| File::create(path).ok().map(|file| (path.clone(), file)))
}

/// Logging never blocks the game: with no writable log file, records are discarded.
fn init_logging() {
    let (target, path) = match open_log(&log_candidates()) {
        Some((path, file)) => (Box::new(file) as Box<dyn io::Write + Send>, Some(path)),
        None => (Box::new(io::sink()) as Box<dyn io::Write + Send>, None),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .init();
    if let Some(path) = path {
        info!("logging to {}", path.display());
    }
}

fn main() -> Result<()> {
    init_logging();
    let config = GameConfig::default();
    info!(
        "surface {}x{}, frame {}ms",
        config.surface_width, config.surface_height, config.frame_ms
    );

    enable_raw_mode().context("failed to enable raw mode")?;
    let result = run(config);

    // Always try to restore terminal state.
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);

    result
}

fn run(config: GameConfig) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")?;
    terminal.clear().context("failed to clear terminal")?;

    let mut events = EventHandler::new(config.tick_rate());
    let mut app = App::new(config);
    app.run(&mut terminal, &mut events)
        .context("game loop failed")
}
