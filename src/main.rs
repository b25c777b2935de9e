use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use canvas_snake::config::Settings;
use canvas_snake::game::GameEngine;
use canvas_snake::input::{GameInput, route_key};
use canvas_snake::logging::{LogLevel, default_log_path, init_file_logger};
use canvas_snake::renderer;
use canvas_snake::terminal_runtime::{AppTerminal, TerminalSession};
use canvas_snake::timer::TickTimer;
use clap::Parser;
use crossterm::event::{self, Event};
use log::info;

/// How long to wait for input when no tick is armed.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (JSON). Defaults to settings.json in the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells, overriding the settings file.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells, overriding the settings file.
    #[arg(long)]
    height: Option<u16>,

    /// Seed for food placement, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_file_logger(&log_path, cli.log_level)?;

    let mut engine = build_engine(&cli)?;

    let mut session = TerminalSession::enter()?;
    run(session.terminal_mut(), &mut engine)?;
    drop(session);

    info!("quitting with high score {}", engine.high_score());
    Ok(())
}

fn build_engine(cli: &Cli) -> io::Result<GameEngine> {
    let mut settings = match (&cli.config, Settings::default_path()) {
        (Some(path), _) => Settings::load(path, false),
        (None, Some(path)) => Settings::load(&path, true),
        (None, None) => Ok(Settings::default()),
    }
    .map_err(io::Error::other)?;

    if let Some(width) = cli.width {
        settings.grid_width = width;
    }
    if let Some(height) = cli.height {
        settings.grid_height = height;
    }

    let config = settings.engine_config().map_err(io::Error::other)?;
    match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    }
    .map_err(io::Error::other)
}

/// Single-threaded host loop: draw, wait for a key or the armed tick, repeat.
fn run(terminal: &mut AppTerminal, engine: &mut GameEngine) -> io::Result<()> {
    let mut timer = TickTimer::default();

    loop {
        terminal.draw(|frame| renderer::render(frame, engine))?;

        let timeout = timer
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL_INTERVAL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match route_key(engine.status(), key) {
                    Some(GameInput::Quit) => break,
                    Some(input) => {
                        if let Some(request) = engine.apply_input(input) {
                            timer.arm(request, Instant::now());
                        }
                    }
                    None => {}
                }
            }
        }

        let now = Instant::now();
        if let Some(run) = timer.take_due(now) {
            if let Some(next) = engine.on_tick(run) {
                timer.arm(next, now);
            }
        }
    }

    Ok(())
}
