use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::info;
use ratatui::layout::Rect;
use veil_snake::app::App;
use veil_snake::config::{DEFAULT_GRID_COUNT, DEFAULT_UPDATES_PER_SECOND, GameConfig};
use veil_snake::error::AppError;
use veil_snake::terminal_runtime::{TerminalSession, install_panic_hook};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Cells per board side.
    #[arg(long = "grid-count", default_value_t = DEFAULT_GRID_COUNT)]
    grid_count: u16,

    /// Snake moves per second (1 to 1000).
    #[arg(long = "ups", default_value_t = DEFAULT_UPDATES_PER_SECOND)]
    updates_per_second: u32,

    /// Tint alternate cells so the grid is visible.
    #[arg(long = "grid-lines")]
    grid_lines: bool,

    /// Seed apple placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Reveal the game layer immediately.
    #[arg(long)]
    open: bool,

    /// Write diagnostics to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("veil-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = GameConfig::new(cli.grid_count, cli.updates_per_second, cli.grid_lines, cli.seed)?;

    if let Some(path) = &cli.log_file {
        init_file_logger(path)?;
    }
    info!(
        "starting with {}x{} grid at {} ups",
        config.grid().width,
        config.grid().height,
        config.updates_per_second()
    );

    install_panic_hook();

    let mut session = TerminalSession::enter()?;
    let terminal = session.terminal_mut();
    let size = terminal.size()?;

    let mut app = App::new(config, Rect::new(0, 0, size.width, size.height));
    if cli.open {
        app.handle().open();
    }

    app.run(terminal)
}

fn init_file_logger(path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.display().to_string(),
        source,
    })?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(())
}
