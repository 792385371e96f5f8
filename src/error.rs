use std::io;

use thiserror::Error;

/// Failures of the application shell around the game.
///
/// Gameplay itself never fails: self-collision resets the board and
/// unmapped input is ignored.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
