use crate::config::ConfigError;

/// Fatal startup or terminal I/O failures.  Game over is not an error.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not initialise logging: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
