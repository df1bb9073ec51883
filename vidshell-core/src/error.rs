//! Error types for vidshell

use thiserror::Error;

/// Result type alias for fallible setup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading settings or starting the engine.
///
/// Engine commands never fail from the controller's point of view, so
/// nothing in the event routing path returns this type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Failed to start engine `{binary}`: {source}")]
    EngineSpawn {
        binary: String,
        source: std::io::Error,
    },

    #[error("Engine IPC socket never became available: {0}")]
    EngineConnect(String),
}
