//! Error types for the simulation core

use thiserror::Error;

/// Main error type for the simulation core
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
