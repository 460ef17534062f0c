//! Error types for patron-tools

use thiserror::Error;

/// Tool error type
#[derive(Debug, Error)]
pub enum Error {
    /// Executor could not be constructed
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid backend URL
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
