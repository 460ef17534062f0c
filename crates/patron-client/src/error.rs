//! Error types for patron-client

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum Error {
    /// Phone number failed the international-format check
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    /// No account exists for the phone number
    #[error("customer not found")]
    NotFound,

    /// Backend rejected the request; carries the backend's `detail` text
    #[error("{detail}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Backend-provided error detail
        detail: String,
    },

    /// Transport-level failure
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not decode
    #[error("invalid response: {0}")]
    Decode(String),

    /// Redemption flow misuse (no reward selected, or not affordable)
    #[error("{0}")]
    Redemption(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
