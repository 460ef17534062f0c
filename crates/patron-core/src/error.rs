//! Error types for patron-core

use thiserror::Error;

/// Gateway error type.
///
/// Callers outside this crate rarely see these: the gateway absorbs every
/// turn-processing failure into a user-facing apology reply.
#[derive(Debug, Error)]
pub enum Error {
    /// Model provider failure
    #[error("llm error: {0}")]
    Llm(#[from] patron_llm::Error),

    /// Model answered without usable text
    #[error("model returned no answer text")]
    EmptyAnswer,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
