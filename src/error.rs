//! Error types for TxForge

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TxForgeError {
    /// A required field is missing or a mutually-exclusive combination was
    /// violated. Always recoverable by correcting the input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A structural invariant was violated despite passing validation.
    /// Internal defect, not a caller error.
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("signing error: {0}")]
    Signing(String),

    /// The node rejected the submitted bytes. Carries the node's verbatim
    /// reason; re-submitting identical bytes yields identical rejection.
    #[error("submission rejected: {0}")]
    Submission(String),

    /// Transient network failure while polling for status.
    #[error("poll error: {0}")]
    Poll(String),
}

impl From<std::io::Error> for TxForgeError {
    fn from(err: std::io::Error) -> Self {
        TxForgeError::Encoding(err.to_string())
    }
}

impl From<bs58::decode::Error> for TxForgeError {
    fn from(err: bs58::decode::Error) -> Self {
        TxForgeError::Decoding(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TxForgeError>;
