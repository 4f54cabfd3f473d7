//! Custom error types for seachest
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Pipeline failures carry a stage tag so the
//! CLI can report which collaborator failed.

use thiserror::Error;

/// The main error type for seachest operations
#[derive(Error, Debug)]
pub enum SeachestError {
    /// Configuration-related errors (base directory, settings file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ledger load/save errors
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Archive pack/unpack errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// Encryption/decryption errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Content store publish/fetch/pin errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SeachestError {
    /// The pipeline stage this error belongs to, if any
    ///
    /// `Config` and `Ledger` errors are not stage failures; the three
    /// collaborator errors map to the stage that raised them.
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            Self::Archive(_) => Some("archive"),
            Self::Encryption(_) => Some("encrypt"),
            Self::Storage(_) => Some("storage"),
            Self::Config(_) | Self::Ledger(_) => None,
        }
    }
}

/// Result type alias using SeachestError
pub type SeachestResult<T> = Result<T, SeachestError>;
