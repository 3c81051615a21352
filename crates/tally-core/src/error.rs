//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Upstream(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification callers use to pick a response format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input, detected before any I/O
    Validation,
    /// The ledger API failed or returned something unusable
    Upstream,
    /// Anything else (configuration, local I/O)
    Unexpected,
}

impl Error {
    /// Build a validation error for a named input field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Upstream(_) | Error::Http(_) | Error::Json(_) => ErrorKind::Upstream,
            Error::Config(_) | Error::Io(_) => ErrorKind::Unexpected,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
