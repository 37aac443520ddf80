//! Error types for the rolezinhos store.

use thiserror::Error;

/// Errors that can occur in store operations.
///
/// A missing record is not an error: lookups return `Option`.
#[derive(Error, Debug)]
pub enum RolezinhosError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Baseline source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Corrupt local state under '{key}': {reason}")]
    CorruptLocalState { key: String, reason: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Sign in to {0}")]
    SignInRequired(&'static str),

    #[error("Record has no id")]
    MissingId,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RolezinhosError {
    fn from(e: serde_json::Error) -> Self {
        RolezinhosError::Serialization(e.to_string())
    }
}

/// Result type alias for store operations.
pub type RolezinhosResult<T> = Result<T, RolezinhosError>;
