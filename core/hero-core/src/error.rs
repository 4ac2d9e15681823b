//! Error types for hero-core operations.

use std::path::PathBuf;

/// All errors that can occur in hero-core operations.
#[derive(Debug, thiserror::Error)]
pub enum HeroError {
    // ─────────────────────────────────────────────────────────────────────
    // Session Data Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Session has no scheduled start time")]
    MissingScheduledStart,

    #[error("Session scheduled start is not a valid timestamp: {raw:?}")]
    InvalidScheduledStart { raw: String },

    // ─────────────────────────────────────────────────────────────────────
    // Source Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Failed to read sessions from {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse sessions from {path}: {source}")]
    SourceParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration directory not found")]
    ConfigDirNotFound,

    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Configuration write failed: {path}: {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using HeroError.
pub type Result<T> = std::result::Result<T, HeroError>;

impl From<HeroError> for String {
    fn from(err: HeroError) -> String {
        err.to_string()
    }
}
