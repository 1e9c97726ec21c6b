//! Core error types for eisenboard-core.
//!
//! This module defines the error hierarchy using thiserror. The scoring
//! engine itself never fails (an incomplete questionnaire is reported as
//! [`crate::scoring::Verdict::Undecided`]); these errors cover validation,
//! configuration and the storage backends.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for eisenboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// SQLite backend failure
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// `config.toml` could not be loaded or saved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote task API errors
    #[error("Remote API error: {0}")]
    Remote(#[from] RemoteError),

    /// Rejected input, e.g. a blank title
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Task lookup failed
    #[error("Task not found: {0}")]
    NotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored evaluation JSON could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the SQLite task database.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A schema migration step failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Another process holds the write lock
    #[error("Database is locked")]
    Locked,
}

/// Errors around `config.toml` and the data directory.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// A value parsed but the resulting config does not validate
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors raised by the remote task API client.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Transport failure (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The API answered `success: false`
    #[error("API rejected request: {0}")]
    Rejected(String),

    /// The envelope did not carry the expected payload
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The configured base URL is unusable
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Input rejected before it reaches a backend.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Required text field is blank
    #[error("'{0}' must not be blank")]
    Blank(String),

    /// A question category would fall below its minimum size
    #[error("{category} needs at least {minimum} questions, got {actual}")]
    TooFewQuestions {
        category: String,
        minimum: usize,
        actual: usize,
    },

    /// Question id outside the category
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Patch without any field set
    #[error("No fields to update")]
    EmptyPatch,

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
