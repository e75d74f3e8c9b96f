//! Unified error types for the construction records service.
//!
//! Every fallible operation in the crate returns [`Result`]. Field validation is not an
//! error here; it travels as `Outcome::Rejected` from the submission module.

use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// The relational store rejected or failed an operation
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Human-readable entity name (e.g. "Employee")
        entity: &'static str,
        /// Identifier that was looked up
        id: i64,
    },

    /// The request itself is malformed (unknown route target, bad query parameter)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Description of what was wrong with the request
        message: String,
    },

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// A page context could not be serialised for rendering
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure (binding the listener, reading files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::BadRequest`] with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
