//! Server error types.

use std::io;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the server and CLI.
///
/// Per-room feed failures are not represented here: they are data in the
/// report, not errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error (listener, config file, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV decoding error in the table store.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A table could not be read or does not have the expected shape.
    #[error("Store error in table '{table}': {message}")]
    Store { table: String, message: String },

    /// Feed client setup failed.
    #[error("Feed error: {0}")]
    Feed(#[from] riadops_feeds::FeedError),

    /// Tracing could not be initialized.
    #[error("Tracing error: {0}")]
    Tracing(#[from] riadops_core::TracingError),

    /// Background task failure.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ServerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a store error for `table`.
    pub fn store(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = ServerError::store("Rooms", "missing column 'Room ID'");
        assert_eq!(
            err.to_string(),
            "Store error in table 'Rooms': missing column 'Room ID'"
        );
    }

    #[test]
    fn io_error_converts() {
        let err: ServerError = io::Error::other("disk full").into();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
