//! Error types for feed fetching and parsing.
//!
//! A [`FeedError`] never escapes the aggregator: it is rendered into the
//! affected room's `error` field. The [`FeedErrorCode`] keeps the category
//! around for logging.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// The category of a feed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedErrorCode {
    /// Connection failed, DNS resolution failed, body could not be read, etc.
    NetworkError,
    /// The fetch did not settle within the configured timeout.
    Timeout,
    /// The server answered with a non-success status.
    HttpStatus,
    /// The body is not a calendar document.
    InvalidDocument,
    /// The room's feed URL is not an absolute http(s) URL.
    InvalidUrl,
    /// The HTTP client could not be built from the configuration.
    ConfigurationError,
}

impl FeedErrorCode {
    /// Returns a stable snake_case name for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::Timeout => "timeout",
            Self::HttpStatus => "http_status",
            Self::InvalidDocument => "invalid_document",
            Self::InvalidUrl => "invalid_url",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for FeedErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while fetching or parsing one room's feed.
#[derive(Debug, Error)]
pub struct FeedError {
    code: FeedErrorCode,
    message: String,
    /// HTTP status, for [`FeedErrorCode::HttpStatus`].
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FeedError {
    /// Creates a new feed error with the given code and message.
    pub fn new(code: FeedErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::NetworkError, message)
    }

    /// Creates a timeout error for a fetch that exceeded `after`.
    pub fn timeout(after: Duration) -> Self {
        Self::new(
            FeedErrorCode::Timeout,
            format!("Request timed out after {}s", after.as_secs_f64()),
        )
    }

    /// Creates an error for a non-success HTTP status.
    ///
    /// The message reads like `HTTP 404 Not Found`.
    pub fn http_status(status: u16, reason: Option<&str>) -> Self {
        let message = match reason {
            Some(reason) => format!("HTTP {} {}", status, reason),
            None => format!("HTTP {}", status),
        };
        let mut err = Self::new(FeedErrorCode::HttpStatus, message);
        err.status = Some(status);
        err
    }

    /// Creates the error reported for bodies that are not calendar documents.
    pub fn invalid_document() -> Self {
        Self::new(FeedErrorCode::InvalidDocument, "Invalid iCal format")
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::InvalidUrl, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::ConfigurationError, message)
    }

    /// Sets the source error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> FeedErrorCode {
        self.code
    }

    /// Returns the human-readable message, as shown in a room's `error` field.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status for status errors.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
