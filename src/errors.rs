/*!
 * Error types for the deckglot application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when working with translation provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The call did not finish within the configured bound
    #[error("Request timed out after {timeout:?}")]
    Timeout {
        /// Configured bound for the call
        timeout: Duration,
    },
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors raised while opening, reading or repackaging a presentation archive
#[derive(Error, Debug)]
pub enum ContainerError {
    /// The input bytes are not a readable zip archive
    #[error("Input is not a valid presentation archive: {0}")]
    Open(String),

    /// An entry could not be read from the archive
    #[error("Failed to read archive entry '{path}': {message}")]
    Read {
        /// Entry path inside the archive
        path: String,
        /// Underlying error message
        message: String,
    },

    /// A content entry is not valid UTF-8
    #[error("Archive entry '{path}' is not valid UTF-8")]
    Encoding {
        /// Entry path inside the archive
        path: String,
    },

    /// The rewritten archive could not be serialized
    #[error("Failed to write presentation archive: {0}")]
    Write(String),
}

impl From<zip::result::ZipError> for ContainerError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Write(error.to_string())
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Every provider in the fallback chain failed
    #[error("All translation providers failed: {0}")]
    AllProvidersFailed(ProviderError),

    /// The fallback chain was built without any provider
    #[error("No translation providers configured")]
    NoProviders,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The inbound request is unusable (wrong method, empty body, bad parameters)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the archive pipeline
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Whether the error was caused by the caller rather than by the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
