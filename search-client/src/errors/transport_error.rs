//! Transport error types.
//!
//! This module defines the errors that can occur at the HTTP boundary,
//! before a response body reaches the caller.

use thiserror::Error;

/// Errors that can occur while talking to the search backend.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The configured endpoint URL could not be parsed.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Failed to set up the HTTP client.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request failed in flight (connect, send, or read).
    #[error("Request error: {0}")]
    RequestError(String),

    /// The response body was not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl TransportError {
    /// Create an invalid URL error.
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
