//! Bulk operation error types.
//!
//! These errors abort a whole flush. Per-item rejections are not errors at
//! this level; they surface as failed outcomes inside a successful
//! `BulkResult`.

use thiserror::Error;

use crate::errors::TransportError;

/// Errors that can occur while flushing the bulk buffer.
#[derive(Error, Debug)]
pub enum BulkError {
    /// The underlying request failed before a response could be read.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend rejected the combined request outright.
    #[error("Bulk request rejected with status {status}: {detail}")]
    Rejected {
        /// HTTP status of the rejection.
        status: u16,
        /// Response body, as reported by the backend.
        detail: String,
    },

    /// The combined response reported a different number of items than the
    /// number of submitted operations. The client and backend have diverged
    /// on framing; the result is never truncated or padded to fit.
    #[error("Bulk response has {actual} items for {expected} operations")]
    ItemCountMismatch {
        /// Number of operations submitted in the request.
        expected: usize,
        /// Number of items in the response.
        actual: usize,
    },

    /// The combined response could not be interpreted.
    #[error("Malformed bulk response: {0}")]
    MalformedResponse(String),

    /// An operation could not be serialized into the request payload.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl BulkError {
    /// Create a malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
