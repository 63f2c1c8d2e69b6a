//! Client facade error types.

use thiserror::Error;

use crate::errors::{BulkError, TransportError};

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Error from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error from a bulk flush.
    #[error("Bulk error: {0}")]
    Bulk(#[from] BulkError),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to delete a document or index.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse a response from the backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No target index is configured for the operation.
    #[error("No target index configured")]
    MissingTarget,

    /// The operation requires a single target index.
    #[error("Operation requires a single target index, {0} configured")]
    AmbiguousTarget(usize),
}

impl ClientError {
    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
