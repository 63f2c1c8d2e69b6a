//! # Search Client
//!
//! This crate provides an HTTP client for a document-search backend. It
//! includes single-operation document APIs (index, search, delete), index
//! administration, and a bulk buffer that batches multiple document
//! operations into one combined request and correlates the combined
//! response back into per-operation outcomes.

pub mod bulk;
pub mod client;
pub mod errors;
pub mod http;
pub mod interfaces;

pub use bulk::{BulkBuffer, FlushOptions};
pub use client::{SearchClient, SearchRequest, WriteOptions};
pub use errors::{BulkError, ClientError, TransportError};
pub use http::{HttpConfig, HttpTransport};
pub use interfaces::{Method, RequestBody, Transport, TransportResponse};
