//! # Search Client Shared
//!
//! Shared data types for the document-search client. This crate defines the
//! document operation records, bulk outcome types, and response models
//! exchanged with the search backend. It contains no I/O.

pub mod bulk;
pub mod document;
pub mod search;

pub use bulk::{BulkItemOutcome, BulkResult};
pub use document::{DocumentOperation, OperationKind};
pub use search::{DeleteResponse, IndexResponse, SearchHit, SearchHits, SearchResponse};
