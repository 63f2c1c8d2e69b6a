//! Client facade for the search backend.
//!
//! This module provides the high-level operations callers use: single
//! document index/search/delete, index administration, target selection,
//! and the bulk-mode entry points backed by the bulk buffer.

mod queries;
mod search_client;

pub use queries::SearchRequest;
pub use search_client::{SearchClient, WriteOptions};
