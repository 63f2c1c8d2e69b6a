//! Bulk operation batching.
//!
//! This module implements the accumulate-then-flush protocol: operations
//! are buffered locally, serialized into one combined request, and the
//! combined response is correlated back into per-operation outcomes.

mod buffer;
mod response;

pub use buffer::{BulkBuffer, FlushOptions};
