//! Error types for the search client.

mod bulk_error;
mod client_error;
mod transport_error;

pub use bulk_error::BulkError;
pub use client_error::ClientError;
pub use transport_error::TransportError;
