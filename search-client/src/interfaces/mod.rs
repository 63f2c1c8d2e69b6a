//! Interface definitions for the search client.
//!
//! This module defines the abstract `Transport` trait that allows for
//! dependency injection and swappable request implementations.

mod transport;

pub use transport::{Method, RequestBody, Transport, TransportResponse};
