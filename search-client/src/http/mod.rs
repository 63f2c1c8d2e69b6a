//! HTTP implementation of the transport.
//!
//! This module provides the production `Transport` implementation over
//! `reqwest`, plus its configuration.

mod config;
mod transport;

pub use config::HttpConfig;
pub use transport::HttpTransport;
