//! Transport trait definition.
//!
//! The transport is the only I/O boundary of the client: it sends one HTTP
//! request and returns the status plus parsed body. Everything above it
//! (bulk buffer, facade) is pure request construction and response
//! interpretation, which keeps those layers testable against mock
//! transports.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransportError;

/// HTTP method of a backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    /// The method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a backend request.
///
/// The two shapes carry different content types on the wire, so the
/// distinction is kept structural rather than leaving it to the caller to
/// pre-frame everything into bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A single JSON document (`application/json`).
    Json(Value),
    /// A pre-framed newline-delimited batch payload (`application/x-ndjson`).
    Bulk(String),
}

/// Status and parsed body of a backend response.
///
/// Non-2xx statuses are returned as responses, not errors: interpreting the
/// status is the caller's concern (a delete treats 404 as success, for
/// example).
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body; `Value::Null` when the response body was empty.
    pub body: Value,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract interface for sending requests to the search backend.
///
/// Implementations must be `Send + Sync` to allow sharing across async
/// tasks. The production implementation is [`crate::http::HttpTransport`];
/// tests substitute mocks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request to the backend.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method to use
    /// * `path` - Request path including any query string, starting with `/`
    /// * `body` - Optional request body
    ///
    /// # Returns
    ///
    /// * `Ok(TransportResponse)` - The status and parsed body, for any status
    /// * `Err(TransportError)` - If the request could not be completed
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn test_response_success_range() {
        let ok = TransportResponse {
            status: 201,
            body: Value::Null,
        };
        let missing = TransportResponse {
            status: 404,
            body: Value::Null,
        };

        assert!(ok.is_success());
        assert!(!missing.is_success());
    }
}
