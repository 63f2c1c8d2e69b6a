//! Search request and path construction.

use serde_json::Value;

/// A search request.
///
/// Query-string searches travel as the `q` URL parameter; DSL bodies are
/// posted verbatim, so callers keep full control over query shape, sort
/// clauses, and any other request-level options.
#[derive(Debug, Clone)]
pub enum SearchRequest {
    /// Query-string syntax, e.g. `title:cool`.
    QueryString(String),
    /// Full query DSL body, passed through unchanged.
    Body(Value),
}

impl From<&str> for SearchRequest {
    fn from(query: &str) -> Self {
        Self::QueryString(query.to_string())
    }
}

impl From<String> for SearchRequest {
    fn from(query: String) -> Self {
        Self::QueryString(query)
    }
}

impl From<Value> for SearchRequest {
    fn from(body: Value) -> Self {
        Self::Body(body)
    }
}

/// Path of a search request against the given targets.
pub(crate) fn search_path(targets: &str, request: &SearchRequest) -> String {
    match request {
        SearchRequest::QueryString(query) => {
            format!("/{}/_search?q={}", targets, urlencoding::encode(query))
        }
        SearchRequest::Body(_) => format!("/{}/_search", targets),
    }
}

/// Path of a single-document request.
pub(crate) fn document_path(index: &str, id: &str, refresh: bool) -> String {
    let path = format!("/{}/_doc/{}", index, urlencoding::encode(id));
    if refresh {
        format!("{}?refresh=true", path)
    } else {
        path
    }
}

/// Path of an index-level request.
pub(crate) fn index_path(index: &str) -> String {
    format!("/{}", index)
}
