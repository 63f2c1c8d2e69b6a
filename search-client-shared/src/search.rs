//! Response models for single-operation APIs.
//!
//! Serde bindings for the backend's search, index, and delete response
//! bodies. Only the fields the client exposes are modeled; unknown fields
//! are ignored on deserialization.

use serde::Deserialize;
use serde_json::Value;

/// Response body of a search request.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Time the backend reported spending on the query, in milliseconds.
    pub took: Option<u64>,
    /// Whether the query timed out on the backend.
    pub timed_out: Option<bool>,
    /// The matching documents.
    pub hits: SearchHits,
}

/// The hits section of a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHits {
    /// Total number of matching documents.
    pub total: u64,
    /// Highest relevance score among the hits.
    pub max_score: Option<f64>,
    /// The returned documents.
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// A single matching document.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// Index the document lives in.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score, absent when sorting replaces scoring.
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    /// The stored document payload.
    #[serde(rename = "_source")]
    pub source: Option<Value>,
}

/// Acknowledgement for a single index operation.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexResponse {
    /// Whether the backend accepted the document.
    #[serde(default)]
    pub ok: bool,
    /// Index the document was written to.
    #[serde(rename = "_index", default)]
    pub index: String,
    /// Id assigned to the document.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Document version after the write.
    #[serde(rename = "_version")]
    pub version: Option<i64>,
}

/// Acknowledgement for a single delete operation.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    /// Whether the backend acknowledged the deletion.
    #[serde(default)]
    pub ok: bool,
    /// Index the document was removed from.
    #[serde(rename = "_index", default)]
    pub index: String,
    /// Id of the removed document.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Whether the document existed before the delete.
    pub found: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_search_response() {
        let body = json!({
            "took": 5,
            "timed_out": false,
            "_shards": { "total": 1, "successful": 1, "failed": 0 },
            "hits": {
                "total": 3,
                "max_score": 1.2,
                "hits": [
                    {
                        "_index": "articles",
                        "_id": "1",
                        "_score": 1.2,
                        "_source": { "title": "One cool document", "rank": 4 }
                    },
                    {
                        "_index": "articles",
                        "_id": "2",
                        "_score": 0.8,
                        "_source": { "title": "Another cool document", "rank": 7 }
                    }
                ]
            }
        });

        let response: SearchResponse = serde_json::from_value(body).unwrap();

        assert_eq!(response.took, Some(5));
        assert_eq!(response.hits.total, 3);
        assert_eq!(response.hits.hits.len(), 2);
        assert_eq!(response.hits.hits[0].id, "1");
        assert_eq!(response.hits.hits[0].source.as_ref().unwrap()["rank"], 4);
    }

    #[test]
    fn test_deserialize_sorted_hits_without_score() {
        let body = json!({
            "hits": {
                "total": 1,
                "max_score": null,
                "hits": [
                    { "_index": "articles", "_id": "9", "_score": null, "sort": [3] }
                ]
            }
        });

        let response: SearchResponse = serde_json::from_value(body).unwrap();

        assert!(response.hits.hits[0].score.is_none());
        assert!(response.hits.hits[0].source.is_none());
    }

    #[test]
    fn test_deserialize_index_response() {
        let body = json!({
            "ok": true,
            "_index": "articles",
            "_id": "1",
            "_version": 1
        });

        let response: IndexResponse = serde_json::from_value(body).unwrap();

        assert!(response.ok);
        assert_eq!(response.index, "articles");
        assert_eq!(response.version, Some(1));
    }

    #[test]
    fn test_deserialize_delete_response_not_found() {
        let body = json!({
            "ok": true,
            "_index": "articles",
            "_id": "7",
            "found": false
        });

        let response: DeleteResponse = serde_json::from_value(body).unwrap();

        assert!(response.ok);
        assert_eq!(response.found, Some(false));
    }
}
