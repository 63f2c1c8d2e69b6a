//! Bulk operation buffer.

use serde_json::json;
use tracing::{debug, instrument};

use search_client_shared::{BulkResult, DocumentOperation};

use crate::bulk::response;
use crate::errors::BulkError;
use crate::interfaces::{Method, RequestBody, Transport};

/// Options for one bulk flush.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlushOptions {
    /// Ask the backend to refresh affected indices before responding.
    pub refresh: bool,
}

/// Buffer that accumulates document operations for combined submission.
///
/// Operations are appended in call order and submitted as one request by
/// [`flush`](BulkBuffer::flush). The buffer has a single logical owner:
/// enqueue and flush take `&mut self`, so sharing one buffer across tasks
/// requires external synchronization (or one buffer per caller).
///
/// Flush drains the buffer whatever the outcome. Operations are consumed
/// exactly once; a failed flush is not retried and failed items are not
/// re-enqueued.
#[derive(Debug, Default)]
pub struct BulkBuffer {
    operations: Vec<DocumentOperation>,
}

impl BulkBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation to the pending sequence.
    ///
    /// Never fails; the combined response is correlated by position, so
    /// insertion order is the order outcomes come back in.
    pub fn enqueue(&mut self, operation: DocumentOperation) {
        self.operations.push(operation);
    }

    /// Number of pending operations.
    pub fn pending(&self) -> usize {
        self.operations.len()
    }

    /// Whether the buffer holds no pending operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Submit all pending operations as one combined request.
    ///
    /// Flushing an empty buffer is legal: it returns an empty result without
    /// issuing a request. Per-item rejections do not fail the flush; they
    /// surface as failed outcomes inside the returned [`BulkResult`].
    ///
    /// # Returns
    ///
    /// * `Ok(BulkResult)` - One outcome per operation, in submission order
    /// * `Err(BulkError)` - If the request failed or the response framing
    ///   diverged from the submitted sequence; the buffer is drained either
    ///   way
    #[instrument(skip(self, transport), fields(count = self.operations.len()))]
    pub async fn flush<T>(
        &mut self,
        transport: &T,
        options: FlushOptions,
    ) -> Result<BulkResult, BulkError>
    where
        T: Transport + ?Sized,
    {
        if self.operations.is_empty() {
            debug!("Nothing to flush");
            return Ok(BulkResult::empty());
        }

        // Drain up front: operations are consumed exactly once, whatever
        // the outcome of the round trip.
        let operations = std::mem::take(&mut self.operations);

        let payload = serialize_operations(&operations)?;
        let path = if options.refresh {
            "/_bulk?refresh=true"
        } else {
            "/_bulk"
        };

        let response = transport
            .send(Method::Post, path, Some(RequestBody::Bulk(payload)))
            .await?;

        if !response.is_success() {
            return Err(BulkError::Rejected {
                status: response.status,
                detail: response.body.to_string(),
            });
        }

        let result = response::correlate(&operations, response.body)?;
        debug!(items = result.len(), "Bulk flush completed");
        Ok(result)
    }
}

/// Serialize operations into the newline-delimited request payload.
///
/// Each operation becomes an action/metadata line, followed by the raw
/// document line for index operations. The payload ends with a newline.
fn serialize_operations(operations: &[DocumentOperation]) -> Result<String, BulkError> {
    let mut payload = String::new();

    for operation in operations {
        let metadata = match operation {
            DocumentOperation::Index { index, id, .. } => {
                json!({ "index": { "_index": index, "_id": id } })
            }
            DocumentOperation::Delete { index, id } => {
                json!({ "delete": { "_index": index, "_id": id } })
            }
        };

        payload.push_str(
            &serde_json::to_string(&metadata).map_err(|e| BulkError::serialization(e.to_string()))?,
        );
        payload.push('\n');

        if let Some(document) = operation.document() {
            payload.push_str(
                &serde_json::to_string(document)
                    .map_err(|e| BulkError::serialization(e.to_string()))?,
            );
            payload.push('\n');
        }
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::errors::TransportError;
    use crate::interfaces::TransportResponse;

    #[derive(Debug, Clone)]
    struct RecordedRequest {
        method: Method,
        path: String,
        body: Option<RequestBody>,
    }

    /// Mock transport that records requests and replays queued responses.
    struct MockTransport {
        requests: Mutex<Vec<RecordedRequest>>,
        responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(VecDeque::new()),
            }
        }

        fn respond_with(self, status: u16, body: Value) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Ok(TransportResponse { status, body }));
            self
        }

        fn fail_with(self, error: TransportError) -> Self {
            self.responses.lock().unwrap().push_back(Err(error));
            self
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> RecordedRequest {
            self.requests.lock().unwrap().last().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(
            &self,
            method: Method,
            path: &str,
            body: Option<RequestBody>,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.to_string(),
                body,
            });

            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(TransportResponse {
                    status: 200,
                    body: Value::Null,
                }))
        }
    }

    fn accepted_items(actions: &[&str]) -> Value {
        let items: Vec<Value> = actions
            .iter()
            .map(|action| json!({ *action: { "ok": true, "status": 200 } }))
            .collect();
        json!({ "took": 5, "errors": false, "items": items })
    }

    fn bulk_lines(request: &RecordedRequest) -> Vec<Value> {
        let payload = match &request.body {
            Some(RequestBody::Bulk(payload)) => payload,
            other => panic!("expected bulk body, got {:?}", other),
        };
        assert!(payload.ends_with('\n'));
        payload
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_flush_serializes_in_enqueue_order() {
        let transport =
            MockTransport::new().respond_with(200, accepted_items(&["index", "index", "index"]));
        let mut buffer = BulkBuffer::new();

        for id in ["3", "2", "1"] {
            buffer.enqueue(DocumentOperation::index(
                "articles",
                id,
                json!({ "title": "One cool document" }),
            ));
        }

        let result = buffer.flush(&transport, FlushOptions::default()).await.unwrap();

        assert_eq!(result.len(), 3);
        assert!(result.all_ok());
        let ids: Vec<&str> = result.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/_bulk");

        let lines = bulk_lines(&request);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0]["index"]["_id"], "3");
        assert_eq!(lines[1]["title"], "One cool document");
        assert_eq!(lines[2]["index"]["_id"], "2");
        assert_eq!(lines[4]["index"]["_id"], "1");
    }

    #[tokio::test]
    async fn test_delete_operations_have_no_document_line() {
        let transport =
            MockTransport::new().respond_with(200, accepted_items(&["index", "delete"]));
        let mut buffer = BulkBuffer::new();

        buffer.enqueue(DocumentOperation::index("articles", "1", json!({"rank": 4})));
        buffer.enqueue(DocumentOperation::delete("articles", "2"));

        buffer.flush(&transport, FlushOptions::default()).await.unwrap();

        let lines = bulk_lines(&transport.last_request());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2]["delete"]["_index"], "articles");
        assert_eq!(lines[2]["delete"]["_id"], "2");
    }

    #[tokio::test]
    async fn test_flush_empty_buffer_issues_no_request() {
        let transport = MockTransport::new();
        let mut buffer = BulkBuffer::new();

        let result = buffer.flush(&transport, FlushOptions::default()).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_flush_with_refresh() {
        let transport = MockTransport::new().respond_with(200, accepted_items(&["index"]));
        let mut buffer = BulkBuffer::new();
        buffer.enqueue(DocumentOperation::index("articles", "1", json!({})));

        buffer
            .flush(&transport, FlushOptions { refresh: true })
            .await
            .unwrap();

        assert_eq!(transport.last_request().path, "/_bulk?refresh=true");
    }

    #[tokio::test]
    async fn test_buffer_drained_after_success() {
        let transport = MockTransport::new().respond_with(200, accepted_items(&["index"]));
        let mut buffer = BulkBuffer::new();
        buffer.enqueue(DocumentOperation::index("articles", "1", json!({})));
        assert_eq!(buffer.pending(), 1);

        buffer.flush(&transport, FlushOptions::default()).await.unwrap();

        assert_eq!(buffer.pending(), 0);
        assert!(buffer.is_empty());
    }

    #[tokio::test]
    async fn test_buffer_drained_after_transport_error() {
        let transport =
            MockTransport::new().fail_with(TransportError::request("connection refused"));
        let mut buffer = BulkBuffer::new();
        buffer.enqueue(DocumentOperation::index("articles", "1", json!({})));

        let result = buffer.flush(&transport, FlushOptions::default()).await;

        assert!(matches!(result, Err(BulkError::Transport(_))));
        assert_eq!(buffer.pending(), 0);
    }

    #[tokio::test]
    async fn test_flush_rejects_item_count_mismatch() {
        let transport = MockTransport::new().respond_with(200, accepted_items(&["index"]));
        let mut buffer = BulkBuffer::new();
        buffer.enqueue(DocumentOperation::index("articles", "1", json!({})));
        buffer.enqueue(DocumentOperation::index("articles", "2", json!({})));

        let result = buffer.flush(&transport, FlushOptions::default()).await;

        assert!(matches!(
            result,
            Err(BulkError::ItemCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert_eq!(buffer.pending(), 0);
    }

    #[tokio::test]
    async fn test_per_item_failure_does_not_fail_flush() {
        let body = json!({
            "errors": true,
            "items": [
                { "index": { "_id": "1", "ok": true } },
                { "index": { "_id": "2", "status": 400, "error": "mapper_parsing_exception" } },
                { "index": { "_id": "3", "ok": true } }
            ]
        });
        let transport = MockTransport::new().respond_with(200, body);
        let mut buffer = BulkBuffer::new();
        for id in ["1", "2", "3"] {
            buffer.enqueue(DocumentOperation::index("articles", id, json!({})));
        }

        let result = buffer.flush(&transport, FlushOptions::default()).await.unwrap();

        assert_eq!(result.len(), 3);
        assert!(!result.all_ok());
        let failed: Vec<_> = result.failures().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].id, "2");
        assert_eq!(failed[0].error.as_deref(), Some("mapper_parsing_exception"));
    }

    #[tokio::test]
    async fn test_flush_surfaces_request_rejection() {
        let transport =
            MockTransport::new().respond_with(400, json!({ "error": "malformed action line" }));
        let mut buffer = BulkBuffer::new();
        buffer.enqueue(DocumentOperation::index("articles", "1", json!({})));

        let result = buffer.flush(&transport, FlushOptions::default()).await;

        assert!(matches!(result, Err(BulkError::Rejected { status: 400, .. })));
        assert_eq!(buffer.pending(), 0);
    }
}
