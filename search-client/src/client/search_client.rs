//! Search client facade.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, instrument};

use search_client_shared::{
    BulkResult, DeleteResponse, DocumentOperation, IndexResponse, SearchResponse,
};

use crate::bulk::{BulkBuffer, FlushOptions};
use crate::client::queries::{self, SearchRequest};
use crate::errors::{ClientError, TransportError};
use crate::http::{HttpConfig, HttpTransport};
use crate::interfaces::{Method, RequestBody, Transport};

/// Options for single-document write operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Ask the backend to refresh the index before responding, making the
    /// write immediately visible to searches.
    pub refresh: bool,
}

/// Client facade for the search backend.
///
/// The facade holds the current target index selection and one owned
/// [`BulkBuffer`]. Single-operation APIs issue one request each; bulk-mode
/// APIs append to the buffer, which [`bulk_submit`](SearchClient::bulk_submit)
/// flushes as one combined request.
///
/// Target selection is per-instance state. Enqueueing a bulk operation
/// snapshots the current target into the operation, so changing the target
/// afterwards never rewrites what is already buffered.
pub struct SearchClient {
    transport: Arc<dyn Transport>,
    targets: Vec<String>,
    buffer: BulkBuffer,
}

impl SearchClient {
    /// Create a client over the given transport with no target selected.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            targets: Vec::new(),
            buffer: BulkBuffer::new(),
        }
    }

    /// Create a client over an HTTP transport built from `config`.
    pub fn connect(config: HttpConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Target a single index for subsequent operations.
    pub fn set_index(&mut self, index: impl Into<String>) {
        self.targets = vec![index.into()];
    }

    /// Target several indices for subsequent search operations.
    ///
    /// Single-document operations require exactly one target and will fail
    /// while several are selected.
    pub fn set_indices<I, S>(&mut self, indices: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = indices.into_iter().map(Into::into).collect();
    }

    /// The currently selected target indices.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    fn single_target(&self) -> Result<&str, ClientError> {
        match self.targets.as_slice() {
            [index] => Ok(index),
            [] => Err(ClientError::MissingTarget),
            many => Err(ClientError::AmbiguousTarget(many.len())),
        }
    }

    fn search_targets(&self) -> Result<String, ClientError> {
        if self.targets.is_empty() {
            return Err(ClientError::MissingTarget);
        }
        Ok(self.targets.join(","))
    }

    /// Index a document under the given id in the current target index.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexResponse)` - The backend's acknowledgement
    /// * `Err(ClientError)` - If no single target is selected, the request
    ///   fails, or the backend rejects the document
    #[instrument(skip(self, document))]
    pub async fn index(
        &self,
        id: &str,
        document: Value,
        options: WriteOptions,
    ) -> Result<IndexResponse, ClientError> {
        let target = self.single_target()?;
        let path = queries::document_path(target, id, options.refresh);

        let response = self
            .transport
            .send(Method::Put, &path, Some(RequestBody::Json(document)))
            .await?;

        if !response.is_success() {
            error!(status = response.status, "Index request failed");
            return Err(ClientError::index(format!(
                "Index request failed with status {}: {}",
                response.status, response.body
            )));
        }

        let parsed: IndexResponse = serde_json::from_value(response.body)
            .map_err(|e| ClientError::parse(e.to_string()))?;
        debug!(index = %target, "Document indexed");
        Ok(parsed)
    }

    /// Execute a search against the current target indices.
    ///
    /// Accepts a query string (`"title:cool"`) or a full DSL body
    /// (`serde_json::Value`); see [`SearchRequest`].
    #[instrument(skip(self, request))]
    pub async fn search(
        &self,
        request: impl Into<SearchRequest>,
    ) -> Result<SearchResponse, ClientError> {
        let request = request.into();
        let targets = self.search_targets()?;
        let path = queries::search_path(&targets, &request);

        let (method, body) = match request {
            SearchRequest::QueryString(_) => (Method::Get, None),
            SearchRequest::Body(value) => (Method::Post, Some(RequestBody::Json(value))),
        };

        let response = self.transport.send(method, &path, body).await?;

        if !response.is_success() {
            error!(status = response.status, "Search request failed");
            return Err(ClientError::query(format!(
                "Search failed with status {}: {}",
                response.status, response.body
            )));
        }

        let parsed: SearchResponse = serde_json::from_value(response.body)
            .map_err(|e| ClientError::parse(e.to_string()))?;
        debug!(total = parsed.hits.total, "Search completed");
        Ok(parsed)
    }

    /// Delete the document with the given id from the current target index.
    ///
    /// A 404 is a successful outcome: the document is gone either way.
    #[instrument(skip(self))]
    pub async fn delete_document(
        &self,
        id: &str,
        options: WriteOptions,
    ) -> Result<DeleteResponse, ClientError> {
        let target = self.single_target()?;
        let path = queries::document_path(target, id, options.refresh);

        let response = self.transport.send(Method::Delete, &path, None).await?;

        if !response.is_success() && response.status != 404 {
            error!(status = response.status, "Delete request failed");
            return Err(ClientError::delete(format!(
                "Delete failed with status {}: {}",
                response.status, response.body
            )));
        }

        let parsed: DeleteResponse = serde_json::from_value(response.body)
            .map_err(|e| ClientError::parse(e.to_string()))?;
        debug!(index = %target, "Document deleted");
        Ok(parsed)
    }

    /// Delete the current target index and everything in it.
    ///
    /// Deleting an index that does not exist is a successful outcome.
    pub async fn delete_index(&self) -> Result<(), ClientError> {
        let target = self.single_target()?;
        let path = queries::index_path(target);

        let response = self.transport.send(Method::Delete, &path, None).await?;

        if !response.is_success() && response.status != 404 {
            return Err(ClientError::delete(format!(
                "Index deletion failed with status {}: {}",
                response.status, response.body
            )));
        }

        debug!(index = %target, "Index deleted");
        Ok(())
    }

    /// Create the current target index, optionally with settings/mappings.
    pub async fn create_index(&self, settings: Option<Value>) -> Result<(), ClientError> {
        let target = self.single_target()?;
        let path = queries::index_path(target);
        let body = settings.map(RequestBody::Json);

        let response = self.transport.send(Method::Put, &path, body).await?;

        if !response.is_success() {
            return Err(ClientError::index_creation(format!(
                "Index creation failed with status {}: {}",
                response.status, response.body
            )));
        }

        debug!(index = %target, "Index created");
        Ok(())
    }

    /// Create the current target index if it does not exist yet.
    ///
    /// This should be called during application startup.
    pub async fn ensure_index(&self, settings: Option<Value>) -> Result<(), ClientError> {
        let target = self.single_target()?;
        let path = queries::index_path(target);

        let response = self.transport.send(Method::Head, &path, None).await?;
        if response.is_success() {
            debug!(index = %target, "Index already exists");
            return Ok(());
        }

        self.create_index(settings).await
    }

    /// Check that the backend is reachable and answering.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The backend answered with a 2xx status
    /// * `Ok(false)` - The backend answered with any other status
    /// * `Err(ClientError)` - If the request could not be completed
    pub async fn ping(&self) -> Result<bool, ClientError> {
        let response = self.transport.send(Method::Get, "/", None).await?;
        Ok(response.is_success())
    }

    /// Buffer an index operation against the current target index.
    ///
    /// The target is snapshotted into the operation at call time. Nothing is
    /// sent until [`bulk_submit`](SearchClient::bulk_submit).
    pub fn bulk_index(&mut self, id: &str, document: Value) -> Result<(), ClientError> {
        let target = self.single_target()?.to_string();
        self.buffer
            .enqueue(DocumentOperation::index(target, id, document));
        Ok(())
    }

    /// Buffer a delete operation against the current target index.
    pub fn bulk_delete(&mut self, id: &str) -> Result<(), ClientError> {
        let target = self.single_target()?.to_string();
        self.buffer.enqueue(DocumentOperation::delete(target, id));
        Ok(())
    }

    /// Number of buffered operations awaiting submission.
    pub fn pending_operations(&self) -> usize {
        self.buffer.pending()
    }

    /// Submit all buffered operations as one combined request.
    ///
    /// The buffer is drained whatever the outcome; see
    /// [`BulkBuffer::flush`] for the full contract.
    pub async fn bulk_submit(&mut self, options: FlushOptions) -> Result<BulkResult, ClientError> {
        let result = self
            .buffer
            .flush(self.transport.as_ref(), options)
            .await?;
        Ok(result)
    }
}
