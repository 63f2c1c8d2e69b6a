//! Bulk response parsing and correlation.
//!
//! The combined response is correlated positionally: item `i` belongs to
//! submitted operation `i` and must be keyed by that operation's action
//! name. Any divergence between response framing and the submitted sequence
//! is fatal for the flush.

use serde::Deserialize;
use serde_json::Value;

use search_client_shared::{BulkItemOutcome, BulkResult, DocumentOperation, OperationKind};

use crate::errors::BulkError;

/// Raw combined response body.
#[derive(Debug, Deserialize)]
struct RawBulkResponse {
    took: Option<u64>,
    #[serde(default)]
    items: Vec<RawBulkItem>,
}

/// One raw response item; exactly one action field is populated.
#[derive(Debug, Deserialize)]
struct RawBulkItem {
    index: Option<RawBulkAction>,
    create: Option<RawBulkAction>,
    delete: Option<RawBulkAction>,
}

impl RawBulkItem {
    /// The action payload matching the submitted operation kind, if present.
    fn action(&self, kind: OperationKind) -> Option<&RawBulkAction> {
        match kind {
            // Backends report an index operation under "index" or "create".
            OperationKind::Index => self.index.as_ref().or(self.create.as_ref()),
            OperationKind::Delete => self.delete.as_ref(),
        }
    }
}

/// Per-item action payload.
#[derive(Debug, Deserialize)]
struct RawBulkAction {
    #[serde(rename = "_id", default)]
    id: String,
    ok: Option<bool>,
    status: Option<u16>,
    error: Option<Value>,
}

impl RawBulkAction {
    fn error_text(&self) -> Option<String> {
        self.error.as_ref().map(|error| match error {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }
}

/// Correlate a combined response body with the submitted operations.
///
/// # Returns
///
/// * `Ok(BulkResult)` - One outcome per operation, in submission order
/// * `Err(BulkError)` - If the response framing diverges from the submitted
///   sequence (item count mismatch, uninterpretable item)
pub(crate) fn correlate(
    operations: &[DocumentOperation],
    body: Value,
) -> Result<BulkResult, BulkError> {
    let response: RawBulkResponse = serde_json::from_value(body)
        .map_err(|e| BulkError::malformed(format!("Unexpected response shape: {}", e)))?;

    if response.items.len() != operations.len() {
        return Err(BulkError::ItemCountMismatch {
            expected: operations.len(),
            actual: response.items.len(),
        });
    }

    let mut items = Vec::with_capacity(operations.len());
    for (position, (operation, item)) in operations.iter().zip(response.items.iter()).enumerate() {
        let kind = operation.kind();
        let action = item.action(kind).ok_or_else(|| {
            BulkError::malformed(format!(
                "Item {} is missing the '{}' action",
                position,
                kind.action_name()
            ))
        })?;

        let ok = match (action.ok, action.status) {
            (Some(ok), _) => ok,
            (None, Some(status)) => (200..300).contains(&status),
            (None, None) => {
                return Err(BulkError::malformed(format!(
                    "Item {} reports neither ok nor status",
                    position
                )));
            }
        };

        // Older backends omit the per-item status; substitute a
        // representative code so the outcome type stays uniform.
        let status = action.status.unwrap_or(if ok { 200 } else { 400 });

        let id = if action.id.is_empty() {
            operation.doc_id().to_string()
        } else {
            action.id.clone()
        };

        items.push(BulkItemOutcome {
            kind,
            id,
            status,
            ok,
            error: action.error_text(),
        });
    }

    Ok(BulkResult {
        took_ms: response.took,
        items,
    })
}
