//! Document operation records.
//!
//! A [`DocumentOperation`] describes one pending action against the search
//! backend. Operations are immutable once created and carry their own target
//! index, so a buffered operation is unaffected by later target changes on
//! the client that enqueued it.

use std::fmt;

use serde_json::Value;

/// The kind of a document operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Add or replace a document.
    Index,
    /// Remove a document.
    Delete,
}

impl OperationKind {
    /// The action name used on the wire for this kind.
    pub fn action_name(&self) -> &'static str {
        match self {
            OperationKind::Index => "index",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_name())
    }
}

/// One pending action against the search backend.
///
/// The variant shape enforces the pairing between action and payload: an
/// `Index` operation always carries a document body, a `Delete` operation
/// never does.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOperation {
    /// Add or replace the document with the given id in the given index.
    Index {
        /// Target index name.
        index: String,
        /// Document id within the index.
        id: String,
        /// The document payload.
        document: Value,
    },
    /// Remove the document with the given id from the given index.
    Delete {
        /// Target index name.
        index: String,
        /// Document id within the index.
        id: String,
    },
}

impl DocumentOperation {
    /// Create an index operation.
    pub fn index(index: impl Into<String>, id: impl Into<String>, document: Value) -> Self {
        Self::Index {
            index: index.into(),
            id: id.into(),
            document,
        }
    }

    /// Create a delete operation.
    pub fn delete(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Delete {
            index: index.into(),
            id: id.into(),
        }
    }

    /// The kind of this operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Index { .. } => OperationKind::Index,
            Self::Delete { .. } => OperationKind::Delete,
        }
    }

    /// The target index name.
    pub fn index_name(&self) -> &str {
        match self {
            Self::Index { index, .. } | Self::Delete { index, .. } => index,
        }
    }

    /// The document id.
    pub fn doc_id(&self) -> &str {
        match self {
            Self::Index { id, .. } | Self::Delete { id, .. } => id,
        }
    }

    /// The document payload, if this operation carries one.
    pub fn document(&self) -> Option<&Value> {
        match self {
            Self::Index { document, .. } => Some(document),
            Self::Delete { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_operation_accessors() {
        let op = DocumentOperation::index("articles", "1", json!({"title": "One cool document"}));

        assert_eq!(op.kind(), OperationKind::Index);
        assert_eq!(op.index_name(), "articles");
        assert_eq!(op.doc_id(), "1");
        assert_eq!(op.document().unwrap()["title"], "One cool document");
    }

    #[test]
    fn test_delete_operation_has_no_document() {
        let op = DocumentOperation::delete("articles", "2");

        assert_eq!(op.kind(), OperationKind::Delete);
        assert_eq!(op.doc_id(), "2");
        assert!(op.document().is_none());
    }

    #[test]
    fn test_action_names() {
        assert_eq!(OperationKind::Index.action_name(), "index");
        assert_eq!(OperationKind::Delete.action_name(), "delete");
        assert_eq!(OperationKind::Delete.to_string(), "delete");
    }
}
