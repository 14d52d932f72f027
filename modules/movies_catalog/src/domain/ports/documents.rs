use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;
use synckit::{Scope, StoreError};

/// One document in a scoped collection: an opaque id plus JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// A single write inside an atomic batch.
#[derive(Debug, Clone)]
pub enum BatchWrite {
    /// Merge-set a document. `doc_id: None` lets the store pick an id.
    SetMerge {
        collection: String,
        doc_id: Option<String>,
        data: Value,
    },
    Delete {
        collection: String,
        doc_id: String,
    },
}

impl BatchWrite {
    pub fn set_merge(
        collection: impl Into<String>,
        doc_id: Option<String>,
        data: Value,
    ) -> Self {
        Self::SetMerge {
            collection: collection.into(),
            doc_id,
            data,
        }
    }

    pub fn delete(collection: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self::Delete {
            collection: collection.into(),
            doc_id: doc_id.into(),
        }
    }
}

/// Port for the remote network store collaborator: per-scope document
/// collections with merge upserts, atomic batched writes, equality-filtered
/// queries and a change-notification stream per collection.
///
/// The SDK behind this port is an external collaborator; the repository
/// layer is a thin mapping onto these primitives.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Merge-set a single document: incoming fields overwrite, fields absent
    /// from `data` are preserved.
    async fn set_merge(
        &self,
        scope: &Scope,
        collection: &str,
        doc_id: &str,
        data: Value,
    ) -> Result<(), StoreError>;

    /// Apply a batch of writes atomically: either all writes become visible
    /// or none do.
    async fn commit(&self, scope: &Scope, writes: Vec<BatchWrite>) -> Result<(), StoreError>;

    /// All documents in the collection whose `field` equals `value`.
    async fn query_eq(
        &self,
        scope: &Scope,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Every document in the collection.
    async fn list(&self, scope: &Scope, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Delete a single document; deleting an absent document succeeds.
    async fn delete(&self, scope: &Scope, collection: &str, doc_id: &str)
        -> Result<(), StoreError>;

    /// Change-notification stream for a collection: emits the full document
    /// set on subscription and after every change. Dropping the stream
    /// releases the listener.
    fn watch(&self, scope: &Scope, collection: &str) -> BoxStream<'static, Vec<Document>>;
}
