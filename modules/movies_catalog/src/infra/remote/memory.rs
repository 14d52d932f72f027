//! In-memory document store: the test/dev substitute for the remote SDK.
//!
//! A single lock over the whole tree keeps batches atomic with respect to
//! every reader; change signals fire only after the lock is released.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use parking_lot::Mutex;
use serde_json::Value;

use synckit::{notify, ChangeNotifier, Scope, StoreError};

use crate::domain::ports::{BatchWrite, Document, DocumentStore};

/// `(scope, collection)` addressing, matching the port's namespace model.
type CollectionKey = (String, String);

#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<BTreeMap<CollectionKey, BTreeMap<String, Value>>>>,
    changed: Arc<ChangeNotifier<CollectionKey>>,
    next_id: AtomicU64,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(scope: &Scope, collection: &str) -> CollectionKey {
        (scope.as_str().to_string(), collection.to_string())
    }

    fn generate_id(&self) -> String {
        format!("doc-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

/// Field-level merge: incoming object fields overwrite, stored fields absent
/// from the incoming object survive. Non-object payloads replace outright.
fn merge_into(stored: &mut Value, incoming: Value) {
    match (stored.as_object_mut(), incoming) {
        (Some(stored_map), Value::Object(incoming_map)) => {
            for (field, value) in incoming_map {
                stored_map.insert(field, value);
            }
        }
        (_, incoming) => *stored = incoming,
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn set_merge(
        &self,
        scope: &Scope,
        collection: &str,
        doc_id: &str,
        data: Value,
    ) -> Result<(), StoreError> {
        let key = Self::key(scope, collection);
        {
            let mut collections = self.collections.lock();
            let docs = collections.entry(key.clone()).or_default();
            match docs.get_mut(doc_id) {
                Some(stored) => merge_into(stored, data),
                None => {
                    docs.insert(doc_id.to_string(), data);
                }
            }
        }
        self.changed.notify(&key);
        Ok(())
    }

    async fn commit(&self, scope: &Scope, writes: Vec<BatchWrite>) -> Result<(), StoreError> {
        let mut touched = Vec::new();
        {
            let mut collections = self.collections.lock();
            for write in writes {
                match write {
                    BatchWrite::SetMerge {
                        collection,
                        doc_id,
                        data,
                    } => {
                        let key = Self::key(scope, &collection);
                        let docs = collections.entry(key.clone()).or_default();
                        let doc_id = doc_id.unwrap_or_else(|| self.generate_id());
                        match docs.get_mut(&doc_id) {
                            Some(stored) => merge_into(stored, data),
                            None => {
                                docs.insert(doc_id, data);
                            }
                        }
                        touched.push(key);
                    }
                    BatchWrite::Delete { collection, doc_id } => {
                        let key = Self::key(scope, &collection);
                        if let Some(docs) = collections.get_mut(&key) {
                            docs.remove(&doc_id);
                        }
                        touched.push(key);
                    }
                }
            }
        }
        touched.sort();
        touched.dedup();
        for key in touched {
            self.changed.notify(&key);
        }
        Ok(())
    }

    async fn query_eq(
        &self,
        scope: &Scope,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Document>, StoreError> {
        let key = Self::key(scope, collection);
        let collections = self.collections.lock();
        let docs = collections
            .get(&key)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, data)| data.get(field) == Some(&value))
                    .map(|(id, data)| Document::new(id.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn list(&self, scope: &Scope, collection: &str) -> Result<Vec<Document>, StoreError> {
        let key = Self::key(scope, collection);
        let collections = self.collections.lock();
        let docs = collections
            .get(&key)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| Document::new(id.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn delete(
        &self,
        scope: &Scope,
        collection: &str,
        doc_id: &str,
    ) -> Result<(), StoreError> {
        let key = Self::key(scope, collection);
        let removed = {
            let mut collections = self.collections.lock();
            collections
                .get_mut(&key)
                .map(|docs| docs.remove(doc_id).is_some())
                .unwrap_or(false)
        };
        if removed {
            self.changed.notify(&key);
        }
        Ok(())
    }

    fn watch(&self, scope: &Scope, collection: &str) -> BoxStream<'static, Vec<Document>> {
        let key = Self::key(scope, collection);
        let rx = self.changed.subscribe(&key);
        let collections = self.collections.clone();
        notify::snapshot_stream(rx, move || {
            let collections = collections.clone();
            let key = key.clone();
            async move {
                let collections = collections.lock();
                let docs = collections
                    .get(&key)
                    .map(|docs| {
                        docs.iter()
                            .map(|(id, data)| Document::new(id.clone(), data.clone()))
                            .collect()
                    })
                    .unwrap_or_default();
                Some(docs)
            }
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use synckit::Scope;

    fn scope() -> Scope {
        Scope::from("user-1")
    }

    #[tokio::test]
    async fn set_merge_preserves_absent_fields() {
        let store = InMemoryDocumentStore::new();
        let s = scope();
        store
            .set_merge(&s, "movies", "1", json!({ "id": 1, "title": "A", "rating": 7.5 }))
            .await
            .unwrap();
        store
            .set_merge(&s, "movies", "1", json!({ "id": 1, "title": "A", "page": 2 }))
            .await
            .unwrap();

        let docs = store.list(&s, "movies").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].data["rating"], json!(7.5));
        assert_eq!(docs[0].data["page"], json!(2));
    }

    #[tokio::test]
    async fn commit_applies_every_write() {
        let store = InMemoryDocumentStore::new();
        let s = scope();
        store
            .commit(
                &s,
                vec![
                    BatchWrite::set_merge("movies", Some("1".into()), json!({ "id": 1 })),
                    BatchWrite::set_merge("movies", Some("2".into()), json!({ "id": 2 })),
                    BatchWrite::set_merge("remote_keys", None, json!({ "movie_id": 1 })),
                ],
            )
            .await
            .unwrap();

        assert_eq!(store.list(&s, "movies").await.unwrap().len(), 2);
        assert_eq!(store.list(&s, "remote_keys").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn scopes_are_isolated() {
        let store = InMemoryDocumentStore::new();
        store
            .set_merge(&Scope::from("a"), "movies", "1", json!({ "id": 1 }))
            .await
            .unwrap();

        assert!(store
            .list(&Scope::from("b"), "movies")
            .await
            .unwrap()
            .is_empty());
    }
}
