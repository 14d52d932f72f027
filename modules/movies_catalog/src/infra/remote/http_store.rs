//! HTTP client implementation of the document-store port, for deployments
//! where the remote store is reachable over a document-collection REST API.
//!
//! Endpoints: `GET /{scope}/{collection}` (list/query), `PATCH
//! /{scope}/{collection}/{id}` (merge-set), `POST /{scope}/batch` (atomic
//! batch), `DELETE /{scope}/{collection}/{id}`. The change-notification
//! stream is a polling loop that emits only when the observed document set
//! changes.

use std::time::Duration;

use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;
use url::Url;

use synckit::{Scope, StoreError};

use crate::domain::ports::{BatchWrite, Document, DocumentStore};

#[derive(Clone)]
pub struct HttpDocumentStore {
    client: reqwest::Client,
    base: Url,
    poll_interval: Duration,
}

#[derive(Deserialize)]
struct DocumentDto {
    id: String,
    data: Value,
}

impl HttpDocumentStore {
    pub fn new(client: reqwest::Client, base: Url, poll_interval: Duration) -> Self {
        Self {
            client,
            base,
            poll_interval,
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::backend("remote base URL cannot be a base"))?
            .extend(segments);
        Ok(url)
    }

    fn check_status(response: Response) -> Result<Response, StoreError> {
        map_status(response.status())?;
        Ok(response)
    }

    async fn fetch_documents(&self, url: Url) -> Result<Vec<Document>, StoreError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StoreError::connectivity(e.to_string()))?;
        let response = Self::check_status(response)?;
        let docs: Vec<DocumentDto> = response
            .json()
            .await
            .map_err(|e| StoreError::serialization(e.to_string()))?;
        Ok(docs
            .into_iter()
            .map(|dto| Document::new(dto.id, dto.data))
            .collect())
    }
}

fn map_status(status: StatusCode) -> Result<(), StoreError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(StoreError::permission_denied(format!("HTTP {status}")));
    }
    if !status.is_success() {
        return Err(StoreError::backend(format!("HTTP {status}")));
    }
    Ok(())
}

fn write_to_json(write: BatchWrite) -> Value {
    match write {
        BatchWrite::SetMerge {
            collection,
            doc_id,
            data,
        } => json!({
            "op": "set_merge",
            "collection": collection,
            "doc_id": doc_id,
            "data": data,
        }),
        BatchWrite::Delete { collection, doc_id } => json!({
            "op": "delete",
            "collection": collection,
            "doc_id": doc_id,
        }),
    }
}

#[async_trait::async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn set_merge(
        &self,
        scope: &Scope,
        collection: &str,
        doc_id: &str,
        data: Value,
    ) -> Result<(), StoreError> {
        let url = self.url(&[scope.as_str(), collection, doc_id])?;
        let response = self
            .client
            .patch(url)
            .json(&data)
            .send()
            .await
            .map_err(|e| StoreError::connectivity(e.to_string()))?;
        Self::check_status(response)?;
        Ok(())
    }

    async fn commit(&self, scope: &Scope, writes: Vec<BatchWrite>) -> Result<(), StoreError> {
        let url = self.url(&[scope.as_str(), "batch"])?;
        let body = json!({
            "writes": writes.into_iter().map(write_to_json).collect::<Vec<_>>(),
        });
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::connectivity(e.to_string()))?;
        Self::check_status(response)?;
        Ok(())
    }

    async fn query_eq(
        &self,
        scope: &Scope,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Document>, StoreError> {
        let mut url = self.url(&[scope.as_str(), collection])?;
        url.query_pairs_mut()
            .append_pair("field", field)
            .append_pair("value", &value.to_string());
        self.fetch_documents(url).await
    }

    async fn list(&self, scope: &Scope, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = self.url(&[scope.as_str(), collection])?;
        self.fetch_documents(url).await
    }

    async fn delete(
        &self,
        scope: &Scope,
        collection: &str,
        doc_id: &str,
    ) -> Result<(), StoreError> {
        let url = self.url(&[scope.as_str(), collection, doc_id])?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| StoreError::connectivity(e.to_string()))?;
        // Deleting an absent document is a no-op success by contract.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check_status(response)?;
        Ok(())
    }

    fn watch(&self, scope: &Scope, collection: &str) -> BoxStream<'static, Vec<Document>> {
        let this = self.clone();
        let scope = scope.clone();
        let collection = collection.to_string();
        let interval = tokio::time::interval(self.poll_interval);

        futures::stream::unfold(
            (this, scope, collection, None::<Vec<Document>>, interval),
            |(this, scope, collection, last, mut interval)| async move {
                let mut last = last;
                loop {
                    interval.tick().await;
                    match this.list(&scope, &collection).await {
                        Ok(docs) => {
                            if last.as_ref() != Some(&docs) {
                                last = Some(docs.clone());
                                return Some((docs, (this, scope, collection, last, interval)));
                            }
                        }
                        Err(err) => {
                            warn!(collection = %collection, error = %err, "document poll failed");
                        }
                    }
                }
            },
        )
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_scoped_collection_urls() {
        let store = HttpDocumentStore::new(
            reqwest::Client::new(),
            Url::parse("http://docs.local/api").unwrap(),
            Duration::from_millis(100),
        );
        let url = store.url(&["user-1", "movies", "42"]).unwrap();
        assert_eq!(url.as_str(), "http://docs.local/api/user-1/movies/42");
    }

    #[test]
    fn batch_writes_serialize_with_op_tags() {
        let set = write_to_json(BatchWrite::set_merge(
            "movies",
            Some("1".into()),
            json!({ "id": 1 }),
        ));
        assert_eq!(set["op"], "set_merge");
        assert_eq!(set["doc_id"], "1");

        let del = write_to_json(BatchWrite::delete("favorites", "9"));
        assert_eq!(del["op"], "delete");
        assert_eq!(del["collection"], "favorites");
    }

    #[test]
    fn status_codes_map_to_the_error_taxonomy() {
        assert!(map_status(StatusCode::OK).is_ok());
        assert!(map_status(StatusCode::NO_CONTENT).is_ok());
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED),
            Err(StoreError::PermissionDenied { .. })
        ));
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN),
            Err(StoreError::PermissionDenied { .. })
        ));
        assert!(matches!(
            map_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(StoreError::Backend { .. })
        ));
    }
}
