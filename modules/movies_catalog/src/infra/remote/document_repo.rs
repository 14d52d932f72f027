//! Remote store-of-record backend: a thin mapping of the repository
//! contract onto the document-store port.
//!
//! Collections per scope: `movies`, `remote_keys` and `favorites`, all keyed
//! by the movie id so re-inserts merge into the existing document instead of
//! appending a duplicate. Clears fetch the collection and delete it in one
//! atomic batch.

use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use serde_json::json;
use tracing::{error, warn};

use synckit::{IdentityProvider, Scope, StoreError};

use crate::contract::model::{Favorite, MoviePreview, RemoteKey};
use crate::domain::ports::{BatchWrite, DocumentStore};
use crate::domain::repo::MoviesRepository;
use crate::infra::remote::mapper;

const MOVIES: &str = "movies";
const REMOTE_KEYS: &str = "remote_keys";
const FAVORITES: &str = "favorites";

pub struct DocumentMoviesRepository {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl DocumentMoviesRepository {
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    fn scope(&self) -> Scope {
        Scope::resolve(&*self.identity)
    }

    /// Fetch every document in `collection` and delete them in one atomic
    /// batch.
    async fn clear_collection(&self, collection: &str, operation: &str) -> Result<(), StoreError> {
        let scope = self.scope();
        let docs = self
            .store
            .list(&scope, collection)
            .await
            .map_err(|e| log_err(operation, &scope, e))?;
        if docs.is_empty() {
            return Ok(());
        }
        let deletes = docs
            .into_iter()
            .map(|doc| BatchWrite::delete(collection, doc.id))
            .collect();
        self.store
            .commit(&scope, deletes)
            .await
            .map_err(|e| log_err(operation, &scope, e))
    }
}

fn log_err(operation: &str, scope: &Scope, err: StoreError) -> StoreError {
    error!(operation, scope = %scope, error = %err, "remote store operation failed");
    err
}

#[async_trait::async_trait]
impl MoviesRepository for DocumentMoviesRepository {
    async fn insert_movies(&self, movies: Vec<MoviePreview>) -> Result<(), StoreError> {
        let scope = self.scope();
        let mut writes = Vec::with_capacity(movies.len());
        for movie in movies {
            let doc_id = movie.id.to_string();
            let data = mapper::encode_movie(movie)?;
            writes.push(BatchWrite::set_merge(MOVIES, Some(doc_id), data));
        }
        self.store
            .commit(&scope, writes)
            .await
            .map_err(|e| log_err("insert_movies", &scope, e))
    }

    async fn get_movies(&self, page: i32) -> Result<Vec<MoviePreview>, StoreError> {
        let scope = self.scope();
        let docs = self
            .store
            .query_eq(&scope, MOVIES, "page", json!(page))
            .await
            .map_err(|e| log_err("get_movies", &scope, e))?;
        let mut movies = Vec::with_capacity(docs.len());
        for doc in docs {
            movies.push(mapper::decode_movie(doc.data)?);
        }
        movies.sort_by_key(|m| m.id);
        Ok(movies)
    }

    async fn clear_movies(&self) -> Result<(), StoreError> {
        self.clear_collection(MOVIES, "clear_movies").await
    }

    async fn insert_remote_keys(&self, keys: Vec<RemoteKey>) -> Result<(), StoreError> {
        let scope = self.scope();
        let mut writes = Vec::with_capacity(keys.len());
        for key in keys {
            // Doc id = movie id keeps exactly one cursor per movie; a
            // re-insert merges into it and re-tags the page.
            let doc_id = key.movie_id.to_string();
            let data = mapper::encode_remote_key(key)?;
            writes.push(BatchWrite::set_merge(REMOTE_KEYS, Some(doc_id), data));
        }
        self.store
            .commit(&scope, writes)
            .await
            .map_err(|e| log_err("insert_remote_keys", &scope, e))
    }

    async fn get_remote_key(&self, movie_id: i64) -> Result<Option<RemoteKey>, StoreError> {
        let scope = self.scope();
        let docs = self
            .store
            .query_eq(&scope, REMOTE_KEYS, "movie_id", json!(movie_id))
            .await
            .map_err(|e| log_err("get_remote_key", &scope, e))?;
        match docs.into_iter().next() {
            Some(doc) => Ok(Some(mapper::decode_remote_key(doc.data)?)),
            None => Ok(None),
        }
    }

    async fn clear_remote_keys(&self) -> Result<(), StoreError> {
        self.clear_collection(REMOTE_KEYS, "clear_remote_keys").await
    }

    fn favorites_stream(&self) -> BoxStream<'static, Vec<Favorite>> {
        let scope = self.scope();
        self.store
            .watch(&scope, FAVORITES)
            .map(|docs| {
                let mut favorites: Vec<Favorite> = docs
                    .into_iter()
                    .filter_map(|doc| match mapper::decode_favorite(doc.data) {
                        Ok(favorite) => Some(favorite),
                        Err(err) => {
                            warn!(error = %err, "skipping undecodable favorite document");
                            None
                        }
                    })
                    .collect();
                favorites.sort();
                favorites
            })
            .boxed()
    }

    async fn add_favorite(&self, movie_id: i64) -> Result<(), StoreError> {
        let scope = self.scope();
        let data = mapper::encode_favorite(Favorite::new(movie_id))?;
        self.store
            .set_merge(&scope, FAVORITES, &movie_id.to_string(), data)
            .await
            .map_err(|e| log_err("add_favorite", &scope, e))
    }

    async fn remove_favorite(&self, movie_id: i64) -> Result<(), StoreError> {
        let scope = self.scope();
        self.store
            .delete(&scope, FAVORITES, &movie_id.to_string())
            .await
            .map_err(|e| log_err("remove_favorite", &scope, e))
    }
}
