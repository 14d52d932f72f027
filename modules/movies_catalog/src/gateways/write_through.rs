//! Composite repository combining both backends: mutations hit the remote
//! store of record first and are mirrored into the local cache; reads are
//! served from the cache.
//!
//! The first failure is surfaced unchanged. A write that succeeds remotely
//! but fails to mirror locally is reported as that local failure; no
//! reconciliation is attempted here.

use std::sync::Arc;

use futures::stream::BoxStream;
use synckit::StoreError;

use crate::contract::model::{Favorite, MoviePreview, RemoteKey};
use crate::domain::repo::MoviesRepository;

pub struct WriteThroughRepository {
    remote: Arc<dyn MoviesRepository>,
    local: Arc<dyn MoviesRepository>,
}

impl WriteThroughRepository {
    pub fn new(remote: Arc<dyn MoviesRepository>, local: Arc<dyn MoviesRepository>) -> Self {
        Self { remote, local }
    }
}

#[async_trait::async_trait]
impl MoviesRepository for WriteThroughRepository {
    async fn insert_movies(&self, movies: Vec<MoviePreview>) -> Result<(), StoreError> {
        self.remote.insert_movies(movies.clone()).await?;
        self.local.insert_movies(movies).await
    }

    async fn get_movies(&self, page: i32) -> Result<Vec<MoviePreview>, StoreError> {
        self.local.get_movies(page).await
    }

    async fn clear_movies(&self) -> Result<(), StoreError> {
        self.remote.clear_movies().await?;
        self.local.clear_movies().await
    }

    async fn insert_remote_keys(&self, keys: Vec<RemoteKey>) -> Result<(), StoreError> {
        self.remote.insert_remote_keys(keys.clone()).await?;
        self.local.insert_remote_keys(keys).await
    }

    async fn get_remote_key(&self, movie_id: i64) -> Result<Option<RemoteKey>, StoreError> {
        self.local.get_remote_key(movie_id).await
    }

    async fn clear_remote_keys(&self) -> Result<(), StoreError> {
        self.remote.clear_remote_keys().await?;
        self.local.clear_remote_keys().await
    }

    fn favorites_stream(&self) -> BoxStream<'static, Vec<Favorite>> {
        // The store of record drives favorites; remote changes from other
        // devices surface here without a local round trip.
        self.remote.favorites_stream()
    }

    async fn add_favorite(&self, movie_id: i64) -> Result<(), StoreError> {
        self.remote.add_favorite(movie_id).await?;
        self.local.add_favorite(movie_id).await
    }

    async fn remove_favorite(&self, movie_id: i64) -> Result<(), StoreError> {
        self.remote.remove_favorite(movie_id).await?;
        self.local.remove_favorite(movie_id).await
    }
}
