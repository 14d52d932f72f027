use async_trait::async_trait;
use futures::stream::BoxStream;
use synckit::StoreError;

use crate::contract::model::{Favorite, MoviePreview, RemoteKey};

/// Port for the movies bounded context: the persistence contract both the
/// local cache and the remote store of record must satisfy, byte for byte.
///
/// Every operation is scoped to the caller's identity, which implementations
/// resolve on each call. Batch operations are all-or-nothing; partial
/// application must never be observable, including under cancellation.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait MoviesRepository: Send + Sync {
    /// Upsert a batch of movies with merge semantics: `Some` fields of the
    /// incoming write win, `None` fields preserve the stored value. The
    /// incoming `page` always wins (a re-fetch re-tags the row).
    async fn insert_movies(&self, movies: Vec<MoviePreview>) -> Result<(), StoreError>;

    /// All cached movies whose stored page equals `page`. An empty result
    /// means "end of pages", not an error.
    async fn get_movies(&self, page: i32) -> Result<Vec<MoviePreview>, StoreError>;

    /// Delete every movie in the current scope, atomically.
    async fn clear_movies(&self) -> Result<(), StoreError>;

    /// Append paging cursor records; batch-atomic.
    async fn insert_remote_keys(&self, keys: Vec<RemoteKey>) -> Result<(), StoreError>;

    /// The cursor for one movie, if present.
    async fn get_remote_key(&self, movie_id: i64) -> Result<Option<RemoteKey>, StoreError>;

    /// Delete every cursor record in the current scope, atomically.
    ///
    /// Callers performing a full cache reset must invoke this together with
    /// [`clear_movies`](Self::clear_movies); the contract does not couple
    /// them automatically.
    async fn clear_remote_keys(&self) -> Result<(), StoreError>;

    /// Push-driven favorites set: emits the complete current set on
    /// subscription and again after every change. Infinite; dropping the
    /// stream releases the underlying listener. A new subscription starts
    /// from the current snapshot.
    fn favorites_stream(&self) -> BoxStream<'static, Vec<Favorite>>;

    /// Idempotent upsert; favoriting an already-favorited id is a no-op
    /// success.
    async fn add_favorite(&self, movie_id: i64) -> Result<(), StoreError>;

    /// Idempotent delete; removing an absent id is a no-op success.
    async fn remove_favorite(&self, movie_id: i64) -> Result<(), StoreError>;
}
