use std::sync::Arc;

use anyhow::Result;
use futures::stream::BoxStream;
use futures::StreamExt;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tokio::time::{timeout, Duration};

use movies_catalog::domain::repo::MoviesRepository;
use movies_catalog::gateways::write_through::WriteThroughRepository;
use movies_catalog::infra::remote::document_repo::DocumentMoviesRepository;
use movies_catalog::infra::remote::memory::InMemoryDocumentStore;
use movies_catalog::infra::storage::migrations::Migrator;
use movies_catalog::infra::storage::sea_orm_repo::SeaOrmMoviesRepository;
use movies_catalog::model::{Favorite, MoviePreview, RemoteKey};
use synckit::{StaticIdentity, StoreError};

async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

struct Fixture {
    combined: WriteThroughRepository,
    remote: Arc<DocumentMoviesRepository>,
    local: Arc<SeaOrmMoviesRepository>,
}

async fn fixture() -> Fixture {
    let identity = Arc::new(StaticIdentity::user("u1"));
    let store = Arc::new(InMemoryDocumentStore::new());
    let db = create_test_db().await;

    let remote = Arc::new(DocumentMoviesRepository::new(store, identity.clone()));
    let local = Arc::new(SeaOrmMoviesRepository::new(db, identity));
    let combined = WriteThroughRepository::new(remote.clone(), local.clone());
    Fixture {
        combined,
        remote,
        local,
    }
}

fn movie(id: i64, page: i32) -> MoviePreview {
    MoviePreview {
        id,
        title: format!("Movie {id}"),
        poster_url: None,
        rating: None,
        page,
    }
}

/// Backend that refuses every operation; stands in for an unreachable store.
struct UnavailableRepository;

#[async_trait::async_trait]
impl MoviesRepository for UnavailableRepository {
    async fn insert_movies(&self, _movies: Vec<MoviePreview>) -> Result<(), StoreError> {
        Err(StoreError::connectivity("store unreachable"))
    }
    async fn get_movies(&self, _page: i32) -> Result<Vec<MoviePreview>, StoreError> {
        Err(StoreError::connectivity("store unreachable"))
    }
    async fn clear_movies(&self) -> Result<(), StoreError> {
        Err(StoreError::connectivity("store unreachable"))
    }
    async fn insert_remote_keys(&self, _keys: Vec<RemoteKey>) -> Result<(), StoreError> {
        Err(StoreError::connectivity("store unreachable"))
    }
    async fn get_remote_key(&self, _movie_id: i64) -> Result<Option<RemoteKey>, StoreError> {
        Err(StoreError::connectivity("store unreachable"))
    }
    async fn clear_remote_keys(&self) -> Result<(), StoreError> {
        Err(StoreError::connectivity("store unreachable"))
    }
    fn favorites_stream(&self) -> BoxStream<'static, Vec<Favorite>> {
        futures::stream::pending().boxed()
    }
    async fn add_favorite(&self, _movie_id: i64) -> Result<(), StoreError> {
        Err(StoreError::connectivity("store unreachable"))
    }
    async fn remove_favorite(&self, _movie_id: i64) -> Result<(), StoreError> {
        Err(StoreError::connectivity("store unreachable"))
    }
}

#[tokio::test]
async fn writes_reach_remote_and_mirror_to_local() -> Result<()> {
    let f = fixture().await;

    f.combined.insert_movies(vec![movie(1, 0), movie(2, 0)]).await?;
    f.combined
        .insert_remote_keys(vec![RemoteKey {
            movie_id: 1,
            page: 0,
        }])
        .await?;

    assert_eq!(f.remote.get_movies(0).await?.len(), 2);
    assert_eq!(f.local.get_movies(0).await?.len(), 2);
    assert!(f.local.get_remote_key(1).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn reads_are_served_from_the_local_cache() -> Result<()> {
    let f = fixture().await;

    // Seed only the local side; a cache read must not consult the remote.
    f.local.insert_movies(vec![movie(7, 1)]).await?;

    let page1 = f.combined.get_movies(1).await?;
    assert_eq!(page1.len(), 1);
    assert!(f.remote.get_movies(1).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn remote_failure_surfaces_before_local_write() -> Result<()> {
    let identity = Arc::new(StaticIdentity::user("u1"));
    let db = create_test_db().await;
    let local = Arc::new(SeaOrmMoviesRepository::new(db, identity));
    let combined = WriteThroughRepository::new(Arc::new(UnavailableRepository), local.clone());

    let err = combined
        .insert_movies(vec![movie(1, 0)])
        .await
        .expect_err("remote failure must surface");
    assert!(matches!(err, StoreError::Connectivity { .. }));

    // The failed write never reached the cache.
    assert!(local.get_movies(0).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn local_mirror_failure_surfaces_after_remote_write() -> Result<()> {
    let identity = Arc::new(StaticIdentity::user("u1"));
    let store = Arc::new(InMemoryDocumentStore::new());
    let remote = Arc::new(DocumentMoviesRepository::new(store, identity));
    let combined = WriteThroughRepository::new(remote.clone(), Arc::new(UnavailableRepository));

    let err = combined
        .insert_movies(vec![movie(1, 0)])
        .await
        .expect_err("mirror failure must surface");
    assert!(matches!(err, StoreError::Connectivity { .. }));

    // The divergence is surfaced, not rolled back: the remote write stands.
    assert_eq!(remote.get_movies(0).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn favorites_stream_follows_the_store_of_record() -> Result<()> {
    let f = fixture().await;

    let mut stream = f.combined.favorites_stream();
    let initial = timeout(Duration::from_millis(500), stream.next())
        .await?
        .expect("initial snapshot");
    assert!(initial.is_empty());

    f.combined.add_favorite(4).await?;
    let updated = timeout(Duration::from_millis(500), stream.next())
        .await?
        .expect("snapshot after add");
    assert_eq!(updated, vec![Favorite::new(4)]);

    Ok(())
}
