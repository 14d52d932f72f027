use std::sync::Arc;

use anyhow::Result;
use futures::StreamExt;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tokio::time::{timeout, Duration};

use movies_catalog::domain::repo::MoviesRepository;
use movies_catalog::infra::storage::migrations::Migrator;
use movies_catalog::infra::storage::sea_orm_repo::SeaOrmMoviesRepository;
use movies_catalog::model::{Favorite, MoviePreview, RemoteKey};
use synckit::StaticIdentity;

/// Create a fresh test database for each test
async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

fn repo_for(db: &DatabaseConnection, identity: StaticIdentity) -> SeaOrmMoviesRepository {
    SeaOrmMoviesRepository::new(db.clone(), Arc::new(identity))
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

#[tokio::test]
async fn merge_upsert_unions_non_absent_fields() -> Result<()> {
    let db = create_test_db().await;
    let repo = repo_for(&db, StaticIdentity::user("u1"));

    repo.insert_movies(vec![MoviePreview {
        id: 1,
        title: "Solaris".to_string(),
        poster_url: Some("http://img/1.png".to_string()),
        rating: None,
        page: 0,
    }])
    .await?;

    // Second write carries a rating but no poster; the poster must survive.
    repo.insert_movies(vec![MoviePreview {
        id: 1,
        title: "Solaris".to_string(),
        poster_url: None,
        rating: Some(8.2),
        page: 0,
    }])
    .await?;

    let stored = repo.get_movies(0).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].poster_url.as_deref(), Some("http://img/1.png"));
    assert_eq!(stored[0].rating, Some(8.2));

    Ok(())
}

#[tokio::test]
async fn pages_return_disjoint_id_sets() -> Result<()> {
    let db = create_test_db().await;
    let repo = repo_for(&db, StaticIdentity::user("u1"));

    repo.insert_movies(vec![movie(1, 0), movie(2, 0), movie(3, 1), movie(4, 1)])
        .await?;

    let page0: Vec<i64> = repo.get_movies(0).await?.iter().map(|m| m.id).collect();
    let page1: Vec<i64> = repo.get_movies(1).await?.iter().map(|m| m.id).collect();

    assert_eq!(page0, vec![1, 2]);
    assert_eq!(page1, vec![3, 4]);
    assert!(page0.iter().all(|id| !page1.contains(id)));

    Ok(())
}

#[tokio::test]
async fn empty_page_means_end_of_pages_not_error() -> Result<()> {
    let db = create_test_db().await;
    let repo = repo_for(&db, StaticIdentity::user("u1"));

    repo.insert_movies(vec![movie(1, 0)]).await?;
    assert!(repo.get_movies(7).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn clear_movies_empties_every_page() -> Result<()> {
    let db = create_test_db().await;
    let repo = repo_for(&db, StaticIdentity::user("u1"));

    repo.insert_movies(vec![movie(1, 0), movie(2, 1), movie(3, 2)])
        .await?;
    repo.clear_movies().await?;

    for page in 0..3 {
        assert!(repo.get_movies(page).await?.is_empty());
    }

    Ok(())
}

#[tokio::test]
async fn remote_keys_upsert_and_lookup() -> Result<()> {
    let db = create_test_db().await;
    let repo = repo_for(&db, StaticIdentity::user("u1"));

    repo.insert_remote_keys(vec![
        RemoteKey {
            movie_id: 1,
            page: 0,
        },
        RemoteKey {
            movie_id: 2,
            page: 0,
        },
    ])
    .await?;

    assert_eq!(
        repo.get_remote_key(1).await?,
        Some(RemoteKey {
            movie_id: 1,
            page: 0,
        })
    );
    assert_eq!(repo.get_remote_key(99).await?, None);

    // Re-inserting a key for the same movie re-tags its page.
    repo.insert_remote_keys(vec![RemoteKey {
        movie_id: 1,
        page: 3,
    }])
    .await?;
    assert_eq!(
        repo.get_remote_key(1).await?.map(|k| k.page),
        Some(3)
    );

    Ok(())
}

#[tokio::test]
async fn favorite_add_remove_add_is_idempotent() -> Result<()> {
    let db = create_test_db().await;
    let repo = repo_for(&db, StaticIdentity::user("u1"));

    repo.add_favorite(5).await?;
    repo.add_favorite(5).await?;
    repo.remove_favorite(5).await?;
    repo.remove_favorite(5).await?;
    repo.add_favorite(5).await?;

    let mut stream = repo.favorites_stream();
    let snapshot = timeout(Duration::from_millis(500), stream.next())
        .await?
        .expect("stream must emit the current snapshot");
    assert_eq!(snapshot, vec![Favorite::new(5)]);

    Ok(())
}

#[tokio::test]
async fn favorites_stream_emits_once_per_mutation() -> Result<()> {
    let db = create_test_db().await;
    let repo = repo_for(&db, StaticIdentity::user("u1"));

    let mut stream = repo.favorites_stream();
    let initial = timeout(Duration::from_millis(500), stream.next())
        .await?
        .expect("initial snapshot");
    assert!(initial.is_empty());

    repo.add_favorite(1).await?;
    let updated = timeout(Duration::from_millis(500), stream.next())
        .await?
        .expect("snapshot after mutation");
    assert_eq!(updated, vec![Favorite::new(1)]);

    // No further mutation: the stream stays pending.
    assert!(timeout(Duration::from_millis(100), stream.next())
        .await
        .is_err());

    Ok(())
}

#[tokio::test]
async fn guest_scope_is_stable_across_calls() -> Result<()> {
    let db = create_test_db().await;
    let writer = repo_for(&db, StaticIdentity::anonymous());
    let reader = repo_for(&db, StaticIdentity::anonymous());

    writer.insert_movies(vec![movie(1, 0)]).await?;
    let seen = reader.get_movies(0).await?;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, 1);

    Ok(())
}

#[tokio::test]
async fn scopes_partition_all_entities() -> Result<()> {
    let db = create_test_db().await;
    let alice = repo_for(&db, StaticIdentity::user("alice"));
    let bob = repo_for(&db, StaticIdentity::user("bob"));

    alice.insert_movies(vec![movie(1, 0)]).await?;
    alice.add_favorite(1).await?;

    assert!(bob.get_movies(0).await?.is_empty());
    let mut bob_stream = bob.favorites_stream();
    let bob_favorites = timeout(Duration::from_millis(500), bob_stream.next())
        .await?
        .expect("snapshot");
    assert!(bob_favorites.is_empty());

    Ok(())
}

#[tokio::test]
async fn paged_fill_then_full_reset() -> Result<()> {
    let db = create_test_db().await;
    let repo = repo_for(&db, StaticIdentity::user("u1"));

    repo.insert_movies(vec![movie(1, 0), movie(2, 0)]).await?;
    repo.insert_remote_keys(vec![
        RemoteKey {
            movie_id: 1,
            page: 0,
        },
        RemoteKey {
            movie_id: 2,
            page: 0,
        },
    ])
    .await?;

    let page0 = repo.get_movies(0).await?;
    assert_eq!(page0.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);

    // Full reset clears items and cursors together.
    repo.clear_movies().await?;
    repo.clear_remote_keys().await?;

    assert!(repo.get_movies(0).await?.is_empty());
    assert_eq!(repo.get_remote_key(1).await?, None);

    Ok(())
}
