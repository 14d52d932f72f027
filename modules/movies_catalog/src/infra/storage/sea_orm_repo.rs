//! SeaORM-backed implementation of the movies repository contract.
//!
//! Batch operations run inside a transaction so partial application is never
//! observable. Favorites mutations bump a per-scope change notifier after
//! commit; the favorites stream re-reads the full scoped set per signal.

use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use tracing::error;

use synckit::{notify, ChangeNotifier, IdentityProvider, Scope, StoreError};

use crate::contract::model::{Favorite, MoviePreview, RemoteKey};
use crate::domain::repo::MoviesRepository;
use crate::infra::storage::entities::{favorite, movie, remote_key};

/// Local persistent cache backend.
/// Holds a cheap cloneable connection handle; the identity collaborator is
/// re-resolved on every call so a session change takes effect immediately.
pub struct SeaOrmMoviesRepository {
    conn: DatabaseConnection,
    identity: Arc<dyn IdentityProvider>,
    favorites_changed: Arc<ChangeNotifier<Scope>>,
}

impl SeaOrmMoviesRepository {
    pub fn new(conn: DatabaseConnection, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            conn,
            identity,
            favorites_changed: Arc::new(ChangeNotifier::new()),
        }
    }

    fn scope(&self) -> Scope {
        Scope::resolve(&*self.identity)
    }
}

fn map_db_err(operation: &str, scope: &Scope, err: DbErr) -> StoreError {
    error!(operation, scope = %scope, error = %err, "local store operation failed");
    StoreError::backend(err.to_string())
}

impl From<movie::Model> for MoviePreview {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            poster_url: m.poster_url,
            rating: m.rating,
            page: m.page,
        }
    }
}

impl From<remote_key::Model> for RemoteKey {
    fn from(m: remote_key::Model) -> Self {
        Self {
            movie_id: m.movie_id,
            page: m.page,
        }
    }
}

async fn load_favorites(conn: &DatabaseConnection, scope: &Scope) -> Result<Vec<Favorite>, DbErr> {
    let rows = favorite::Entity::find()
        .filter(favorite::Column::Scope.eq(scope.as_str()))
        .order_by_asc(favorite::Column::MovieId)
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| Favorite::new(row.movie_id))
        .collect())
}

#[async_trait::async_trait]
impl MoviesRepository for SeaOrmMoviesRepository {
    async fn insert_movies(&self, movies: Vec<MoviePreview>) -> Result<(), StoreError> {
        let scope = self.scope();
        let txn = self
            .conn
            .begin()
            .await
            .map_err(|e| map_db_err("insert_movies", &scope, e))?;

        for incoming in movies {
            let existing = movie::Entity::find_by_id((scope.as_str().to_string(), incoming.id))
                .one(&txn)
                .await
                .map_err(|e| map_db_err("insert_movies", &scope, e))?;

            match existing {
                Some(stored) => {
                    // Merge, don't overwrite: absent fields keep the stored
                    // value. The page tag always takes the incoming value.
                    let merged = movie::ActiveModel {
                        scope: Set(stored.scope),
                        id: Set(stored.id),
                        title: Set(incoming.title),
                        poster_url: Set(incoming.poster_url.or(stored.poster_url)),
                        rating: Set(incoming.rating.or(stored.rating)),
                        page: Set(incoming.page),
                    };
                    merged
                        .update(&txn)
                        .await
                        .map_err(|e| map_db_err("insert_movies", &scope, e))?;
                }
                None => {
                    let fresh = movie::ActiveModel {
                        scope: Set(scope.as_str().to_string()),
                        id: Set(incoming.id),
                        title: Set(incoming.title),
                        poster_url: Set(incoming.poster_url),
                        rating: Set(incoming.rating),
                        page: Set(incoming.page),
                    };
                    fresh
                        .insert(&txn)
                        .await
                        .map_err(|e| map_db_err("insert_movies", &scope, e))?;
                }
            }
        }

        txn.commit()
            .await
            .map_err(|e| map_db_err("insert_movies", &scope, e))
    }

    async fn get_movies(&self, page: i32) -> Result<Vec<MoviePreview>, StoreError> {
        let scope = self.scope();
        let rows = movie::Entity::find()
            .filter(movie::Column::Scope.eq(scope.as_str()))
            .filter(movie::Column::Page.eq(page))
            .order_by_asc(movie::Column::Id)
            .all(&self.conn)
            .await
            .map_err(|e| map_db_err("get_movies", &scope, e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn clear_movies(&self) -> Result<(), StoreError> {
        let scope = self.scope();
        movie::Entity::delete_many()
            .filter(movie::Column::Scope.eq(scope.as_str()))
            .exec(&self.conn)
            .await
            .map_err(|e| map_db_err("clear_movies", &scope, e))?;
        Ok(())
    }

    async fn insert_remote_keys(&self, keys: Vec<RemoteKey>) -> Result<(), StoreError> {
        let scope = self.scope();
        let txn = self
            .conn
            .begin()
            .await
            .map_err(|e| map_db_err("insert_remote_keys", &scope, e))?;

        for key in keys {
            let existing =
                remote_key::Entity::find_by_id((scope.as_str().to_string(), key.movie_id))
                    .one(&txn)
                    .await
                    .map_err(|e| map_db_err("insert_remote_keys", &scope, e))?;

            let model = remote_key::ActiveModel {
                scope: Set(scope.as_str().to_string()),
                movie_id: Set(key.movie_id),
                page: Set(key.page),
            };
            if existing.is_some() {
                model
                    .update(&txn)
                    .await
                    .map_err(|e| map_db_err("insert_remote_keys", &scope, e))?;
            } else {
                model
                    .insert(&txn)
                    .await
                    .map_err(|e| map_db_err("insert_remote_keys", &scope, e))?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| map_db_err("insert_remote_keys", &scope, e))
    }

    async fn get_remote_key(&self, movie_id: i64) -> Result<Option<RemoteKey>, StoreError> {
        let scope = self.scope();
        let found = remote_key::Entity::find_by_id((scope.as_str().to_string(), movie_id))
            .one(&self.conn)
            .await
            .map_err(|e| map_db_err("get_remote_key", &scope, e))?;
        Ok(found.map(Into::into))
    }

    async fn clear_remote_keys(&self) -> Result<(), StoreError> {
        let scope = self.scope();
        remote_key::Entity::delete_many()
            .filter(remote_key::Column::Scope.eq(scope.as_str()))
            .exec(&self.conn)
            .await
            .map_err(|e| map_db_err("clear_remote_keys", &scope, e))?;
        Ok(())
    }

    fn favorites_stream(&self) -> BoxStream<'static, Vec<Favorite>> {
        let scope = self.scope();
        let rx = self.favorites_changed.subscribe(&scope);
        let conn = self.conn.clone();
        notify::snapshot_stream(rx, move || {
            let conn = conn.clone();
            let scope = scope.clone();
            async move { load_favorites(&conn, &scope).await.ok() }
        })
        .boxed()
    }

    async fn add_favorite(&self, movie_id: i64) -> Result<(), StoreError> {
        let scope = self.scope();
        let existing = favorite::Entity::find_by_id((scope.as_str().to_string(), movie_id))
            .one(&self.conn)
            .await
            .map_err(|e| map_db_err("add_favorite", &scope, e))?;
        if existing.is_some() {
            return Ok(());
        }

        let row = favorite::ActiveModel {
            scope: Set(scope.as_str().to_string()),
            movie_id: Set(movie_id),
        };
        row.insert(&self.conn)
            .await
            .map_err(|e| map_db_err("add_favorite", &scope, e))?;
        self.favorites_changed.notify(&scope);
        Ok(())
    }

    async fn remove_favorite(&self, movie_id: i64) -> Result<(), StoreError> {
        let scope = self.scope();
        let result = favorite::Entity::delete_by_id((scope.as_str().to_string(), movie_id))
            .exec(&self.conn)
            .await
            .map_err(|e| map_db_err("remove_favorite", &scope, e))?;
        if result.rows_affected > 0 {
            self.favorites_changed.notify(&scope);
        }
        Ok(())
    }
}
