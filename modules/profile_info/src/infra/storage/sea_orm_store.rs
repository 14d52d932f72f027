//! SeaORM-backed implementation of the profile store port.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use tracing::error;

use synckit::{Scope, StoreError};

use crate::domain::ports::{ProfileStore, StoredProfile};
use crate::infra::storage::entity;

pub struct SeaOrmProfileStore {
    conn: DatabaseConnection,
}

impl SeaOrmProfileStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

fn map_db_err(operation: &str, scope: &Scope, err: DbErr) -> StoreError {
    error!(operation, scope = %scope, error = %err, "profile store operation failed");
    StoreError::backend(err.to_string())
}

impl From<entity::Model> for StoredProfile {
    fn from(m: entity::Model) -> Self {
        Self {
            nickname: m.nickname,
            avatar_url: m.avatar_url,
        }
    }
}

#[async_trait]
impl ProfileStore for SeaOrmProfileStore {
    async fn load(&self, scope: &Scope) -> Result<Option<StoredProfile>, StoreError> {
        let found = entity::Entity::find_by_id(scope.as_str().to_string())
            .one(&self.conn)
            .await
            .map_err(|e| map_db_err("load", scope, e))?;
        Ok(found.map(Into::into))
    }

    async fn set_nickname(&self, scope: &Scope, nickname: &str) -> Result<(), StoreError> {
        let existing = entity::Entity::find_by_id(scope.as_str().to_string())
            .one(&self.conn)
            .await
            .map_err(|e| map_db_err("set_nickname", scope, e))?;

        match existing {
            Some(stored) => {
                let mut model: entity::ActiveModel = stored.into();
                model.nickname = Set(Some(nickname.to_owned()));
                model
                    .update(&self.conn)
                    .await
                    .map_err(|e| map_db_err("set_nickname", scope, e))?;
            }
            None => {
                let fresh = entity::ActiveModel {
                    scope: Set(scope.as_str().to_string()),
                    nickname: Set(Some(nickname.to_owned())),
                    avatar_url: Set(None),
                };
                fresh
                    .insert(&self.conn)
                    .await
                    .map_err(|e| map_db_err("set_nickname", scope, e))?;
            }
        }
        Ok(())
    }
}
