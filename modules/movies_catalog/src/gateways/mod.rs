pub mod write_through;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use synckit::IdentityProvider;

use crate::config::{BackendKind, MoviesConfig};
use crate::domain::ports::DocumentStore;
use crate::domain::repo::MoviesRepository;
use crate::infra::remote::document_repo::DocumentMoviesRepository;
use crate::infra::storage::sea_orm_repo::SeaOrmMoviesRepository;
use write_through::WriteThroughRepository;

/// Wire a repository for the configured backend. Selection is explicit and
/// happens exactly once; callers hold the result behind the contract trait
/// and never learn which backend serves them.
pub fn build_repository(
    config: &MoviesConfig,
    conn: DatabaseConnection,
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
) -> Arc<dyn MoviesRepository> {
    info!(backend = ?config.backend, "building movies repository");
    match config.backend {
        BackendKind::Local => Arc::new(SeaOrmMoviesRepository::new(conn, identity)),
        BackendKind::Remote => Arc::new(DocumentMoviesRepository::new(store, identity)),
        BackendKind::WriteThrough => {
            let remote = Arc::new(DocumentMoviesRepository::new(store, identity.clone()));
            let local = Arc::new(SeaOrmMoviesRepository::new(conn, identity));
            Arc::new(WriteThroughRepository::new(remote, local))
        }
    }
}
