pub mod entity;
pub mod migrations;
pub mod sea_orm_store;

pub use migrations::Migrator;
pub use sea_orm_store::SeaOrmProfileStore;
