use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240315_000001_create_catalog_tables::Migration)]
    }
}

mod m20240315_000001_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Movies::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Movies::Scope).string().not_null())
                        .col(ColumnDef::new(Movies::Id).big_integer().not_null())
                        .col(ColumnDef::new(Movies::Title).string().not_null())
                        .col(ColumnDef::new(Movies::PosterUrl).string())
                        .col(ColumnDef::new(Movies::Rating).double())
                        .col(ColumnDef::new(Movies::Page).integer().not_null())
                        .primary_key(
                            Index::create().col(Movies::Scope).col(Movies::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .table(Movies::Table)
                        .name("idx_movies_scope_page")
                        .col(Movies::Scope)
                        .col(Movies::Page)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RemoteKeys::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(RemoteKeys::Scope).string().not_null())
                        .col(ColumnDef::new(RemoteKeys::MovieId).big_integer().not_null())
                        .col(ColumnDef::new(RemoteKeys::Page).integer().not_null())
                        .primary_key(
                            Index::create()
                                .col(RemoteKeys::Scope)
                                .col(RemoteKeys::MovieId),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Favorites::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Favorites::Scope).string().not_null())
                        .col(ColumnDef::new(Favorites::MovieId).big_integer().not_null())
                        .primary_key(
                            Index::create()
                                .col(Favorites::Scope)
                                .col(Favorites::MovieId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Favorites::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(RemoteKeys::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Movies::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Movies {
        Table,
        Scope,
        Id,
        Title,
        PosterUrl,
        Rating,
        Page,
    }

    #[derive(DeriveIden)]
    enum RemoteKeys {
        Table,
        Scope,
        MovieId,
        Page,
    }

    #[derive(DeriveIden)]
    enum Favorites {
        Table,
        Scope,
        MovieId,
    }
}
