//! Create `recommendations` table.
//!
//! `name` carries the unique constraint that backs duplicate detection;
//! `score` starts at zero and is only moved by votes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recommendations::Table)
                    .if_not_exists()
                    .col(pk_auto(Recommendations::Id))
                    .col(string_len(Recommendations::Name, 256).unique_key().not_null())
                    .col(string_len(Recommendations::YoutubeLink, 512).not_null())
                    .col(integer(Recommendations::Score).not_null().default(0))
                    .to_owned(),
            )
            .await?;

        // Top-N reads order by score
        manager
            .create_index(
                Index::create()
                    .name("idx_recommendations_score")
                    .table(Recommendations::Table)
                    .col(Recommendations::Score)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Recommendations::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Recommendations { Table, Id, Name, YoutubeLink, Score }
