//! Create `recipe` table. Ids may be chosen by the caller (seeded slugs).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(string_len(Recipe::Id, 128).primary_key())
                    .col(string_len(Recipe::Name, 255))
                    .col(text_null(Recipe::Description))
                    .col(timestamp_with_time_zone(Recipe::CreatedAt))
                    .col(timestamp_with_time_zone(Recipe::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Recipe::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Recipe { Table, Id, Name, Description, CreatedAt, UpdatedAt }
