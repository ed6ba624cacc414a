//! Create `owner` table.
//!
//! Owners are keyed by a string id; email is unique across the registry.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owner::Table)
                    .if_not_exists()
                    .col(string_len(Owner::Id, 64).primary_key())
                    .col(string_len(Owner::Name, 255))
                    .col(string_len(Owner::Email, 255).unique_key())
                    .col(string_len_null(Owner::Phone, 64))
                    .col(text_null(Owner::Address))
                    .col(timestamp_with_time_zone(Owner::CreatedAt))
                    .col(timestamp_with_time_zone(Owner::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Owner::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Owner { Table, Id, Name, Email, Phone, Address, CreatedAt, UpdatedAt }
