//! Create `operator` table for registry staff accounts.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Operator::Table)
                    .if_not_exists()
                    .col(string_len(Operator::Id, 64).primary_key())
                    .col(string_len(Operator::Name, 255))
                    .col(string_len(Operator::Email, 255).unique_key())
                    .col(string_len_null(Operator::Phone, 64))
                    .col(string_len(Operator::Identification, 64).unique_key())
                    .col(timestamp_with_time_zone(Operator::CreatedAt))
                    .col(timestamp_with_time_zone(Operator::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Operator::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Operator { Table, Id, Name, Email, Phone, Identification, CreatedAt, UpdatedAt }
