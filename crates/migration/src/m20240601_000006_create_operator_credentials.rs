//! Create `operator_credentials` table storing password hashes.
//! One row per operator, removed together with the operator.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OperatorCredentials::Table)
                    .if_not_exists()
                    .col(string_len(OperatorCredentials::Id, 64).primary_key())
                    .col(string_len(OperatorCredentials::OperatorId, 64).unique_key())
                    .col(string_len(OperatorCredentials::PasswordHash, 255))
                    .col(string_len(OperatorCredentials::PasswordAlgorithm, 64))
                    .col(timestamp_with_time_zone(OperatorCredentials::CreatedAt))
                    .col(timestamp_with_time_zone(OperatorCredentials::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_operator_credentials_operator")
                            .from(OperatorCredentials::Table, OperatorCredentials::OperatorId)
                            .to(Operator::Table, Operator::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OperatorCredentials::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OperatorCredentials {
    Table,
    Id,
    OperatorId,
    PasswordHash,
    PasswordAlgorithm,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Operator { Table, Id }
