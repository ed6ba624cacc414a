//! Create `restaurant` table with an optional FK to `owner`.
//!
//! Deleting an owner keeps its restaurants and clears `owner_id`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurant::Table)
                    .if_not_exists()
                    .col(string_len(Restaurant::Id, 64).primary_key())
                    .col(string_len(Restaurant::Name, 255))
                    .col(text_null(Restaurant::Description))
                    .col(text_null(Restaurant::History))
                    .col(text(Restaurant::Address))
                    .col(double(Restaurant::Latitude))
                    .col(double(Restaurant::Longitude))
                    .col(string_len_null(Restaurant::Phone, 64))
                    .col(string_len_null(Restaurant::Email, 255))
                    .col(string_len_null(Restaurant::Website, 512))
                    .col(text_null(Restaurant::PrincipalImage))
                    .col(json_binary(Restaurant::Images))
                    .col(string_len_null(Restaurant::IdentificationNumber, 64))
                    .col(string_len_null(Restaurant::OwnerId, 64))
                    .col(timestamp_with_time_zone(Restaurant::CreatedAt))
                    .col(timestamp_with_time_zone(Restaurant::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_owner")
                            .from(Restaurant::Table, Restaurant::OwnerId)
                            .to(Owner::Table, Owner::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Restaurant::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Restaurant {
    Table,
    Id,
    Name,
    Description,
    History,
    Address,
    Latitude,
    Longitude,
    Phone,
    Email,
    Website,
    PrincipalImage,
    Images,
    IdentificationNumber,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Owner { Table, Id }
