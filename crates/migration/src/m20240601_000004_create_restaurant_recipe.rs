//! Create `restaurant_recipe` join table.
//!
//! Both FKs cascade; a restaurant can reference a recipe at most once.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RestaurantRecipe::Table)
                    .if_not_exists()
                    .col(string_len(RestaurantRecipe::Id, 64).primary_key())
                    .col(string_len(RestaurantRecipe::RestaurantId, 64))
                    .col(string_len(RestaurantRecipe::RecipeId, 128))
                    .col(timestamp_with_time_zone(RestaurantRecipe::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_recipe_restaurant")
                            .from(RestaurantRecipe::Table, RestaurantRecipe::RestaurantId)
                            .to(Restaurant::Table, Restaurant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_recipe_recipe")
                            .from(RestaurantRecipe::Table, RestaurantRecipe::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_restaurant_recipe_pair")
                    .table(RestaurantRecipe::Table)
                    .col(RestaurantRecipe::RestaurantId)
                    .col(RestaurantRecipe::RecipeId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestaurantRecipe::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RestaurantRecipe { Table, Id, RestaurantId, RecipeId, CreatedAt }

#[derive(DeriveIden)]
enum Restaurant { Table, Id }

#[derive(DeriveIden)]
enum Recipe { Table, Id }
