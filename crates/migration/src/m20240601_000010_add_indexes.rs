use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Restaurant: lookups by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_owner")
                    .table(Restaurant::Table)
                    .col(Restaurant::OwnerId)
                    .to_owned(),
            )
            .await?;

        // RestaurantRecipe: reverse lookups from a recipe
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_recipe_recipe")
                    .table(RestaurantRecipe::Table)
                    .col(RestaurantRecipe::RecipeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_name")
                    .table(Restaurant::Table)
                    .col(Restaurant::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_restaurant_owner").table(Restaurant::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_restaurant_recipe_recipe")
                    .table(RestaurantRecipe::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_restaurant_name").table(Restaurant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Restaurant { Table, OwnerId, Name }

#[derive(DeriveIden)]
enum RestaurantRecipe { Table, RecipeId }
