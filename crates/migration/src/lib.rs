//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_owner;
mod m20240601_000002_create_restaurant;
mod m20240601_000003_create_recipe;
mod m20240601_000004_create_restaurant_recipe;
mod m20240601_000005_create_operator;
mod m20240601_000006_create_operator_credentials;
mod m20240601_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_owner::Migration),
            Box::new(m20240601_000002_create_restaurant::Migration),
            Box::new(m20240601_000003_create_recipe::Migration),
            Box::new(m20240601_000004_create_restaurant_recipe::Migration),
            Box::new(m20240601_000005_create_operator::Migration),
            Box::new(m20240601_000006_create_operator_credentials::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000010_add_indexes::Migration),
        ]
    }
}
