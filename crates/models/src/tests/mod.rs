use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// CRUD operations tests for all models
pub mod crud_tests;

/// Transaction handling and constraint tests
pub mod transaction_tests;

/// Fresh in-memory database with all migrations applied. A single pooled
/// connection keeps every query on the same SQLite memory instance.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub(crate) fn skip_db_tests() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok()
}
