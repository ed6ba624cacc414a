#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database per test with all migrations applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn skip_db_tests() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok()
}

pub fn owner_input(email: &str) -> models::owner::NewOwner {
    models::owner::NewOwner {
        name: "Rosa Zambrano".into(),
        email: email.into(),
        phone: Some("0990000000".into()),
        address: Some("Portoviejo".into()),
    }
}

pub fn restaurant_input(name: &str) -> models::restaurant::NewRestaurant {
    models::restaurant::NewRestaurant {
        name: name.into(),
        description: Some("Comida manabita".into()),
        address: "Calle Chile y Olmedo".into(),
        latitude: -1.0546,
        longitude: -80.4544,
        ..Default::default()
    }
}

pub async fn seed_recipe(db: &DatabaseConnection, id: &str, name: &str) -> anyhow::Result<models::recipe::Model> {
    Ok(models::recipe::create(
        db,
        models::recipe::NewRecipe { id: Some(id.into()), name: name.into(), description: None },
    )
    .await?)
}
