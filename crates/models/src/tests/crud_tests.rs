use super::{setup_test_db, skip_db_tests};
use crate::errors::ModelError;
use crate::{operator, operator_credentials, owner, recipe, restaurant, restaurant_recipe};
use anyhow::Result;
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter};

fn sample_owner(email: &str) -> owner::NewOwner {
    owner::NewOwner {
        name: "Maria Quispe".into(),
        email: email.into(),
        phone: Some("0991234567".into()),
        address: Some("Av. 9 de Octubre".into()),
    }
}

fn sample_restaurant(name: &str) -> restaurant::NewRestaurant {
    restaurant::NewRestaurant {
        name: name.into(),
        address: "Malecon 2000".into(),
        latitude: -2.1894,
        longitude: -79.8891,
        images: vec!["https://cdn.example.com/a.jpg".into()],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_owner_crud() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let created = owner::create(&db, sample_owner("maria@example.com")).await?;
    assert_eq!(created.email, "maria@example.com");

    let found = owner::Entity::find_by_id(created.id.clone()).one(&db).await?;
    assert_eq!(found.as_ref().map(|o| o.name.as_str()), Some("Maria Quispe"));

    let updated = owner::update(
        &db,
        created.clone(),
        owner::OwnerChanges { name: Some("Maria Q.".into()), ..Default::default() },
    )
    .await?;
    assert_eq!(updated.name, "Maria Q.");
    assert_eq!(updated.email, created.email);
    assert!(updated.updated_at >= created.updated_at);

    owner::Entity::delete_by_id(created.id.clone()).exec(&db).await?;
    assert!(owner::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_owner_validation_happens_before_insert() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let err = owner::create(&db, sample_owner("not-an-email")).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert_eq!(owner::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_restaurant_crud_and_owner_relation() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let o = owner::create(&db, sample_owner("owner@example.com")).await?;
    let r = restaurant::create(&db, sample_restaurant("El Cangrejo Rojo"), Some(o.id.clone())).await?;
    assert_eq!(r.owner_id.as_deref(), Some(o.id.as_str()));
    assert_eq!(r.image_urls(), vec!["https://cdn.example.com/a.jpg".to_string()]);

    let (_, owner_of) = restaurant::Entity::find_by_id(r.id.clone())
        .find_also_related(owner::Entity)
        .one(&db)
        .await?
        .expect("restaurant exists");
    assert_eq!(owner_of.map(|x| x.id), Some(o.id.clone()));

    let owned = o.find_related(restaurant::Entity).all(&db).await?;
    assert_eq!(owned.len(), 1);

    let moved = restaurant::update(
        &db,
        r,
        restaurant::RestaurantChanges { latitude: Some(-0.2201), ..Default::default() },
    )
    .await?;
    assert_eq!(moved.latitude, -0.2201);
    assert_eq!(moved.name, "El Cangrejo Rojo");
    Ok(())
}

#[tokio::test]
async fn test_restaurant_rejects_bad_coordinates() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let mut input = sample_restaurant("Off the map");
    input.latitude = 123.0;
    let err = restaurant::create(&db, input, None).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn test_deleting_owner_keeps_restaurant() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let o = owner::create(&db, sample_owner("gone@example.com")).await?;
    let r = restaurant::create(&db, sample_restaurant("Orphan"), Some(o.id.clone())).await?;
    owner::Entity::delete_by_id(o.id).exec(&db).await?;

    let after = restaurant::Entity::find_by_id(r.id).one(&db).await?.expect("restaurant kept");
    assert_eq!(after.owner_id, None);
    Ok(())
}

#[tokio::test]
async fn test_recipe_ids_and_links() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let ceviche = recipe::create(
        &db,
        recipe::NewRecipe { id: Some("recipe-ceviche".into()), name: "Ceviche".into(), description: None },
    )
    .await?;
    assert_eq!(ceviche.id, "recipe-ceviche");
    let encebollado = recipe::create(
        &db,
        recipe::NewRecipe { id: None, name: "Encebollado".into(), description: Some("Fish soup".into()) },
    )
    .await?;
    assert!(!encebollado.id.is_empty());

    let r = restaurant::create(&db, sample_restaurant("Picanteria"), None).await?;
    let written = restaurant_recipe::link_many(
        &db,
        &r.id,
        &[ceviche.id.clone(), encebollado.id.clone()],
    )
    .await?;
    assert_eq!(written, 2);

    let served = r.find_related(recipe::Entity).all(&db).await?;
    assert_eq!(served.len(), 2);
    let serving = ceviche.find_related(restaurant::Entity).all(&db).await?;
    assert_eq!(serving.len(), 1);

    let removed = restaurant_recipe::unlink(&db, &r.id, &ceviche.id).await?;
    assert_eq!(removed, 1);
    let removed_again = restaurant_recipe::unlink(&db, &r.id, &ceviche.id).await?;
    assert_eq!(removed_again, 0);
    Ok(())
}

#[tokio::test]
async fn test_link_many_with_no_ids_writes_nothing() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let r = restaurant::create(&db, sample_restaurant("Empty menu"), None).await?;
    assert_eq!(restaurant_recipe::link_many(&db, &r.id, &[]).await?, 0);
    assert_eq!(restaurant_recipe::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_deleting_restaurant_cascades_links() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let rec = recipe::create(&db, recipe::NewRecipe { name: "Bolon".into(), ..Default::default() }).await?;
    let r = restaurant::create(&db, sample_restaurant("Cafeteria"), None).await?;
    restaurant_recipe::link(&db, &r.id, &rec.id).await?;

    restaurant::Entity::delete_by_id(r.id.clone()).exec(&db).await?;
    let left = restaurant_recipe::Entity::find()
        .filter(restaurant_recipe::Column::RestaurantId.eq(r.id))
        .count(&db)
        .await?;
    assert_eq!(left, 0);
    assert!(recipe::Entity::find_by_id(rec.id).one(&db).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_operator_and_credentials() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let op = operator::create(
        &db,
        operator::NewOperator {
            name: "Ana Torres".into(),
            email: "ana@catastro.gob".into(),
            phone: None,
            identification: "0912345678".into(),
        },
    )
    .await?;
    assert!(operator::find_by_email(&db, "ana@catastro.gob").await?.is_some());

    let first = operator_credentials::upsert_password(&db, &op.id, "hash-1".into(), "argon2").await?;
    let second = operator_credentials::upsert_password(&db, &op.id, "hash-2".into(), "argon2").await?;
    assert_eq!(first.id, second.id);
    assert_eq!(second.password_hash, "hash-2");

    operator::Entity::delete_by_id(op.id.clone()).exec(&db).await?;
    assert!(operator_credentials::find_for_operator(&db, &op.id).await?.is_none());
    Ok(())
}
