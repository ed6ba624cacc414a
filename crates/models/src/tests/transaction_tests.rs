use super::{setup_test_db, skip_db_tests};
use crate::errors::ModelError;
use crate::{operator, owner, recipe, restaurant, restaurant_recipe};
use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait, SqlErr, TransactionTrait};

fn owner_input(email: &str) -> owner::NewOwner {
    owner::NewOwner { name: "Tx Owner".into(), email: email.into(), ..Default::default() }
}

fn restaurant_input() -> restaurant::NewRestaurant {
    restaurant::NewRestaurant {
        name: "Tx Restaurant".into(),
        address: "Calle Larga".into(),
        latitude: -2.9,
        longitude: -79.0,
        ..Default::default()
    }
}

fn sql_err(err: &ModelError) -> Option<SqlErr> {
    match err {
        ModelError::Db(db) => db.sql_err(),
        ModelError::Validation(_) => None,
    }
}

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let o = owner::create(&txn, owner_input("commit@example.com")).await?;
    restaurant::create(&txn, restaurant_input(), Some(o.id.clone())).await?;
    txn.commit().await?;

    assert_eq!(owner::Entity::find().count(&db).await?, 1);
    assert_eq!(restaurant::Entity::find().count(&db).await?, 1);
    Ok(())
}

/// Test transaction rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let o = owner::create(&txn, owner_input("rollback@example.com")).await?;
    restaurant::create(&txn, restaurant_input(), Some(o.id)).await?;
    txn.rollback().await?;

    assert_eq!(owner::Entity::find().count(&db).await?, 0);
    assert_eq!(restaurant::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_unknown_recipe_is_a_foreign_key_violation() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let known = recipe::create(&db, recipe::NewRecipe { id: Some("r1".into()), name: "Seco".into(), description: None }).await?;

    let txn = db.begin().await?;
    let o = owner::create(&txn, owner_input("fk@example.com")).await?;
    let r = restaurant::create(&txn, restaurant_input(), Some(o.id)).await?;
    let err = restaurant_recipe::link_many(&txn, &r.id, &[known.id, "does-not-exist".into()])
        .await
        .unwrap_err();
    assert!(matches!(sql_err(&err), Some(SqlErr::ForeignKeyConstraintViolation(_))));
    txn.rollback().await?;

    assert_eq!(owner::Entity::find().count(&db).await?, 0);
    assert_eq!(restaurant::Entity::find().count(&db).await?, 0);
    assert_eq!(restaurant_recipe::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_unique_columns_are_classified() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    owner::create(&db, owner_input("dup@example.com")).await?;
    let err = owner::create(&db, owner_input("dup@example.com")).await.unwrap_err();
    assert!(matches!(sql_err(&err), Some(SqlErr::UniqueConstraintViolation(_))));

    let op = operator::NewOperator {
        name: "Op".into(),
        email: "op@example.com".into(),
        phone: None,
        identification: "0102030405".into(),
    };
    operator::create(&db, op.clone()).await?;
    let err = operator::create(&db, operator::NewOperator { email: "other@example.com".into(), ..op })
        .await
        .unwrap_err();
    assert!(matches!(sql_err(&err), Some(SqlErr::UniqueConstraintViolation(_))));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_link_is_rejected() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let rec = recipe::create(&db, recipe::NewRecipe { name: "Tigrillo".into(), ..Default::default() }).await?;
    let r = restaurant::create(&db, restaurant_input(), None).await?;
    restaurant_recipe::link(&db, &r.id, &rec.id).await?;
    let err = restaurant_recipe::link(&db, &r.id, &rec.id).await.unwrap_err();
    assert!(matches!(sql_err(&err), Some(SqlErr::UniqueConstraintViolation(_))));
    Ok(())
}

#[tokio::test]
async fn test_repeated_recipe_in_batch_aborts_the_transaction() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let rec = recipe::create(&db, recipe::NewRecipe { id: Some("r1".into()), name: "Corviche".into(), description: None }).await?;

    let txn = db.begin().await?;
    let o = owner::create(&txn, owner_input("batch@example.com")).await?;
    let r = restaurant::create(&txn, restaurant_input(), Some(o.id)).await?;
    let err = restaurant_recipe::link_many(&txn, &r.id, &[rec.id.clone(), rec.id])
        .await
        .unwrap_err();
    assert!(matches!(sql_err(&err), Some(SqlErr::UniqueConstraintViolation(_))));
    txn.rollback().await?;

    assert_eq!(owner::Entity::find().count(&db).await?, 0);
    assert_eq!(restaurant_recipe::Entity::find().count(&db).await?, 0);
    Ok(())
}
