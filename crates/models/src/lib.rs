//! SeaORM entities for the restaurant registry plus the small amount of
//! insert/update logic that belongs next to each table.

pub mod db;
pub mod errors;
pub mod validation;

pub mod operator;
pub mod operator_credentials;
pub mod owner;
pub mod recipe;
pub mod restaurant;
pub mod restaurant_recipe;

#[cfg(test)]
mod tests;
