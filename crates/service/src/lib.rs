//! Service layer providing the registry's business operations on top of models.
//! - Separates business logic from HTTP and data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Classifies database failures into client and server errors.

pub mod auth;
pub mod errors;
pub mod health_service;
pub mod operator_service;
pub mod owner_service;
pub mod recipe_service;
pub mod restaurant_service;
#[cfg(test)]
pub mod test_support;
pub mod upload;
