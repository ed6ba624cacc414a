//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Operator registration, login and token verification live here; the HTTP
//! layer only extracts inputs and maps [`errors::AuthError`] to responses.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::{AuthConfig, AuthService};
