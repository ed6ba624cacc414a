//! Image upload: validation, key generation and the object store seam.

pub mod errors;
pub mod memory;
pub mod s3;
pub mod service;
pub mod store;

pub use errors::UploadError;
pub use memory::InMemoryObjectStore;
pub use s3::S3ObjectStore;
pub use service::{human_size, ImageUpload, UploadService, UploadedImage};
pub use store::ObjectStore;
