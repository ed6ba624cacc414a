use thiserror::Error;

/// Every variant is reported to the client as a bad request.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file provided")]
    MissingFile,
    #[error("Invalid file type. Only JPEG, PNG, GIF, and WebP images are allowed.")]
    InvalidType,
    #[error("File size too large. Maximum size is {0}.")]
    TooLarge(String),
    #[error("Failed to upload image: {0}")]
    Storage(String),
}
