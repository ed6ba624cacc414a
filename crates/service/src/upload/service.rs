use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::errors::UploadError;
use super::store::ObjectStore;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// A file received from a client, already read into memory.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadedImage {
    pub url: String,
    #[serde(skip)]
    pub key: String,
}

pub struct UploadService {
    store: Arc<dyn ObjectStore>,
    max_bytes: usize,
}

impl UploadService {
    pub fn new(store: Arc<dyn ObjectStore>, max_bytes: usize) -> Self {
        Self { store, max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validates type and size, then stores the image under
    /// `{subfolder}/{uuid}.{ext}` and returns its public URL.
    #[instrument(skip(self, upload), fields(content_type = %upload.content_type, size = upload.bytes.len()))]
    pub async fn upload_image(
        &self,
        upload: ImageUpload,
        subfolder: Option<&str>,
    ) -> Result<UploadedImage, UploadError> {
        if !ALLOWED_IMAGE_TYPES.contains(&upload.content_type.as_str()) {
            return Err(UploadError::InvalidType);
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge(human_size(self.max_bytes)));
        }

        let key = object_key(upload.file_name.as_deref(), subfolder);
        self.store
            .put_object(&key, upload.bytes, &upload.content_type)
            .await
            .map_err(|reason| {
                warn!(%key, %reason, "image upload failed");
                UploadError::Storage(reason)
            })?;

        let url = self.store.public_url(&key);
        info!(%key, "image_uploaded");
        Ok(UploadedImage { url, key })
    }
}

/// `{subfolder}/{uuid}.{ext}`. A file name with no usable extension gets a
/// bare uuid rather than reusing the name as the extension.
fn object_key(file_name: Option<&str>, subfolder: Option<&str>) -> String {
    let ext = file_name
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.trim())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    let name = match ext {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
        None => Uuid::new_v4().to_string(),
    };
    match subfolder.map(|s| s.trim().trim_matches('/')).filter(|s| !s.is_empty()) {
        Some(folder) => format!("{folder}/{name}"),
        None => name,
    }
}

pub fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}
