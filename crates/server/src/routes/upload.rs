use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use service::upload::{ImageUpload, UploadError, UploadedImage};

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Request bodies may exceed the image limit by this much to leave room for
/// multipart framing; the image itself is checked by the upload service.
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Used when storage is disabled and every upload is refused anyway.
pub const FALLBACK_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[utoipa::path(
    post,
    path = "/upload/image",
    tag = "upload",
    request_body(content = crate::openapi::ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = crate::openapi::UploadedImageDoc),
        (status = 400, description = "Missing file, bad type, too large or storage failure", body = crate::openapi::ErrorDoc),
        (status = 503, description = "Object storage is not configured", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn upload_image(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedImage>), JsonApiError> {
    let Some(uploads) = state.uploads.clone() else {
        return Err(JsonApiError::service_unavailable("Image storage is not configured"));
    };

    let mut image: Option<ImageUpload> = None;
    let mut subfolder: Option<String> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| too_large_or(e, uploads.max_bytes()))? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| too_large_or(e, uploads.max_bytes()))?;
                image = Some(ImageUpload { file_name, content_type, bytes: bytes.to_vec() });
            }
            "subfolder" => {
                let text = field.text().await?;
                subfolder = Some(text.trim().to_string()).filter(|s| !s.is_empty());
            }
            _ => {}
        }
    }

    let image = image.ok_or(UploadError::MissingFile)?;
    let stored = uploads.upload_image(image, subfolder.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// A body cut off by the request limit is reported like any oversized image.
fn too_large_or(err: axum::extract::multipart::MultipartError, max_bytes: usize) -> JsonApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge(service::upload::human_size(max_bytes)).into()
    } else {
        err.into()
    }
}
