//! Media upload handler

use axum::extract::{Multipart, State};
use scribe_common::{Error, Result};

use crate::api::middleware::BlogState;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

/// Largest accepted upload in bytes
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Store an image publicly and answer with its CDN URL
///
/// **POST /v1/upload**
pub async fn upload(State(state): State<BlogState>, mut multipart: Multipart) -> Result<String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| Error::Validation("File name is required".to_string()))?;
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = field
            .bytes()
            .await
            .map_err(|e| Error::Validation(format!("Failed to read upload: {}", e)))?;

        let url = state
            .storage
            .upload(&file_name, body.to_vec(), &content_type)
            .await
            .map_err(|e| match e {
                scribe_storage::StorageError::InvalidKey(msg) => {
                    Error::Validation(format!("Invalid file name: {}", msg))
                }
                other => Error::Upstream(other.to_string()),
            })?;

        tracing::info!(file_name = %file_name, "Upload stored");
        return Ok(url);
    }

    Err(Error::Validation(format!(
        "Multipart field '{}' is required",
        FILE_FIELD
    )))
}
