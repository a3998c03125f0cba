//! Spreadsheet upload endpoint
//!
//! `POST /api/upload` takes a multipart form with a single `file` part. The
//! part is streamed to a staged file, the first worksheet is validated, and the
//! staged file is either promoted to its final name or removed.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use upload_lib::utils::sanitize_extension;
use upload_lib::{validate_workbook, StagedFile};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Name of the form part carrying the spreadsheet
pub const FILE_FIELD: &str = "file";

pub const SUCCESS_MESSAGE: &str = "File uploaded and validated successfully";

/// Body of every upload response, success or failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// Only present when cell validation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl UploadResponse {
    pub fn message(message: &str) -> Self {
        UploadResponse {
            message: message.to_string(),
            errors: None,
        }
    }

    pub fn with_errors(message: &str, errors: Vec<String>) -> Self {
        UploadResponse {
            message: message.to_string(),
            errors: Some(errors),
        }
    }
}

/// POST /api/upload
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart?;
    let staged = receive_file(state.upload_dir(), &mut multipart)
        .await?
        .ok_or(ApiError::NoFile)?;

    // calamine is synchronous, keep it off the async workers
    let staged_path = staged.path().to_path_buf();
    let errors = tokio::task::spawn_blocking(move || validate_workbook(&staged_path))
        .await
        .map_err(|e| anyhow::anyhow!("Validation task failed: {}", e))??;

    if !errors.is_empty() {
        warn!(
            "Rejected upload {} with {} validation error(s)",
            staged.path().display(),
            errors.len()
        );
        if let Err(e) = staged.discard() {
            warn!("Failed to remove rejected upload: {}", e);
        }
        return Err(ApiError::Validation(errors));
    }

    let stored_path = staged.persist()?;
    info!("Stored upload as {}", stored_path.display());

    Ok(Json(UploadResponse::message(SUCCESS_MESSAGE)))
}

/// Any method other than POST on the upload route
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Stream the first non-empty `file` part to a staged file in `dir`.
///
/// Other parts are read and ignored. A `file` part with an empty filename is
/// what a browser sends when nothing was picked, so it counts as no file.
async fn receive_file(dir: &Path, multipart: &mut Multipart) -> ApiResult<Option<StagedFile>> {
    let mut staged: Option<StagedFile> = None;

    while let Some(mut field) = multipart.next_field().await? {
        if staged.is_some() || field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let file = StagedFile::create(dir, sanitize_extension(&original_name).as_deref());
        let mut out = tokio::fs::File::create(file.path()).await?;
        let mut size: usize = 0;
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len();
            out.write_all(&chunk).await?;
        }
        out.flush().await?;

        info!(
            "Received \"{}\" ({} bytes) as {}",
            original_name,
            size,
            file.path().display()
        );
        staged = Some(file);
    }

    Ok(staged)
}
