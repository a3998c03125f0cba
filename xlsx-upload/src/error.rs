//! Error types for the upload API
//!
//! Every variant maps to a status code and a `{ message, errors? }` body. The
//! underlying cause of form and processing failures is logged, never sent.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use upload_lib::CellError;

use crate::api::UploadResponse;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";
pub const NO_FILE_MESSAGE: &str = "No file uploaded";
pub const FORM_DATA_MESSAGE: &str = "Error parsing form data";
pub const VALIDATION_MESSAGE: &str = "Validation errors";
pub const PROCESSING_MESSAGE: &str = "Error processing file";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Anything other than POST on the upload route (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Form had no `file` part (400)
    #[error("No file uploaded")]
    NoFile,

    /// Body is not a readable multipart form (400, or 413 when too large)
    #[error("Invalid form data: {cause}")]
    FormData { status: StatusCode, cause: String },

    /// One or more cells broke a rule (400)
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<CellError>),

    /// Workbook could not be processed (500)
    #[error(transparent)]
    Processing(#[from] anyhow::Error),

    /// IO error while staging or storing the file (500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::FormData {
            status: StatusCode::BAD_REQUEST,
            cause: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        // Keep 413 for oversized bodies, everything else is a bad request
        let status = match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::FormData {
            status,
            cause: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                UploadResponse::message(METHOD_NOT_ALLOWED_MESSAGE),
            ),
            ApiError::NoFile => (StatusCode::BAD_REQUEST, UploadResponse::message(NO_FILE_MESSAGE)),
            ApiError::FormData { status, cause } => {
                tracing::warn!("Error parsing form data: {}", cause);
                (status, UploadResponse::message(FORM_DATA_MESSAGE))
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                UploadResponse::with_errors(
                    VALIDATION_MESSAGE,
                    errors.iter().map(|e| e.to_string()).collect(),
                ),
            ),
            ApiError::Processing(ref err) => {
                tracing::error!("Error processing file: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UploadResponse::message(PROCESSING_MESSAGE),
                )
            }
            ApiError::Io(ref err) => {
                tracing::error!("Error processing file: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UploadResponse::message(PROCESSING_MESSAGE),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_lists_every_cell() {
        let response = ApiError::Validation(vec![
            CellError::EmptyCell {
                row: 2,
                column: "Name".to_string(),
            },
            CellError::NumericString {
                row: 3,
                column: "Code".to_string(),
                value: "7".to_string(),
            },
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation errors");
        assert_eq!(body["errors"][0], "Row 2, Column \"Name\": Empty cell");
        assert_eq!(body["errors"][1], "Row 3, Column \"Code\": Numeric string \"7\"");
    }

    #[tokio::test]
    async fn test_processing_error_hides_cause() {
        let response =
            ApiError::Processing(anyhow::anyhow!("zip header broken at offset 12")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Error processing file");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_io_error_is_a_server_error() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only disk");
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_no_file_has_no_errors_array() {
        let response = ApiError::NoFile.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "No file uploaded");
        assert!(body.get("errors").is_none());
    }
}
