//! xlsx-upload - spreadsheet upload and validation service
//!
//! A browser form posts a workbook to `POST /api/upload`. The first sheet is
//! checked for empty cells and numbers stored as text; clean files are kept in
//! the upload directory, rejected files are removed.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod client;
pub mod config;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Directory holding staged and accepted uploads
    pub upload_dir: Arc<PathBuf>,
    /// Largest request body accepted on the upload route
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(upload_dir: impl Into<PathBuf>, max_upload_bytes: usize) -> Self {
        Self {
            upload_dir: Arc::new(upload_dir.into()),
            max_upload_bytes,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let upload = Router::new()
        .route(
            "/api/upload",
            post(api::upload_file).fallback(api::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(state.max_upload_bytes));

    Router::new()
        .route("/", get(api::serve_index))
        .merge(api::health_routes())
        .merge(upload)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
