//! HTTP API handlers

pub mod health;
pub mod ui;
pub mod upload;

pub use health::health_routes;
pub use ui::serve_index;
pub use upload::{method_not_allowed, upload_file, UploadResponse};
