//! Command line counterpart of the browser upload form
//!
//! [`FormState`] holds what the form shows: a message and an ordered list of
//! validation errors. [`UploadClient`] sends a file and applies the outcome.

use anyhow::Result;
use reqwest::multipart::{Form, Part};
use std::path::Path;

use crate::api::upload::FILE_FIELD;
use crate::api::UploadResponse;

pub const UPLOAD_PATH: &str = "/api/upload";
pub const NO_FILE_SELECTED: &str = "Please select a file";
pub const UPLOAD_FAILED: &str = "An error occurred while uploading the file";

/// What the upload form currently shows
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormState {
    pub message: String,
    pub errors: Vec<String>,
}

impl FormState {
    /// Submit was pressed with no file picked. Nothing is sent.
    pub fn no_file_selected(&mut self) {
        self.message = NO_FILE_SELECTED.to_string();
    }

    /// Show a server response. A successful response clears earlier errors.
    pub fn apply_response(&mut self, success: bool, response: UploadResponse) {
        self.message = response.message;
        self.errors = if success {
            Vec::new()
        } else {
            response.errors.unwrap_or_default()
        };
    }

    /// The request failed or the body was not JSON. Only the operator log sees the cause.
    pub fn apply_failure(&mut self, error: &anyhow::Error) {
        tracing::error!("Upload error: {:#}", error);
        self.message = UPLOAD_FAILED.to_string();
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        if !self.message.is_empty() {
            output.push_str(&self.message);
            output.push('\n');
        }
        if !self.errors.is_empty() {
            output.push_str("Validation Errors:\n");
            for (index, error) in self.errors.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", index + 1, error));
            }
        }
        output
    }
}

pub struct UploadClient {
    http: reqwest::Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(base_url: &str) -> Self {
        UploadClient {
            http: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), UPLOAD_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `path` as the `file` part. Returns whether the server accepted it
    /// together with the decoded body.
    pub async fn send(&self, path: &Path) -> Result<(bool, UploadResponse)> {
        let content = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.xlsx");

        let form = Form::new().part(
            FILE_FIELD,
            Part::bytes(content)
                .file_name(filename.to_string())
                .mime_str(spreadsheet_mime(path))?,
        );

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let success = response.status().is_success();
        let body: UploadResponse = response.json().await?;
        Ok((success, body))
    }

    /// Run one submit of the form. Returns true when the upload was accepted.
    pub async fn submit(&self, form: &mut FormState, file: Option<&Path>) -> bool {
        let Some(path) = file else {
            form.no_file_selected();
            return false;
        };

        match self.send(path).await {
            Ok((success, response)) => {
                form.apply_response(success, response);
                success
            }
            Err(e) => {
                form.apply_failure(&e);
                false
            }
        }
    }
}

fn spreadsheet_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        _ => "application/octet-stream",
    }
}
