use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use std::path::Path;
use upload_lib::CellValue;
use xlsx_upload::{build_router, AppState};

#[allow(unused_imports)]
pub use upload_lib::test_utils::{number, text, write_fixture_workbook, write_valid_workbook};

#[allow(dead_code)]
pub const BOUNDARY: &str = "----xlsx-upload-test-boundary";

/// One part of a multipart form: name, optional filename, content
#[allow(dead_code)]
pub struct FormPart<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content: &'a [u8],
}

/// Test helper: Create app storing uploads in `upload_dir`
#[allow(dead_code)]
pub fn setup_app(upload_dir: &Path) -> Router {
    setup_app_with_limit(upload_dir, 10 * 1024 * 1024)
}

#[allow(dead_code)]
pub fn setup_app_with_limit(upload_dir: &Path, max_upload_bytes: usize) -> Router {
    build_router(AppState::new(upload_dir, max_upload_bytes))
}

/// Test helper: Encode form parts as a multipart/form-data body
#[allow(dead_code)]
pub fn multipart_body(parts: &[FormPart]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Test helper: POST a multipart form to the upload endpoint
#[allow(dead_code)]
pub fn upload_request(parts: &[FormPart]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Test helper: POST a single `file` part
#[allow(dead_code)]
pub fn file_upload_request(filename: &str, content: &[u8]) -> Request<Body> {
    upload_request(&[FormPart {
        name: "file",
        filename: Some(filename),
        content,
    }])
}

/// Test helper: Create request without a body
#[allow(dead_code)]
pub fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
#[allow(dead_code)]
pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: Bytes of a workbook built from `headers` and `rows`
#[allow(dead_code)]
pub fn workbook_bytes(headers: &[&str], rows: &[Vec<CellValue>]) -> Vec<u8> {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("fixture.xlsx");
    write_fixture_workbook(&path, headers, rows).expect("Should write fixture workbook");
    std::fs::read(&path).expect("Should read fixture workbook")
}

/// Test helper: Bytes of a workbook without any defect
#[allow(dead_code)]
pub fn valid_workbook_bytes() -> Vec<u8> {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("valid.xlsx");
    write_valid_workbook(&path).expect("Should write fixture workbook");
    std::fs::read(&path).expect("Should read fixture workbook")
}

/// Names of all entries in a directory, sorted
#[allow(dead_code)]
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Should read dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
