use std::path::{Path, PathBuf};
use tempfile::TempDir;
use upload_lib::CellValue;

// Re-export shared test utilities from src/test_utils.rs
// These are the core functions used by most tests
#[allow(unused_imports)]
pub use upload_lib::test_utils::{number, text, write_fixture_workbook, write_valid_workbook};

/// Create a temporary directory holding a workbook built from `headers` and `rows`
#[allow(dead_code)]
pub fn workbook_in_tempdir(headers: &[&str], rows: &[Vec<CellValue>]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("upload.xlsx");
    write_fixture_workbook(&path, headers, rows).expect("Should write fixture workbook");
    (dir, path)
}

/// Validate a workbook and return the client facing messages
#[allow(dead_code)]
pub fn validation_messages(path: &Path) -> Vec<String> {
    upload_lib::validate_workbook(path)
        .expect("Workbook should be readable")
        .iter()
        .map(|error| error.to_string())
        .collect()
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
