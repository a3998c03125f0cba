#![allow(clippy::needless_return)]

mod cell_rules;
mod sheet_reader;
mod staged_file;
pub mod utils;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use cell_rules::{CellError, is_numeric_string, validate_rows, validate_workbook};
pub use sheet_reader::{CellValue, RowRecord, read_first_sheet};
pub use staged_file::StagedFile;

/// Offset between a row's index in the parsed sequence and the row number
/// reported to the user (1-based, plus the header row).
pub const HEADER_ROW_OFFSET: usize = 2;
