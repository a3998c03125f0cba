// Test utilities available to both unit and integration tests
// Only compiled when testing

use crate::sheet_reader::CellValue;
use anyhow::Result;
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Shorthand for a text cell
#[allow(dead_code)]
pub fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

/// Shorthand for a numeric cell
#[allow(dead_code)]
pub fn number(value: f64) -> CellValue {
    CellValue::Number(value)
}

/// Write a single-sheet xlsx workbook with a header row followed by `rows`.
///
/// `CellValue::Empty` cells are left unwritten, so they read back as blank cells.
#[allow(dead_code)]
pub fn write_fixture_workbook(path: &Path, headers: &[&str], rows: &[Vec<CellValue>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        if !header.is_empty() {
            worksheet.write_string(0, col as u16, *header)?;
        }
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let sheet_row = (row_idx + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            let col = col as u16;
            match value {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string(sheet_row, col, s.as_str())?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(sheet_row, col, *n)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(sheet_row, col, *b)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// A clean two-column workbook: text names and numeric ages
#[allow(dead_code)]
pub fn write_valid_workbook(path: &Path) -> Result<()> {
    write_fixture_workbook(
        path,
        &["Name", "Age"],
        &[
            vec![text("Alice"), number(30.0)],
            vec![text("Bob"), number(41.0)],
        ],
    )
}
