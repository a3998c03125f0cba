use anyhow::Result;
use std::path::Path;
use thiserror::Error;

use crate::sheet_reader::{CellValue, RowRecord, read_first_sheet};

/// A single offending cell. The display form is the message sent to the client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellError {
    #[error("Row {row}, Column \"{column}\": Empty cell")]
    EmptyCell { row: usize, column: String },

    #[error("Row {row}, Column \"{column}\": Numeric string \"{value}\"")]
    NumericString {
        row: usize,
        column: String,
        value: String,
    },
}

impl CellError {
    pub fn row(&self) -> usize {
        match self {
            CellError::EmptyCell { row, .. } | CellError::NumericString { row, .. } => *row,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            CellError::EmptyCell { column, .. } | CellError::NumericString { column, .. } => column,
        }
    }
}

/// True when a text cell holds something that should have been a number.
///
/// The value is trimmed, must be non-empty, must be fully consumed by a
/// decimal float parse and must be finite. `"NaN"`, `"inf"` and hex literals
/// are not numeric strings.
pub fn is_numeric_string(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    return trimmed.parse::<f64>().is_ok_and(|n| n.is_finite());
}

/// Apply both cell rules to every cell of every row.
///
/// Errors are collected exhaustively, ordered by row and then by column.
pub fn validate_rows(rows: &[RowRecord]) -> Vec<CellError> {
    let mut errors = Vec::new();

    for row in rows {
        for (column, value) in row.cells() {
            match value {
                CellValue::Empty => errors.push(CellError::EmptyCell {
                    row: row.row_number(),
                    column: column.to_string(),
                }),
                CellValue::Text(s) if is_numeric_string(s) => {
                    errors.push(CellError::NumericString {
                        row: row.row_number(),
                        column: column.to_string(),
                        value: s.clone(),
                    })
                }
                _ => {}
            }
        }
    }

    errors
}

/// Read the first worksheet of `path` and validate it.
///
/// `Err` means the workbook could not be read at all; cell problems come back
/// as the `Ok` list.
pub fn validate_workbook(path: &Path) -> Result<Vec<CellError>> {
    let rows = read_first_sheet(path)?;
    let errors = validate_rows(&rows);

    if errors.is_empty() {
        tracing::info!("Validated {} row(s) in {}: no errors", rows.len(), path.display());
    } else {
        tracing::warn!(
            "Validation of {} found {} error(s) in {} row(s)",
            path.display(),
            errors.len(),
            rows.len()
        );
        for error in &errors {
            if let Some(row) = rows.iter().find(|row| row.row_number() == error.row()) {
                tracing::debug!("{} | row data: {}", error, row.to_json());
            }
        }
    }

    Ok(errors)
}
