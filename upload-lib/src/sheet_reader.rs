use anyhow::Result;
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::HEADER_ROW_OFFSET;
use crate::utils::normalize_string;

/// Key given to a header cell that has no text
const EMPTY_HEADER_KEY: &str = "__EMPTY";

/// Value of a single cell after reading the worksheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) if s.is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            // Dates stay as their serial number, the same as a plain numeric cell
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            // ISO dates and durations (ods) and error cells (#DIV/0!) keep their display text
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// One data row of the worksheet, keyed by column header.
///
/// Columns keep the order they have in the sheet, and every header column is
/// present even when the cell itself is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    /// Position in the parsed sequence (empty rows do not count)
    pub index: usize,
    cells: Vec<(String, CellValue)>,
}

impl RowRecord {
    pub fn new(index: usize, cells: Vec<(String, CellValue)>) -> Self {
        RowRecord { index, cells }
    }

    /// Row number reported to the user, accounting for the header row
    pub fn row_number(&self) -> usize {
        self.index + HEADER_ROW_OFFSET
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(header, _)| header == column)
            .map(|(_, value)| value)
    }

    /// Iterate over `(column, value)` pairs in sheet order
    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(header, value)| (header.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// JSON view of the row, used when logging rejected rows
    pub fn to_json(&self) -> Value {
        let mut json_obj = Map::new();
        for (header, value) in &self.cells {
            let value = serde_json::to_value(value).unwrap_or(Value::Null);
            json_obj.insert(header.clone(), value);
        }
        Value::Object(json_obj)
    }
}

/// Read the first worksheet of a workbook into row records.
///
/// The first used row is the header row. The workbook format is picked from
/// the file extension (xlsx, xlsm, xlsb, xls, ods); when that fails, the
/// content itself decides, so a workbook with the wrong extension still reads.
pub fn read_first_sheet(path: &Path) -> Result<Vec<RowRecord>> {
    let range = match open_workbook_auto(path) {
        Ok(workbook) => first_sheet_range(workbook, path)?,
        Err(by_extension) => {
            let content = std::fs::read(path)?;
            let workbook = open_workbook_auto_from_rs(Cursor::new(content)).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to open workbook {}: {} (content detection: {})",
                    path.display(),
                    by_extension,
                    e
                )
            })?;
            tracing::debug!(
                "Opened {} by content after extension lookup failed: {}",
                path.display(),
                by_extension
            );
            first_sheet_range(workbook, path)?
        }
    };

    if range.is_empty() {
        return Err(anyhow::anyhow!("The first worksheet of {} is empty", path.display()));
    }

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => unique_header_keys(header_row.iter().map(header_text)),
        None => return Err(anyhow::anyhow!("The first worksheet of {} is empty", path.display())),
    };

    let mut records: Vec<RowRecord> = Vec::new();
    for row in rows {
        // Skip empty rows; whitespace-only text is content and keeps its row number
        let is_empty_row = row.iter().all(|cell| match cell {
            Data::Empty => true,
            Data::String(s) => s.is_empty(),
            _ => false,
        });
        if is_empty_row {
            continue;
        }

        let cells = headers
            .iter()
            .enumerate()
            .map(|(col_idx, header)| {
                let value = row.get(col_idx).map(CellValue::from).unwrap_or(CellValue::Empty);
                (header.clone(), value)
            })
            .collect();

        records.push(RowRecord::new(records.len(), cells));
    }

    tracing::debug!(
        "Read {} data row(s) across {} column(s) from {}",
        records.len(),
        headers.len(),
        path.display()
    );

    Ok(records)
}

fn first_sheet_range<RS: Read + Seek>(mut workbook: Sheets<RS>, path: &Path) -> Result<Range<Data>> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow::anyhow!("Workbook {} has no worksheet", path.display()))?
        .map_err(|e| anyhow::anyhow!("Error reading first sheet of {}: {}", path.display(), e))?;
    Ok(range)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => normalize_string(s),
        other => normalize_string(&other.to_string()),
    }
}

/// Turn raw header texts into unique column keys.
///
/// Blank headers become `__EMPTY`; a repeated header gets a `_1`, `_2`, ...
/// suffix, skipping any key that is already taken by a real header.
fn unique_header_keys(raw_headers: impl Iterator<Item = String>) -> Vec<String> {
    let raw_headers: Vec<String> = raw_headers
        .map(|header| {
            if header.is_empty() {
                EMPTY_HEADER_KEY.to_string()
            } else {
                header
            }
        })
        .collect();

    let mut taken: HashSet<String> = raw_headers.iter().cloned().collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut suffix_counters: HashMap<&str, usize> = HashMap::new();
    let mut keys = Vec::with_capacity(raw_headers.len());

    for header in &raw_headers {
        if seen.insert(header.as_str()) {
            keys.push(header.clone());
            continue;
        }

        let counter = suffix_counters.entry(header.as_str()).or_insert(0);
        let key = loop {
            *counter += 1;
            let candidate = format!("{header}_{counter}");
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(key.clone());
        keys.push(key);
    }

    keys
}
