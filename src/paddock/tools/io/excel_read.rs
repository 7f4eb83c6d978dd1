use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use chrono::{NaiveDate, TimeDelta};
use serde_json::{Number, Value};

use crate::paddock::tools::error::{Result, ToolError};
use crate::paddock::tools::model::SheetTable;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Read-only handle on the source workbook, held for the whole run.
pub struct ExcelWorkbook {
    inner: Xlsx<BufReader<File>>,
}

impl ExcelWorkbook {
    /// Opens the workbook, reporting a missing file as [`ToolError::MissingInput`].
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let inner: Xlsx<_> = open_workbook(path)?;
        Ok(Self { inner })
    }

    /// Names of the workbook's sheets, in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names().to_vec()
    }

    /// Whether the workbook contains a sheet called `name`.
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|sheet| sheet == name)
    }

    /// Reads a sheet as a table. Returns `Ok(None)` when the sheet is absent.
    pub fn read_table(&mut self, name: &str) -> Result<Option<SheetTable>> {
        let Some(range_result) = self.inner.worksheet_range(name) else {
            return Ok(None);
        };
        let range = range_result.map_err(ToolError::from)?;
        Ok(Some(table_from_range(name, &range)))
    }
}

/// Interprets a sheet range as a header row followed by data rows.
pub fn table_from_range(sheet_name: &str, range: &calamine::Range<DataType>) -> SheetTable {
    let mut rows = range.rows().skip_while(|row| is_blank_row(row));

    let headers = match rows.next() {
        Some(header_row) => build_headers(header_row),
        None => return SheetTable::new(sheet_name, Vec::new()),
    };

    let mut table = SheetTable::new(sheet_name, headers);
    for row in rows {
        if is_blank_row(row) {
            continue;
        }
        table.push_row(row.iter().map(cell_to_value).collect());
    }
    table
}

fn build_headers(row: &[DataType]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(row.len());
    for (col_idx, cell) in row.iter().enumerate() {
        let mut header = cell_to_string(cell).trim().to_string();
        if header.is_empty() {
            header = format!("col_{}", col_idx + 1);
        }
        if headers.contains(&header) {
            let mut counter = 1;
            while headers.contains(&format!("{header}.{counter}")) {
                counter += 1;
            }
            header = format!("{header}.{counter}");
        }
        headers.push(header);
    }
    headers
}

fn is_blank_row(row: &[DataType]) -> bool {
    row.iter().all(|cell| cell_to_value(cell).is_null())
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Maps a workbook cell onto the JSON value written to the output documents.
fn cell_to_value(cell: &DataType) -> Value {
    match cell {
        DataType::Empty | DataType::Error(_) => Value::Null,
        DataType::String(value) if value.is_empty() => Value::Null,
        DataType::String(value) => Value::String(value.clone()),
        DataType::Int(value) => Value::from(*value),
        DataType::Float(value) => float_to_value(*value),
        DataType::Bool(value) => Value::Bool(*value),
        DataType::DateTime(serial) => excel_serial_to_iso(*serial)
            .map(Value::String)
            .unwrap_or(Value::Null),
        other => Value::String(other.to_string()),
    }
}

fn float_to_value(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        return Value::from(value as i64);
    }
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Converts an Excel serial date (days since 1899-12-30) to an ISO-8601
/// timestamp with millisecond precision.
fn excel_serial_to_iso(serial: f64) -> Option<String> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    let timestamp = epoch.checked_add_signed(TimeDelta::try_milliseconds(millis)?)?;
    Some(timestamp.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
}
