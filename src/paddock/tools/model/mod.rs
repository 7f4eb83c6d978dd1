use serde_json::{Map, Value};

/// One row of a sheet: column name → cell value, in column order.
pub type Record = Map<String, Value>;

/// A sheet materialised in memory.
///
/// Every record carries every column listed in `columns`; cells that were
/// empty in the workbook hold [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl SheetTable {
    /// Creates an empty table with the provided header.
    pub fn new(sheet_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from positional rows. Short rows are padded with `null`.
    pub fn from_rows(sheet_name: impl Into<String>, columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let mut table = Self::new(sheet_name, columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Appends a positional row, aligning cells with the header.
    pub fn push_row(&mut self, cells: Vec<Value>) {
        let mut cells = cells.into_iter();
        let record = self
            .columns
            .iter()
            .map(|column| (column.clone(), cells.next().unwrap_or(Value::Null)))
            .collect();
        self.rows.push(record);
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the header contains `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Whether the header contains every one of `names`.
    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.has_column(name))
    }

    /// Sets `name` on every row from `derive`, appending the column when it
    /// is new and overwriting it in place otherwise.
    pub fn set_column<F>(&mut self, name: &str, mut derive: F)
    where
        F: FnMut(&Record) -> Value,
    {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
        for row in &mut self.rows {
            let value = derive(row);
            row.insert(name.to_string(), value);
        }
    }

    /// Keeps only the rows for which `keep` returns true.
    pub fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Consumes the table, yielding its rows.
    pub fn into_records(self) -> Vec<Record> {
        self.rows
    }
}

/// Renders a cell as plain text. `null` becomes the empty string.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 9.0e15 => {
                format!("{}", float as i64)
            }
            _ => number.to_string(),
        },
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}
