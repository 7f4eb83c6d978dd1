use serde_json::{Map, Value};

use crate::paddock::tools::model::{SheetTable, cell_text};

pub const KEY_COLUMN: &str = "key";
pub const LABEL_COLUMN: &str = "label";

/// Builds an attribute dictionary from a driver or staff attribute sheet.
///
/// Sheets with `key` and `label` columns become a flat key → label mapping;
/// a repeated key takes the label of its last row. Any other sheet becomes a
/// mapping from the row index (as text) to the full row.
pub fn attribute_dictionary(table: &SheetTable) -> Map<String, Value> {
    if table.has_columns(&[KEY_COLUMN, LABEL_COLUMN]) {
        labelled_dictionary(table)
    } else {
        indexed_dictionary(table)
    }
}

fn labelled_dictionary(table: &SheetTable) -> Map<String, Value> {
    let mut mapping = Map::new();
    for row in &table.rows {
        let key = match row.get(KEY_COLUMN) {
            Some(value) if !value.is_null() => cell_text(value),
            _ => continue,
        };
        let label = row.get(LABEL_COLUMN).map(cell_text).unwrap_or_default();
        mapping.insert(key, Value::String(label));
    }
    mapping
}

fn indexed_dictionary(table: &SheetTable) -> Map<String, Value> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| (index.to_string(), Value::Object(row.clone())))
        .collect()
}
