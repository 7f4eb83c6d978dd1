use serde_json::Value;

use crate::paddock::tools::columns::{TEAM_NAME_COLUMNS, resolve_column};
use crate::paddock::tools::model::{Record, SheetTable};

pub const NAME_COMMON: &str = "name_common";

/// Rows of a sheet exported as-is, one record per row.
pub fn passthrough_records(table: SheetTable) -> Vec<Record> {
    table.into_records()
}

/// Team rows, with `name_common` synthesised when the sheet lacks it.
pub fn team_records(mut table: SheetTable) -> Vec<Record> {
    ensure_name_common(&mut table);
    table.into_records()
}

/// Copies the first available team-name column into `name_common`.
///
/// Returns the source column, or `None` when `name_common` already exists or
/// no source column is present.
pub fn ensure_name_common(table: &mut SheetTable) -> Option<&'static str> {
    if table.has_column(NAME_COMMON) {
        return None;
    }
    let source = resolve_column(table, TEAM_NAME_COLUMNS)?;
    table.set_column(NAME_COMMON, |row| {
        row.get(source).cloned().unwrap_or(Value::Null)
    });
    Some(source)
}
