//! Column resolution by ordered alias lists, identifier normalisation, and
//! season filtering.
//!
//! Every lookup walks its candidate list in declared order and the first
//! column present in the table wins.

use serde_json::Value;

use crate::paddock::tools::model::{SheetTable, cell_text};

/// Season column aliases, in priority order.
pub const SEASON_COLUMNS: &[&str] = &["season", "Season", "year", "Year"];
/// Identifier columns of the driver core and ratings sheets.
pub const DRIVER_ID_COLUMNS: &[&str] = &["driver_id", "id"];
/// Driver-side identifier columns of the contracts sheet.
pub const CONTRACT_DRIVER_COLUMNS: &[&str] = &["driver_id", "person_id", "id"];
/// Team-side identifier columns of the contracts sheet.
pub const CONTRACT_TEAM_COLUMNS: &[&str] = &["team_id", "team"];
/// Sources for a team's `name_common` when the column is absent.
pub const TEAM_NAME_COLUMNS: &[&str] = &["name", "name_official", "team_name", "team_id"];
/// Single-column sources for a driver's `full_name` when the column is absent.
pub const DRIVER_NAME_COLUMNS: &[&str] = &["name", "driver_name", "Nome", "nome", "fullName"];
/// Columns split into `first_name`/`last_name` when either is absent.
pub const NAME_SPLIT_COLUMNS: &[&str] = &["full_name", "name"];

/// Returns the first candidate present in the table.
pub fn resolve_column(table: &SheetTable, candidates: &[&'static str]) -> Option<&'static str> {
    candidates
        .iter()
        .copied()
        .find(|candidate| table.has_column(candidate))
}

/// Resolves the season column (`season`, `Season`, `year`, `Year`).
pub fn season_column(table: &SheetTable) -> Option<&'static str> {
    resolve_column(table, SEASON_COLUMNS)
}

/// Converts an id-like cell to a trimmed string. Missing cells, and cells
/// that are blank after trimming, have no id.
pub fn normalize_id(value: &Value) -> Option<String> {
    if value.is_null() {
        return None;
    }
    let text = cell_text(value);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether a season cell holds the target season. Only numeric cells match.
pub fn matches_season(value: &Value, season: i64) -> bool {
    let Value::Number(number) = value else {
        return false;
    };
    match number.as_i64() {
        Some(int) => int == season,
        None => number.as_f64() == Some(season as f64),
    }
}

/// Restricts the table to the target season when it has a season column.
///
/// Returns the column the filter was applied on, or `None` when the table has
/// no season column and was left untouched.
pub fn filter_season(table: &mut SheetTable, season: i64) -> Option<&'static str> {
    let column = season_column(table)?;
    table.retain_rows(|row| {
        row.get(column)
            .is_some_and(|value| matches_season(value, season))
    });
    Some(column)
}
