//! Driver composition: the driver core sheet joined with the season's
//! ratings (as `attributes`) and contracts (as `team_id`).

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, warn};

use crate::paddock::tools::columns::{
    CONTRACT_DRIVER_COLUMNS, CONTRACT_TEAM_COLUMNS, DRIVER_ID_COLUMNS, DRIVER_NAME_COLUMNS,
    NAME_SPLIT_COLUMNS, SEASON_COLUMNS, filter_season, normalize_id, resolve_column,
};
use crate::paddock::tools::error::{Result, ToolError};
use crate::paddock::tools::model::{Record, SheetTable, cell_text};

pub const DRIVER_ID: &str = "driver_id";
pub const FULL_NAME: &str = "full_name";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const TEAM_ID: &str = "team_id";
pub const ATTRIBUTES: &str = "attributes";
const PLAIN_ID: &str = "id";

/// Normalised driver id → that driver's ratings for the season.
pub type AttributeIndex = HashMap<String, Record>;
/// Normalised driver id → team id under contract for the season.
pub type TeamIndex = HashMap<String, String>;

/// Joins the driver core sheet with the optional ratings and contracts sheets.
///
/// Fails only when the core sheet has no identifier column.
pub fn compose_drivers(
    mut core: SheetTable,
    ratings: Option<SheetTable>,
    contracts: Option<SheetTable>,
    season: i64,
) -> Result<Vec<Record>> {
    let id_column = normalize_core(&mut core)?;
    let attributes = ratings
        .map(|table| attribute_index(table, season))
        .unwrap_or_default();
    let teams = contracts
        .map(|table| team_index(table, season))
        .unwrap_or_default();
    debug!(
        attribute_entries = attributes.len(),
        team_entries = teams.len(),
        "driver joins prepared"
    );
    Ok(merge(core, id_column, &attributes, &teams))
}

/// Fills in the name columns and normalises the id column in place.
///
/// Returns the id column that was resolved.
pub fn normalize_core(core: &mut SheetTable) -> Result<&'static str> {
    derive_full_name(core);
    split_full_name(core);

    let id_column = resolve_column(core, DRIVER_ID_COLUMNS).ok_or_else(|| {
        ToolError::MissingIdColumn {
            sheet: core.sheet_name.clone(),
            candidates: DRIVER_ID_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    })?;
    core.set_column(id_column, |row| {
        row.get(id_column)
            .and_then(normalize_id)
            .map(Value::String)
            .unwrap_or(Value::Null)
    });
    Ok(id_column)
}

/// Adds `full_name` when missing, from a single name column if one exists,
/// otherwise from `first_name` and `last_name`.
pub fn derive_full_name(table: &mut SheetTable) {
    if table.has_column(FULL_NAME) {
        return;
    }

    if let Some(source) = resolve_column(table, DRIVER_NAME_COLUMNS) {
        table.set_column(FULL_NAME, |row| match row.get(source) {
            Some(value) if !value.is_null() => Value::String(cell_text(value).trim().to_string()),
            _ => Value::Null,
        });
        return;
    }

    table.set_column(FULL_NAME, |row| {
        let first = row.get(FIRST_NAME).map(cell_text).unwrap_or_default();
        let last = row.get(LAST_NAME).map(cell_text).unwrap_or_default();
        Value::String(format!("{} {}", first.trim(), last.trim()).trim().to_string())
    });
}

/// Adds whichever of `first_name`/`last_name` is missing by splitting the
/// name column on its first run of whitespace.
pub fn split_full_name(table: &mut SheetTable) {
    let fill_first = !table.has_column(FIRST_NAME);
    let fill_last = !table.has_column(LAST_NAME);
    if !fill_first && !fill_last {
        return;
    }
    let Some(source) = resolve_column(table, NAME_SPLIT_COLUMNS) else {
        return;
    };

    if fill_first {
        table.set_column(FIRST_NAME, |row| split_name(row.get(source)).0);
    }
    if fill_last {
        table.set_column(LAST_NAME, |row| split_name(row.get(source)).1);
    }
}

fn split_name(value: Option<&Value>) -> (Value, Value) {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return (Value::Null, Value::String(String::new()));
    };
    let text = cell_text(value);
    let trimmed = text.trim();
    let (first, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (trimmed, ""),
    };
    (Value::String(first.to_string()), Value::String(rest.to_string()))
}

/// Indexes the season's ratings rows by driver id.
///
/// Every column other than the id and season columns becomes an attribute.
/// Rows without an id are skipped; a later row for the same driver replaces
/// an earlier one.
pub fn attribute_index(mut ratings: SheetTable, season: i64) -> AttributeIndex {
    filter_season(&mut ratings, season);

    let Some(id_column) = resolve_column(&ratings, DRIVER_ID_COLUMNS) else {
        warn!(
            sheet = %ratings.sheet_name,
            "ratings sheet has no driver_id/id column; skipping attributes"
        );
        return AttributeIndex::new();
    };

    let attribute_columns: Vec<&str> = ratings
        .columns
        .iter()
        .map(String::as_str)
        .filter(|column| *column != id_column && !SEASON_COLUMNS.contains(column))
        .collect();

    let mut index = AttributeIndex::new();
    for row in &ratings.rows {
        let Some(driver_id) = row.get(id_column).and_then(normalize_id) else {
            continue;
        };
        let attributes: Record = attribute_columns
            .iter()
            .map(|column| {
                let value = row.get(*column).cloned().unwrap_or(Value::Null);
                (column.to_string(), value)
            })
            .collect();
        index.insert(driver_id, attributes);
    }
    index
}

/// Indexes the season's contracts by driver id.
///
/// When a driver has several contract rows in the season the last row wins;
/// each override is reported as a warning.
pub fn team_index(mut contracts: SheetTable, season: i64) -> TeamIndex {
    filter_season(&mut contracts, season);

    let driver_column = resolve_column(&contracts, CONTRACT_DRIVER_COLUMNS);
    let team_column = resolve_column(&contracts, CONTRACT_TEAM_COLUMNS);
    let (Some(driver_column), Some(team_column)) = (driver_column, team_column) else {
        warn!(
            sheet = %contracts.sheet_name,
            "contracts sheet is missing its driver or team column; skipping team mapping"
        );
        return TeamIndex::new();
    };

    let mut index = TeamIndex::new();
    for row in &contracts.rows {
        let driver_id = row.get(driver_column).and_then(normalize_id);
        let team_id = row.get(team_column).and_then(normalize_id);
        let (Some(driver_id), Some(team_id)) = (driver_id, team_id) else {
            continue;
        };
        if let Some(previous) = index.insert(driver_id.clone(), team_id.clone()) {
            warn!(
                %driver_id,
                %previous,
                %team_id,
                season,
                "driver has more than one contract row for the season; keeping the later one"
            );
        }
    }
    index
}

fn merge(
    core: SheetTable,
    id_column: &'static str,
    attributes: &AttributeIndex,
    teams: &TeamIndex,
) -> Vec<Record> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut drivers = Vec::with_capacity(core.len());

    for (row_index, mut record) in core.rows.into_iter().enumerate() {
        let Some(driver_id) = record
            .get(id_column)
            .and_then(Value::as_str)
            .map(str::to_string)
        else {
            warn!(row_index, "dropping driver row without an id");
            continue;
        };
        if !seen.insert(driver_id.clone()) {
            warn!(row_index, %driver_id, "dropping repeated driver id");
            continue;
        }

        record.insert(DRIVER_ID.to_string(), Value::String(driver_id.clone()));
        if id_column != PLAIN_ID {
            record.shift_remove(PLAIN_ID);
        }
        if let Some(team_id) = teams.get(&driver_id) {
            record.insert(TEAM_ID.to_string(), Value::String(team_id.clone()));
        }
        if let Some(driver_attributes) = attributes.get(&driver_id) {
            record.insert(
                ATTRIBUTES.to_string(),
                Value::Object(driver_attributes.clone()),
            );
        }
        drivers.push(record);
    }

    drivers
}
