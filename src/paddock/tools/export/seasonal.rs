use crate::paddock::tools::columns::filter_season;
use crate::paddock::tools::model::{Record, SheetTable};

/// Rows of a season-aware sheet after filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRows {
    /// Season column the filter ran on; `None` means the rows are unfiltered.
    pub season_column: Option<&'static str>,
    pub records: Vec<Record>,
}

impl SeasonRows {
    pub fn is_filtered(&self) -> bool {
        self.season_column.is_some()
    }
}

/// Keeps the rows of `season`, or every row when the sheet has no season column.
pub fn season_rows(mut table: SheetTable, season: i64) -> SeasonRows {
    let season_column = filter_season(&mut table, season);
    SeasonRows {
        season_column,
        records: table.into_records(),
    }
}

/// Rules for one season plus the full, unfiltered sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RulesExport {
    /// `None` when the sheet has no season column.
    pub season: Option<Vec<Record>>,
    pub all: Vec<Record>,
}

pub fn rules_export(table: SheetTable, season: i64) -> RulesExport {
    let all = table.rows.clone();
    let filtered = season_rows(table, season);
    RulesExport {
        season: filtered.is_filtered().then_some(filtered.records),
        all,
    }
}
