use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::paddock::tools::config::{IngestConfig, outputs, sheets};
use crate::paddock::tools::error::{Result, ToolError};
use crate::paddock::tools::export::{
    attribute_dictionary, compose_drivers, passthrough_records, rules_export, season_rows,
    team_records,
};
use crate::paddock::tools::io::excel_read::ExcelWorkbook;
use crate::paddock::tools::io::json_write::write_json;
use crate::paddock::tools::model::{Record, SheetTable};

/// A JSON document produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub records: usize,
}

/// What happened to one export during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Written(Vec<WrittenFile>),
    /// The source sheet (or a column the export needs) is missing.
    Skipped(String),
    /// The export aborted; no file was written for it.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub export: &'static str,
    pub status: ExportStatus,
}

impl ExportOutcome {
    fn written(export: &'static str, files: Vec<WrittenFile>) -> Self {
        Self {
            export,
            status: ExportStatus::Written(files),
        }
    }

    fn skipped(export: &'static str, reason: String) -> Self {
        warn!(export, "{reason}");
        Self {
            export,
            status: ExportStatus::Skipped(reason),
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self.status, ExportStatus::Written(_))
    }
}

/// Summary of an ingest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub sheets: Vec<String>,
    pub outcomes: Vec<ExportOutcome>,
}

impl IngestReport {
    pub fn outcome(&self, export: &str) -> Option<&ExportOutcome> {
        self.outcomes.iter().find(|outcome| outcome.export == export)
    }

    pub fn written_files(&self) -> impl Iterator<Item = &WrittenFile> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match &outcome.status {
                ExportStatus::Written(files) => Some(files),
                _ => None,
            })
            .flatten()
    }
}

/// Export names used in outcomes and log events.
pub mod exports {
    pub const TEAMS: &str = "teams";
    pub const STAFF: &str = "staff";
    pub const TRACKS: &str = "tracks";
    pub const CALENDAR: &str = "calendar";
    pub const RULES: &str = "rules";
    pub const DRIVER_ATTRIBUTES: &str = "driver_attributes";
    pub const STAFF_ATTRIBUTES: &str = "staff_attributes";
    pub const DRIVERS: &str = "drivers";
}

/// Reads the workbook once and writes every export it can produce.
///
/// Only a missing workbook or a failure to write output is an error; missing
/// sheets and columns are reported through the returned outcomes.
#[instrument(
    level = "info",
    skip_all,
    fields(
        input = %config.workbook.display(),
        output = %config.output_dir.display(),
        season = config.season
    )
)]
pub fn ingest_workbook(config: &IngestConfig) -> Result<IngestReport> {
    let mut workbook = ExcelWorkbook::open(config.workbook_path())?;
    fs::create_dir_all(&config.output_dir)?;
    fs::create_dir_all(config.seeds_dir())?;

    let sheets = workbook.sheet_names();
    info!(?sheets, "opened workbook");

    let outcomes = vec![
        export_teams(&mut workbook, config)?,
        export_staff(&mut workbook, config)?,
        export_tracks(&mut workbook, config)?,
        export_calendar(&mut workbook, config)?,
        export_rules(&mut workbook, config)?,
        export_attributes(
            &mut workbook,
            config,
            exports::DRIVER_ATTRIBUTES,
            sheets::DRIVER_ATTRIBUTES,
            outputs::DRIVER_ATTRIBUTES,
        )?,
        export_attributes(
            &mut workbook,
            config,
            exports::STAFF_ATTRIBUTES,
            sheets::STAFF_ATTRIBUTES,
            outputs::STAFF_ATTRIBUTES,
        )?,
        export_drivers(&mut workbook, config)?,
    ];

    Ok(IngestReport { sheets, outcomes })
}

fn export_teams(workbook: &mut ExcelWorkbook, config: &IngestConfig) -> Result<ExportOutcome> {
    export_sheet(workbook, config, exports::TEAMS, sheets::TEAMS, outputs::TEAMS, team_records)
}

fn export_staff(workbook: &mut ExcelWorkbook, config: &IngestConfig) -> Result<ExportOutcome> {
    export_sheet(
        workbook,
        config,
        exports::STAFF,
        sheets::STAFF,
        outputs::STAFF,
        passthrough_records,
    )
}

fn export_tracks(workbook: &mut ExcelWorkbook, config: &IngestConfig) -> Result<ExportOutcome> {
    export_sheet(
        workbook,
        config,
        exports::TRACKS,
        sheets::TRACKS,
        outputs::TRACKS,
        passthrough_records,
    )
}

fn export_sheet(
    workbook: &mut ExcelWorkbook,
    config: &IngestConfig,
    export: &'static str,
    sheet: &str,
    file_name: &str,
    transform: fn(SheetTable) -> Vec<Record>,
) -> Result<ExportOutcome> {
    let Some(table) = workbook.read_table(sheet)? else {
        return Ok(missing_sheet(export, sheet));
    };
    let records = transform(table);
    let file = write_records(config, file_name, &records, records.len())?;
    Ok(ExportOutcome::written(export, vec![file]))
}

fn export_calendar(workbook: &mut ExcelWorkbook, config: &IngestConfig) -> Result<ExportOutcome> {
    let Some(table) = workbook.read_table(sheets::CALENDAR)? else {
        return Ok(missing_sheet(exports::CALENDAR, sheets::CALENDAR));
    };
    let rows = season_rows(table, config.season);
    if !rows.is_filtered() {
        warn!(
            sheet = sheets::CALENDAR,
            "no season/year column; exporting every row"
        );
    }
    let file = write_records(
        config,
        &outputs::calendar(config.season),
        &rows.records,
        rows.records.len(),
    )?;
    Ok(ExportOutcome::written(exports::CALENDAR, vec![file]))
}

fn export_rules(workbook: &mut ExcelWorkbook, config: &IngestConfig) -> Result<ExportOutcome> {
    let Some(table) = workbook.read_table(sheets::RULES)? else {
        return Ok(missing_sheet(exports::RULES, sheets::RULES));
    };
    let rules = rules_export(table, config.season);

    let mut files = Vec::with_capacity(2);
    match &rules.season {
        Some(records) => {
            files.push(write_records(
                config,
                &outputs::rules(config.season),
                records,
                records.len(),
            )?);
        }
        None => warn!(
            sheet = sheets::RULES,
            "no season/year column; writing only the all-seasons export"
        ),
    }
    files.push(write_records(
        config,
        outputs::RULES_ALL,
        &rules.all,
        rules.all.len(),
    )?);
    Ok(ExportOutcome::written(exports::RULES, files))
}

fn export_attributes(
    workbook: &mut ExcelWorkbook,
    config: &IngestConfig,
    export: &'static str,
    sheet: &str,
    file_name: &str,
) -> Result<ExportOutcome> {
    let Some(table) = workbook.read_table(sheet)? else {
        return Ok(missing_sheet(export, sheet));
    };
    let dictionary = attribute_dictionary(&table);
    let file = write_records(config, file_name, &dictionary, dictionary.len())?;
    Ok(ExportOutcome::written(export, vec![file]))
}

fn export_drivers(workbook: &mut ExcelWorkbook, config: &IngestConfig) -> Result<ExportOutcome> {
    let missing: Vec<&str> = [sheets::DRIVER_CORE, sheets::DRIVER_RATINGS, sheets::CONTRACTS]
        .into_iter()
        .filter(|sheet| !workbook.has_sheet(sheet))
        .collect();
    if !missing.is_empty() {
        warn!(?missing, "drivers export may be partial");
    }

    let Some(core) = workbook.read_table(sheets::DRIVER_CORE)? else {
        return Ok(missing_sheet(exports::DRIVERS, sheets::DRIVER_CORE));
    };
    let ratings = workbook.read_table(sheets::DRIVER_RATINGS)?;
    if ratings.is_none() {
        warn!(sheet = sheets::DRIVER_RATINGS, "sheet not found; skipping attributes");
    }
    let contracts = workbook.read_table(sheets::CONTRACTS)?;
    if contracts.is_none() {
        warn!(sheet = sheets::CONTRACTS, "sheet not found; skipping team mapping");
    }

    match compose_drivers(core, ratings, contracts, config.season) {
        Ok(drivers) => {
            let file = write_records(config, outputs::DRIVERS, &drivers, drivers.len())?;
            Ok(ExportOutcome::written(exports::DRIVERS, vec![file]))
        }
        Err(err @ ToolError::MissingIdColumn { .. }) => {
            error!(%err, "aborting drivers export");
            Ok(ExportOutcome {
                export: exports::DRIVERS,
                status: ExportStatus::Failed(err.to_string()),
            })
        }
        Err(other) => Err(other),
    }
}

fn missing_sheet(export: &'static str, sheet: &str) -> ExportOutcome {
    ExportOutcome::skipped(export, format!("sheet '{sheet}' not found; skipping {export}"))
}

fn write_records<T: Serialize + ?Sized>(
    config: &IngestConfig,
    file_name: &str,
    value: &T,
    records: usize,
) -> Result<WrittenFile> {
    let path = config.output_path(file_name);
    write_json(&path, value)?;
    info!(file = %path.display(), records, "wrote export");
    Ok(WrittenFile { path, records })
}
