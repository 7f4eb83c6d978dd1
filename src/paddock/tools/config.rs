use std::path::{Path, PathBuf};

/// Season every season-aware export is filtered to unless overridden.
pub const TARGET_SEASON: i64 = 1980;
/// Workbook read when no input path is given.
pub const DEFAULT_WORKBOOK: &str = "database.xlsx";
/// Directory receiving the JSON documents.
pub const DEFAULT_OUTPUT_DIR: &str = "data";
/// Subdirectory of the output directory reserved for seed documents.
pub const SEEDS_DIR: &str = "seeds";

/// Names of the sheets the normaliser recognises.
pub mod sheets {
    pub const TEAMS: &str = "teams_core";
    pub const STAFF: &str = "staff_core";
    pub const TRACKS: &str = "core_tracks";
    pub const CALENDAR: &str = "calendar";
    pub const RULES: &str = "rules";
    pub const DRIVER_ATTRIBUTES: &str = "core_driver_attributes";
    pub const STAFF_ATTRIBUTES: &str = "core_staff_attributes";
    pub const DRIVER_CORE: &str = "driver_core";
    pub const DRIVER_RATINGS: &str = "driver_ratings";
    pub const CONTRACTS: &str = "contracts";
}

/// Settings for a single ingest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub workbook: PathBuf,
    pub output_dir: PathBuf,
    pub season: i64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from(DEFAULT_WORKBOOK),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            season: TARGET_SEASON,
        }
    }
}

impl IngestConfig {
    pub fn new(workbook: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, season: i64) -> Self {
        Self {
            workbook: workbook.into(),
            output_dir: output_dir.into(),
            season,
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn seeds_dir(&self) -> PathBuf {
        self.output_dir.join(SEEDS_DIR)
    }

    pub fn workbook_path(&self) -> &Path {
        &self.workbook
    }
}

/// File names of the exported documents.
pub mod outputs {
    pub const TEAMS: &str = "teams.json";
    pub const STAFF: &str = "staff.json";
    pub const TRACKS: &str = "tracks.json";
    pub const RULES_ALL: &str = "rules_all.json";
    pub const DRIVER_ATTRIBUTES: &str = "attributes_driver.json";
    pub const STAFF_ATTRIBUTES: &str = "attributes_staff.json";
    pub const DRIVERS: &str = "drivers.json";

    pub fn calendar(season: i64) -> String {
        format!("calendar_{season}.json")
    }

    pub fn rules(season: i64) -> String {
        format!("rules_{season}.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_the_database_workbook() {
        let config = IngestConfig::default();
        assert_eq!(config.workbook_path(), Path::new("database.xlsx"));
        assert_eq!(config.season, 1980);
        assert_eq!(config.output_path(outputs::DRIVERS), Path::new("data/drivers.json"));
        assert_eq!(config.seeds_dir(), Path::new("data/seeds"));
        assert_eq!(outputs::calendar(1981), "calendar_1981.json");
    }
}
