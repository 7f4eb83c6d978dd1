//! Entity-specific normalisation. Each function takes a sheet already read
//! into memory and returns the JSON-ready records for one output document.

pub mod attributes;
pub mod drivers;
pub mod passthrough;
pub mod seasonal;

pub use attributes::attribute_dictionary;
pub use drivers::compose_drivers;
pub use passthrough::{passthrough_records, team_records};
pub use seasonal::{RulesExport, SeasonRows, rules_export, season_rows};
