//! Shape checks for the documents the downstream application depends on.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::paddock::tools::config::outputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Object,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Object => value.is_object(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Object => "object",
        }
    }
}

/// Expectation for one field of every record in a document.
///
/// Optional fields may be absent or `null`; required fields must be present
/// with the expected kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(name: &'static str) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::String,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        name,
        kind,
        required: false,
    }
}

/// A document expected to hold an array of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSchema {
    pub file_name: &'static str,
    pub fields: &'static [FieldRule],
}

pub const DRIVERS_SCHEMA: DocumentSchema = DocumentSchema {
    file_name: outputs::DRIVERS,
    fields: &[
        required("driver_id"),
        optional("slug", FieldKind::String),
        required("first_name"),
        required("last_name"),
        optional("nationality", FieldKind::String),
        optional("birthdate", FieldKind::String),
        required("team_id"),
        optional("attributes", FieldKind::Object),
    ],
};

pub const TEAMS_SCHEMA: DocumentSchema = DocumentSchema {
    file_name: outputs::TEAMS,
    fields: &[
        required("team_id"),
        optional("name_official", FieldKind::String),
        required("name_common"),
        optional("short_name", FieldKind::String),
        optional("country", FieldKind::String),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub file: String,
    /// Position of the offending record; `None` for document-level problems.
    pub index: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedDocument {
    pub file: String,
    pub records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub checked: Vec<CheckedDocument>,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Checks `drivers.json` and `teams.json` in an output directory.
///
/// Unreadable or missing documents are reported as issues.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub fn validate_output_dir(dir: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    for schema in [DRIVERS_SCHEMA, TEAMS_SCHEMA] {
        let path = dir.join(schema.file_name);
        let document = match load_document(&path) {
            Ok(document) => document,
            Err(message) => {
                warn!(file = schema.file_name, %message, "document could not be checked");
                report.issues.push(ValidationIssue {
                    file: schema.file_name.to_string(),
                    index: None,
                    message,
                });
                continue;
            }
        };

        let issues = validate_document(schema.file_name, &document, &schema);
        let records = document.as_array().map(Vec::len).unwrap_or(0);
        info!(
            file = schema.file_name,
            records,
            issues = issues.len(),
            "checked document"
        );
        report.checked.push(CheckedDocument {
            file: schema.file_name.to_string(),
            records,
        });
        report.issues.extend(issues);
    }

    report
}

fn load_document(path: &Path) -> Result<Value, String> {
    let source = fs::read_to_string(path).map_err(|err| format!("cannot read: {err}"))?;
    serde_json::from_str(&source).map_err(|err| format!("invalid JSON: {err}"))
}

/// Checks a parsed document against its schema.
pub fn validate_document(file: &str, document: &Value, schema: &DocumentSchema) -> Vec<ValidationIssue> {
    let issue = |index: Option<usize>, message: String| ValidationIssue {
        file: file.to_string(),
        index,
        message,
    };

    let Some(records) = document.as_array() else {
        return vec![issue(None, "expected an array of records".to_string())];
    };

    let mut issues = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let Some(object) = record.as_object() else {
            issues.push(issue(Some(index), "expected an object".to_string()));
            continue;
        };
        for rule in schema.fields {
            match object.get(rule.name) {
                None if rule.required => {
                    issues.push(issue(
                        Some(index),
                        format!("missing required field '{}'", rule.name),
                    ));
                }
                None => {}
                Some(Value::Null) if !rule.required => {}
                Some(value) if rule.kind.accepts(value) => {}
                Some(_) => {
                    issues.push(issue(
                        Some(index),
                        format!("field '{}' must be of type {}", rule.name, rule.kind.name()),
                    ));
                }
            }
        }
    }
    issues
}
