use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::paddock::tools::error::Result;

/// Writes `value` as two-space indented UTF-8 JSON, creating parent
/// directories as needed. Non-ASCII text is written literally.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json_string = serde_json::to_string_pretty(value)?;
    fs::write(path, json_string)?;
    Ok(())
}
