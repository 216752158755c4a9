//! Dataset files: grouped raw records in YAML or JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::record::RawRecord;

/// Grouped raw records, one inner list per component row-group.
///
/// `engine` holds an optional engine configuration block, kept untyped here
/// since the typed configuration belongs to the engine crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<serde_yaml::Value>,
    #[serde(default)]
    pub groups: Vec<Vec<RawRecord>>,
}

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> DataResult<Format> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

pub fn load_dataset(path: &Path) -> DataResult<Dataset> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path)?;
    let dataset = match format {
        Format::Yaml => serde_yaml::from_str(&content)?,
        Format::Json => serde_json::from_str(&content)?,
    };
    Ok(dataset)
}

pub fn save_dataset(path: &Path, dataset: &Dataset) -> DataResult<()> {
    let content = match format_of(path)? {
        Format::Yaml => serde_yaml::to_string(dataset)?,
        Format::Json => serde_json::to_string_pretty(dataset)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}
