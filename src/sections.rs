//! Loading and validating the JSON script.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

/// One named piece of the script. Becomes `<name>.<format>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub content: String,
}

/// An array element that was not a usable section.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSection {
    pub index: usize,
    pub raw: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionBatch {
    pub sections: Vec<Section>,
    pub skipped: Vec<SkippedSection>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON must be an array of objects with `name` and `content`")]
    Json(#[from] serde_json::Error),
    #[error("JSON must be an array of objects with `name` and `content`, found {found}")]
    NotAnArray { found: &'static str },
}

impl LoadError {
    /// `true` for errors about the file's contents rather than its access.
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, LoadError::Read { .. })
    }
}

/// Reads `path` and validates it with [`parse_sections`].
pub fn load_sections(path: impl AsRef<Path>) -> Result<SectionBatch, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_sections(&text)
}

/// Parses a JSON array of sections.
///
/// Only the top level is fatal. Elements without a non-empty string `name`
/// and `content` are logged and returned in [`SectionBatch::skipped`].
pub fn parse_sections(text: &str) -> Result<SectionBatch, LoadError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(LoadError::NotAnArray {
                found: kind_of(&other),
            })
        }
    };

    let mut batch = SectionBatch::default();
    for (index, item) in items.into_iter().enumerate() {
        match section_from_value(&item) {
            Some(section) => batch.sections.push(section),
            None => {
                warn!("Skipping invalid section at index {index}: {item}");
                batch.skipped.push(SkippedSection { index, raw: item });
            }
        }
    }
    Ok(batch)
}

fn section_from_value(value: &Value) -> Option<Section> {
    let non_empty = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };
    Some(Section {
        name: non_empty("name")?,
        content: non_empty("content")?,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
