//! Loads and validates the page descriptions from the data file.
//!
//! Two top-level shapes are accepted:
//!
//! ```text
//! [ { "title": ..., "description": ..., "path": ... }, ... ]
//! { "items": [ { ... }, ... ] }
//! ```

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::model::Document;
use crate::{Error, Result};

/// Reads, parses and validates the data file at `path`.
///
/// Relative paths are resolved against the current working directory.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file is missing or unreadable,
/// [`Error::Parse`] if it is not JSON, [`Error::Schema`] if the shape is
/// wrong and [`Error::Validation`] for the first document missing a field.
pub async fn load(path: &Path) -> Result<Vec<Document>> {
    let path = absolute(path)?;
    tracing::info!(path = %path.display(), "reading data file");

    let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
        let message = if e.kind() == std::io::ErrorKind::NotFound {
            "File not found"
        } else {
            "Cannot read data file"
        };
        Error::io(message, path.clone(), e)
    })?;

    parse(&text, &path)
}

/// Parses and validates data file text; `origin` is only used in messages.
///
/// # Errors
///
/// Same as [`load`], minus the I/O failures.
pub fn parse(text: &str, origin: &Path) -> Result<Vec<Document>> {
    let value: Value = serde_json::from_str(text).map_err(|source| Error::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(Error::Schema(format!(
                    "Invalid data format: 'items' must be an array. Found: {}",
                    type_name(&other)
                )))
            }
            None => {
                return Err(Error::Schema(
                    "Data file must contain an array of documents or an 'items' array. Found: object"
                        .to_string(),
                ))
            }
        },
        other => {
            return Err(Error::Schema(format!(
                "Data file must contain an array of documents. Found: {}",
                type_name(&other)
            )))
        }
    };

    if items.is_empty() {
        return Err(Error::Schema("Data file contains an empty array".to_string()));
    }

    let mut docs = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(Error::Schema(format!(
                "Document {index} must be an object. Found: {}",
                type_name(&item)
            )));
        }
        let doc: Document = serde_json::from_value(item)
            .map_err(|e| Error::Schema(format!("Document {index}: {e}")))?;
        doc.validate(index)?;
        docs.push(doc);
    }

    tracing::debug!(count = docs.len(), "documents validated");
    Ok(docs)
}

/// JSON type name as reported in schema errors.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolves `path` against the working directory without touching the filesystem.
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| Error::io("Cannot resolve path", path.to_path_buf(), e))
}
