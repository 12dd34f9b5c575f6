//! # Document Loader
//!
//! Reads a configuration file in a declared format and parses it into a
//! [`Document`]. Parsing is all-or-nothing: any syntax error aborts the load
//! and the parser's own message (with line and column) is returned.
//!
//! ## YAML Conversion
//!
//! YAML has a richer type system than JSON. Documents are converted into the
//! JSON-shaped [`Document`] model as follows:
//!
//! 1. Scalar mapping keys become strings (`1` → `"1"`, `true` → `"true"`,
//!    `~` → `"null"`). Sequence or mapping keys are rejected.
//! 2. Tags are ignored; the tagged value is converted.
//! 3. Non-finite floats (`.nan`, `.inf`) are rejected, as they have no
//!    literal form in canonical output.
//! 4. An empty file loads as `null`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;
use crate::error::LoadError;

/// Declared format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// JSON (RFC 8259).
    Json,
    /// YAML 1.2, single document.
    #[default]
    Yaml,
    /// INI. Accepted on the command line, never loadable.
    Ini,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileFormat::Json => "JSON",
            FileFormat::Yaml => "YAML",
            FileFormat::Ini => "INI",
        })
    }
}

/// Load a configuration file from disk.
///
/// # Errors
///
/// - `LoadError::Unsupported` for [`FileFormat::Ini`], without touching the file.
/// - `LoadError::NotFound` if `path` does not exist.
/// - `LoadError::Read` for any other I/O failure.
/// - `LoadError::Parse` if the content is malformed for `format`.
pub fn load(path: &Path, format: FileFormat) -> Result<Document, LoadError> {
    if format == FileFormat::Ini {
        return Err(LoadError::Unsupported { format });
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let document = load_str(&content, format, &path.display().to_string())?;

    tracing::debug!(
        path = %path.display(),
        %format,
        kind = document.kind(),
        "loaded document"
    );

    Ok(document)
}

/// Parse in-memory text in the declared format.
///
/// `origin` names the content in error messages; [`load`] passes the file path.
pub fn load_str(content: &str, format: FileFormat, origin: &str) -> Result<Document, LoadError> {
    let parse_error = |message: String| LoadError::Parse {
        origin: origin.to_string(),
        format,
        message,
    };

    let value = match format {
        FileFormat::Json => {
            serde_json::from_str::<Value>(content).map_err(|e| parse_error(e.to_string()))?
        }
        FileFormat::Yaml => {
            if content.trim().is_empty() {
                Value::Null
            } else {
                let mut yaml: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
                yaml.apply_merge().map_err(|e| parse_error(e.to_string()))?;
                yaml_to_json_value(&yaml).map_err(parse_error)?
            }
        }
        FileFormat::Ini => return Err(LoadError::Unsupported { format }),
    };

    Ok(Document::from_value(value))
}

/// Convert a `serde_yaml::Value` tree into the equivalent JSON value tree.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent non-finite number {n} as a document value"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                json_map.insert(yaml_key_to_string(k)?, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

fn yaml_key_to_string(key: &serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key_to_string(&tagged.value),
        other => Err(format!("unsupported YAML mapping key: {other:?}")),
    }
}
