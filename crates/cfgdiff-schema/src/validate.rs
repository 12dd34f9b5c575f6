//! # Schema Validation
//!
//! Validation of configuration documents against a JSON Schema file.
//!
//! ## Draft Selection
//!
//! The draft is taken from the schema's `$schema` keyword; schemas without
//! one are validated under the latest draft the `jsonschema` crate supports.
//!
//! ## Reference Resolution
//!
//! Cross-file `$ref`s are resolved by [`LocalFileRetriever`]:
//!
//! - `file://` URIs are read from disk as-is.
//! - Relative references (which the `jsonschema` crate roots at
//!   `json-schema:///`) are read relative to the schema file's directory.
//! - Anything else (http, https, urn) is refused.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

use cfgdiff_core::Document;

/// Base URI the `jsonschema` crate assigns to schemas without an `$id`.
const DEFAULT_BASE_URI: &str = "json-schema:///";
const FILE_URI_PREFIX: &str = "file://";

/// Resolves `$ref` URIs to schema files on the local filesystem.
struct LocalFileRetriever {
    /// Directory relative references are resolved against.
    base_dir: Option<PathBuf>,
}

impl Retrieve for LocalFileRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        let path = if let Some(rest) = uri_str.strip_prefix(FILE_URI_PREFIX) {
            PathBuf::from(rest)
        } else if let Some(rest) = uri_str.strip_prefix(DEFAULT_BASE_URI) {
            match &self.base_dir {
                Some(dir) => dir.join(rest),
                None => PathBuf::from(rest),
            }
        } else {
            return Err(format!("remote schema references are not supported: {uri_str}").into());
        };

        tracing::debug!(uri = uri_str, path = %path.display(), "resolving schema reference");

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read referenced schema {}: {e}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| format!("invalid JSON in referenced schema {}: {e}", path.display()))?;
        Ok(value)
    }
}

/// Error during schema loading or validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema file does not exist.
    #[error("schema file not found: {}", path.display())]
    SchemaNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The schema file exists but could not be read.
    #[error("cannot read schema file {}: {source}", path.display())]
    SchemaRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid JSON.
    #[error("invalid JSON schema file {}: {reason}", path.display())]
    SchemaParse {
        /// Path of the schema file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The schema is valid JSON but not a usable JSON Schema.
    #[error("invalid schema '{schema}': {reason}")]
    InvalidSchema {
        /// Name of the schema.
        schema: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled JSON Schema, ready to validate any number of documents.
pub struct SchemaValidator {
    /// Schema name used in messages (the file path when loaded from disk).
    name: String,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Load a JSON schema file and compile it.
    ///
    /// Relative `$ref`s resolve against the schema file's directory.
    ///
    /// # Errors
    ///
    /// - `SchemaNotFound` if `path` does not exist.
    /// - `SchemaRead` for other I/O failures.
    /// - `SchemaParse` if the file is not valid JSON.
    /// - `InvalidSchema` if the JSON is not a valid schema or a `$ref`
    ///   cannot be resolved.
    pub fn from_path(path: &Path) -> Result<Self, SchemaValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SchemaValidationError::SchemaNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                SchemaValidationError::SchemaRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let schema: Value =
            serde_json::from_str(&content).map_err(|e| SchemaValidationError::SchemaParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok());

        Self::build(&schema, path.display().to_string(), base_dir)
    }

    /// Compile an in-memory schema. Relative `$ref`s resolve against the
    /// current directory.
    pub fn from_value(schema: &Value, name: impl Into<String>) -> Result<Self, SchemaValidationError> {
        Self::build(schema, name.into(), None)
    }

    fn build(
        schema: &Value,
        name: String,
        base_dir: Option<PathBuf>,
    ) -> Result<Self, SchemaValidationError> {
        let mut opts = jsonschema::options();
        opts.with_retriever(LocalFileRetriever { base_dir });

        let validator = opts
            .build(schema)
            .map_err(|e| SchemaValidationError::InvalidSchema {
                schema: name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(schema = %name, "compiled schema");
        Ok(Self { name, validator })
    }

    /// Schema name used in messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate a document against the compiled schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with every violation
    /// the schema reports.
    pub fn validate(&self, document: &Document) -> Result<(), SchemaValidationError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(document.as_value())
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            tracing::info!(schema = %self.name, "configuration is valid against the schema");
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema: self.name.clone(),
                violations: ValidationViolations { violations },
            })
        }
    }
}

/// Validate `document` against the schema at `schema_path`.
///
/// Validation is opt-in: `None` or an empty path always succeeds.
pub fn validate(document: &Document, schema_path: Option<&Path>) -> Result<(), SchemaValidationError> {
    match schema_path {
        Some(path) if !path.as_os_str().is_empty() => {
            SchemaValidator::from_path(path)?.validate(document)
        }
        _ => Ok(()),
    }
}
