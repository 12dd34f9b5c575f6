//! # Document Model
//!
//! A [`Document`] is the parsed form of one configuration file: null, a
//! boolean, a number, a string, a sequence of documents, or a mapping from
//! string keys to documents. It is a newtype over `serde_json::Value`, which
//! is exactly that tagged union, so the validator can hand it to the
//! `jsonschema` crate without conversion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A loaded configuration document.
///
/// # Invariants
///
/// - The inner value is private and never mutated after construction.
/// - Mapping keys are unique strings.
/// - Numbers are finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    /// Wrap an already-parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying value tree.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the document and return the underlying value tree.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Short name of the top-level kind, for log fields.
    pub fn kind(&self) -> &'static str {
        match &self.0 {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "sequence",
            Value::Object(_) => "mapping",
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
