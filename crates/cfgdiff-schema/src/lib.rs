//! # cfgdiff-schema — Schema Validation
//!
//! Optional JSON Schema validation of loaded configuration documents.
//!
//! - [`validate()`] is the one-shot entry point: it does nothing when no
//!   schema path is given, otherwise loads the schema and validates.
//! - [`SchemaValidator`] compiles a schema once so both compared documents
//!   can be checked against it.
//!
//! ## Crate Policy
//!
//! - Depends only on `cfgdiff-core` internally.
//! - Schema problems (missing, unparsable, not a valid schema) are reported
//!   as distinct errors from validation failures.
//! - `$ref`s are resolved from the local filesystem only; the tool never
//!   touches the network.

pub mod validate;

pub use validate::{
    validate, SchemaValidationError, SchemaValidator, ValidationViolations, Violation,
};
