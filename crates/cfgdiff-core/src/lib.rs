//! # cfgdiff-core — Configuration Comparison Pipeline
//!
//! This crate holds everything `cfgdiff` does between reading two files and
//! printing their differences. The binary in `cfgdiff-cli` only parses
//! arguments and sequences these stages.
//!
//! ## Pipeline
//!
//! 1. [`loader`] parses a JSON or YAML file into a [`Document`].
//! 2. [`canonical`] serializes a `Document` into [`CanonicalText`]: sorted
//!    keys, 4-space indentation, ASCII-only literals.
//! 3. [`diff`] computes a [`UnifiedDiff`] between two canonical texts.
//! 4. [`sink`] writes the diff lines to a file or standard output.
//!
//! ## Key Design Principles
//!
//! 1. **Key order never shows up in a diff.** Canonicalization sorts mapping
//!    keys at every level, so reordering keys in a source file is invisible.
//!
//! 2. **`CanonicalText` newtype.** All diffing flows through
//!    `CanonicalText::new()`. There is no way to diff raw `serde_json`
//!    output, which would depend on map ordering features.
//!
//! 3. **Documents are immutable.** A [`Document`] is produced by the loader
//!    and only ever borrowed afterwards.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cfgdiff-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod diff;
pub mod document;
pub mod error;
pub mod loader;
pub mod sink;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalText;
pub use diff::{diff_documents, diff_texts, DiffLine, DiffOptions, HunkHeader, UnifiedDiff};
pub use document::Document;
pub use error::{LoadError, WriteError};
pub use loader::{load, load_str, FileFormat};
pub use sink::{write_diff, write_lines, Destination};
