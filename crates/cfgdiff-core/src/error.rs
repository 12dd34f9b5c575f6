//! # Error Types
//!
//! Defines the error types raised by the comparison pipeline. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Load errors always name the file they concern.
//! - Parse errors carry the underlying parser's message verbatim, including
//!   its line and column.
//! - Write errors name the destination; the driver treats them as
//!   best-effort and does not abort on them.

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::FileFormat;

/// Error while loading a configuration document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The content is malformed for the declared format.
    #[error("invalid {format} file {origin}: {message}")]
    Parse {
        /// Where the content came from (a path, or a label for in-memory text).
        origin: String,
        /// Format the content was parsed as.
        format: FileFormat,
        /// Parser message, including location when the parser reports one.
        message: String,
    },

    /// The declared format has no loader.
    #[error("{format} format is not yet supported")]
    Unsupported {
        /// The unsupported format.
        format: FileFormat,
    },
}

/// Error writing diff output.
#[derive(Error, Debug)]
#[error("error writing diff to {destination}: {source}")]
pub struct WriteError {
    /// Human-readable destination (`stdout` or a path).
    pub destination: String,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}
