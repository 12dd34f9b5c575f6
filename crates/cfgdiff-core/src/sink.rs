//! # Diff Output
//!
//! Writes diff lines, one per line with a trailing newline, either to a file
//! (truncated or created) or to standard output.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::WriteError;

/// Where diff output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The process's standard output.
    Stdout,
    /// A file, truncated if it exists.
    File(PathBuf),
}

impl Destination {
    /// `File(path)` when a path is given, `Stdout` otherwise.
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Destination::File(p.to_path_buf()),
            None => Destination::Stdout,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("stdout"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Write every line followed by `\n`, then flush.
pub fn write_lines<I, L, W>(lines: I, mut writer: W) -> io::Result<()>
where
    I: IntoIterator<Item = L>,
    L: fmt::Display,
    W: Write,
{
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

/// Write diff lines to `destination`.
///
/// # Errors
///
/// Returns `WriteError` naming the destination if the file cannot be created
/// or any write fails.
pub fn write_diff<I, L>(lines: I, destination: &Destination) -> Result<(), WriteError>
where
    I: IntoIterator<Item = L>,
    L: fmt::Display,
{
    let result = match destination {
        Destination::Stdout => write_lines(lines, io::stdout().lock()),
        Destination::File(path) => {
            File::create(path).and_then(|file| write_lines(lines, BufWriter::new(file)))
        }
    };

    result.map_err(|source| WriteError {
        destination: destination.to_string(),
        source,
    })
}
