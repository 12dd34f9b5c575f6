//! # Compare
//!
//! Loads two configuration files, optionally validates both against a JSON
//! Schema, and emits the unified diff of their canonical forms.
//!
//! Every step runs once and in order: load file1, load file2, validate both,
//! diff, write. Load and validation failures abort the run. A failure to
//! write the diff is logged and the run still succeeds.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use cfgdiff_core::diff::DEFAULT_CONTEXT;
use cfgdiff_core::{diff_documents, load, write_diff, Destination, DiffOptions, FileFormat};
use cfgdiff_schema::SchemaValidator;

/// Arguments for a comparison run.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Path to the first configuration file.
    #[arg(value_name = "FILE1")]
    pub file1: PathBuf,

    /// Path to the second configuration file.
    #[arg(value_name = "FILE2")]
    pub file2: PathBuf,

    /// Type of configuration files.
    #[arg(long = "type", value_enum, default_value_t = FileFormat::Yaml)]
    pub format: FileFormat,

    /// Output file to write the diff to (default: stdout).
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Path to a JSON schema file to validate both files against.
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Number of context lines around each change.
    #[arg(long, short = 'U', default_value_t = DEFAULT_CONTEXT)]
    pub context: usize,
}

/// Execute a comparison.
///
/// Returns exit code 0 whenever the comparison completes. Errors are
/// returned for missing files, parse failures, and schema problems.
pub fn run_compare(args: &CompareArgs) -> Result<u8> {
    for path in [&args.file1, &args.file2] {
        if !path.exists() {
            bail!("file not found: {}", path.display());
        }
    }

    let first = load(&args.file1, args.format)?;
    let second = load(&args.file2, args.format)?;

    if let Some(schema_path) = args.schema.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        let validator = SchemaValidator::from_path(schema_path)?;
        tracing::debug!(schema = validator.name(), "schema compiled");
        for (path, document) in [(&args.file1, &first), (&args.file2, &second)] {
            validator
                .validate(document)
                .with_context(|| format!("configuration {} is invalid", path.display()))?;
        }
    }

    let options = DiffOptions {
        context: args.context,
        from_label: args.file1.display().to_string(),
        to_label: args.file2.display().to_string(),
    };
    let diff = diff_documents(&first, &second, &options);

    if diff.is_empty() {
        tracing::info!("configurations are identical");
    } else {
        let changed = diff.lines().iter().filter(|l| l.is_change()).count();
        tracing::debug!(
            hunks = diff.hunk_count(),
            changed,
            lines = diff.len(),
            "computed diff"
        );

        let destination = Destination::from_option(args.output.as_deref());
        match write_diff(diff.lines(), &destination) {
            Ok(()) => {
                if let Destination::File(path) = &destination {
                    tracing::info!("diff written to: {}", path.display());
                }
            }
            Err(e) => tracing::error!("{e}"),
        }
    }

    tracing::info!("configuration comparison completed");
    Ok(0)
}
