//! # cfgdiff-cli — Configuration Comparison CLI
//!
//! Provides the `cfgdiff` command:
//!
//! ```bash
//! cfgdiff old.yaml new.yaml
//! cfgdiff old.json new.json --type json --schema service.schema.json -o changes.diff
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the pipeline; [`compare::run_compare`]
//!   only sequences calls into `cfgdiff-core` and `cfgdiff-schema`.
//! - Diff output goes to stdout or a file; logs always go to stderr.
//! - Exit codes: 0 when the comparison ran (with or without differences),
//!   1 on any load, parse or validation failure.

pub mod compare;
pub mod logging;
