//! # Unified Diff
//!
//! Line-based unified diff between the canonical forms of two documents.
//!
//! Edit scripts come from the Myers algorithm in the `similar` crate and are
//! grouped into hunks with a configurable amount of surrounding context. The
//! rendering follows the classic unified format:
//!
//! ```text
//! --- file1
//! +++ file2
//! @@ -1,3 +1,3 @@
//!  {
//! -    "a": 1
//! +    "a": 2
//!  }
//! ```
//!
//! Hunk ranges use the traditional conventions: a range covering exactly one
//! line omits its length (`-2`), and an empty range points at the line before
//! it with length zero (`-4,0`).

use std::fmt;
use std::ops::Range;

use similar::{Algorithm, DiffOp, DiffTag};

use crate::canonical::CanonicalText;
use crate::document::Document;

/// Default number of context lines around each change.
pub const DEFAULT_CONTEXT: usize = 3;

/// Options controlling diff rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Unchanged lines shown before and after each change.
    pub context: usize,
    /// Label for the `---` header.
    pub from_label: String,
    /// Label for the `+++` header.
    pub to_label: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context: DEFAULT_CONTEXT,
            from_label: "file1".to_string(),
            to_label: "file2".to_string(),
        }
    }
}

impl DiffOptions {
    /// Options with the given header labels and default context.
    pub fn with_labels(from_label: impl Into<String>, to_label: impl Into<String>) -> Self {
        Self {
            from_label: from_label.into(),
            to_label: to_label.into(),
            ..Self::default()
        }
    }
}

/// Line range of a hunk on one side, rendered in unified-diff notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    /// Zero-based index of the first line.
    pub start: usize,
    /// Number of lines covered.
    pub len: usize,
}

impl From<Range<usize>> for HunkRange {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            len: range.end.saturating_sub(range.start),
        }
    }
}

impl fmt::Display for HunkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.len {
            1 => write!(f, "{}", self.start + 1),
            // An empty range names the line just before it.
            0 => write!(f, "{},0", self.start),
            len => write!(f, "{},{}", self.start + 1, len),
        }
    }
}

/// `@@ -a,b +c,d @@` header opening a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    /// Lines of the old text covered by the hunk.
    pub old: HunkRange,
    /// Lines of the new text covered by the hunk.
    pub new: HunkRange,
}

impl fmt::Display for HunkHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@@ -{} +{} @@", self.old, self.new)
    }
}

/// One line of unified diff output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// `--- label`
    FromHeader(String),
    /// `+++ label`
    ToHeader(String),
    /// `@@ ... @@`
    Hunk(HunkHeader),
    /// Unchanged line, prefixed with a space.
    Context(String),
    /// Line only in the old text, prefixed with `-`.
    Removed(String),
    /// Line only in the new text, prefixed with `+`.
    Added(String),
}

impl DiffLine {
    /// True for `-` and `+` lines.
    pub fn is_change(&self) -> bool {
        matches!(self, DiffLine::Removed(_) | DiffLine::Added(_))
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::FromHeader(label) => write!(f, "--- {label}"),
            DiffLine::ToHeader(label) => write!(f, "+++ {label}"),
            DiffLine::Hunk(header) => write!(f, "{header}"),
            DiffLine::Context(line) => write!(f, " {line}"),
            DiffLine::Removed(line) => write!(f, "-{line}"),
            DiffLine::Added(line) => write!(f, "+{line}"),
        }
    }
}

/// An ordered sequence of diff lines. Empty when the inputs are identical.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnifiedDiff {
    lines: Vec<DiffLine>,
}

impl UnifiedDiff {
    /// True when the compared texts are identical.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of output lines, headers included.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// All output lines in order.
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// Number of hunks.
    pub fn hunk_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Hunk(_)))
            .count()
    }

    /// Lines removed from the old text, without markers.
    pub fn removed(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                DiffLine::Removed(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Lines added in the new text, without markers.
    pub fn added(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                DiffLine::Added(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Render every line as text, markers included.
    pub fn to_lines(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

impl IntoIterator for UnifiedDiff {
    type Item = DiffLine;
    type IntoIter = std::vec::IntoIter<DiffLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl fmt::Display for UnifiedDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Canonicalize two documents and diff their canonical text.
pub fn diff_documents(old: &Document, new: &Document, options: &DiffOptions) -> UnifiedDiff {
    let old_text = CanonicalText::new(old);
    let new_text = CanonicalText::new(new);
    diff_texts(&old_text, &new_text, options)
}

/// Unified diff between two canonical texts.
pub fn diff_texts(old: &CanonicalText, new: &CanonicalText, options: &DiffOptions) -> UnifiedDiff {
    let old_lines = old.lines();
    let new_lines = new.lines();

    let ops = similar::capture_diff_slices(Algorithm::Myers, &old_lines, &new_lines);
    if ops.iter().all(|op| op.tag() == DiffTag::Equal) {
        return UnifiedDiff::default();
    }

    let mut lines = vec![
        DiffLine::FromHeader(options.from_label.clone()),
        DiffLine::ToHeader(options.to_label.clone()),
    ];

    for group in similar::group_diff_ops(ops, options.context) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        lines.push(DiffLine::Hunk(HunkHeader {
            old: HunkRange::from(first.old_range().start..last.old_range().end),
            new: HunkRange::from(first.new_range().start..last.new_range().end),
        }));

        for op in &group {
            push_op_lines(&mut lines, op, &old_lines, &new_lines);
        }
    }

    UnifiedDiff { lines }
}

fn push_op_lines(lines: &mut Vec<DiffLine>, op: &DiffOp, old: &[&str], new: &[&str]) {
    let (tag, old_range, new_range) = op.as_tag_tuple();
    match tag {
        DiffTag::Equal => {
            lines.extend(old[old_range].iter().map(|l| DiffLine::Context(l.to_string())));
        }
        DiffTag::Delete => {
            lines.extend(old[old_range].iter().map(|l| DiffLine::Removed(l.to_string())));
        }
        DiffTag::Insert => {
            lines.extend(new[new_range].iter().map(|l| DiffLine::Added(l.to_string())));
        }
        DiffTag::Replace => {
            lines.extend(old[old_range].iter().map(|l| DiffLine::Removed(l.to_string())));
            lines.extend(new[new_range].iter().map(|l| DiffLine::Added(l.to_string())));
        }
    }
}
