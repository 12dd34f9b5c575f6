//! # Canonical Serialization — Deterministic Indented Text
//!
//! This module defines `CanonicalText`, the sole construction path for the
//! text that gets diffed.
//!
//! ## Invariant
//!
//! The `CanonicalText` newtype has a private inner field. The only way to
//! construct it is through `CanonicalText::new()`, which applies the full
//! canonical encoding below. Two documents that differ only in mapping key
//! order therefore always produce byte-identical text.
//!
//! ## Encoding Rules
//!
//! 1. **Sorted keys** — mapping keys in ascending Unicode code point order,
//!    at every nesting level.
//! 2. **Sequences keep their order** — element order is significant.
//! 3. **Fixed layout** — one member per line, 4 spaces of indentation per
//!    level, `": "` between key and value, `","` after every member but the
//!    last. Empty containers are written inline as `{}` and `[]`.
//! 4. **Stable literals** — `null`, `true`, `false`; numbers in serde_json's
//!    shortest round-trip form (`1`, `-7`, `1.5`, `1.0`).
//! 5. **ASCII-only strings** — JSON escapes for quotes, backslashes and
//!    control characters; every character outside printable ASCII is written
//!    as a lowercase `\uXXXX` escape (surrogate pairs above U+FFFF).
//!
//! The result is valid JSON that parses back to the same document, without
//! a trailing newline.

use std::fmt;

use serde_json::Value;

use crate::document::Document;

/// Indentation unit per nesting level.
const INDENT: &str = "    ";

/// Text produced exclusively by canonical serialization of a [`Document`].
///
/// # Invariants
///
/// - The only constructor is `CanonicalText::new()`.
/// - Mapping keys are sorted at every level.
/// - The text is pure ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalText(String);

impl CanonicalText {
    /// Canonicalize a document.
    pub fn new(document: &Document) -> Self {
        let mut out = String::new();
        write_value(&mut out, document.as_value(), 0);
        Self(out)
    }

    /// Access the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the canonical text into lines, without line terminators.
    pub fn lines(&self) -> Vec<&str> {
        self.0.lines().collect()
    }
}

impl AsRef<str> for CanonicalText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline_indent(out, depth + 1);
                write_value(out, item, depth + 1);
            }
            newline_indent(out, depth);
            out.push(']');
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            // serde_json::Map may preserve insertion order when the
            // `preserve_order` feature is unified in, so sort explicitly.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline_indent(out, depth + 1);
                write_string(out, key);
                out.push_str(": ");
                write_value(out, item, depth + 1);
            }
            newline_indent(out, depth);
            out.push('}');
        }
    }
}

fn newline_indent(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
        }
    }
    out.push('"');
}
