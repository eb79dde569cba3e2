//! Severity levels and linter annotations
//!
//! An annotation ties a finding to the filesystem statement it concerns.
//! Summary strings are stable; reporters group findings by them.

use serde::{Deserialize, Serialize};
use crate::schema::Statement;

/// Annotation severity level
///
/// A problem that is absent from the configured severity map is not
/// reported at all, so there is no "off" variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Non-fatal finding
    Warning,

    /// Finding that should fail CI
    Error,
}

impl Severity {
    /// Stable string identifier, as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error, warning, or notice from linting a single SQL statement
///
/// The statement is borrowed from the logical schema that was linted, which
/// always outlives the result holding this annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation<'a> {
    /// Filesystem statement the finding refers to
    pub statement: &'a Statement,

    /// Adjustment applied to the statement's line number when the finding
    /// concerns a later line of a multi-line statement
    pub line_offset: isize,

    /// Short, stable category label
    pub summary: String,

    /// Human-readable detail
    pub message: String,
}

impl<'a> Annotation<'a> {
    /// Create an annotation located at the start of `statement`
    pub fn new(statement: &'a Statement, summary: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            statement,
            line_offset: 0,
            summary: summary.into(),
            message: message.into(),
        }
    }

    /// Set the line offset
    pub fn with_line_offset(mut self, line_offset: isize) -> Self {
        self.line_offset = line_offset;
        self
    }

    /// Whether the statement carries a usable file and line number
    pub fn has_location(&self) -> bool {
        !self.statement.file.is_empty() && self.statement.line_no != 0
    }

    /// Rendered `file:line[:col]` location, if known
    ///
    /// The column is only included for zero-offset findings; any non-zero
    /// offset moves the line and drops the column.
    pub fn location(&self) -> Option<String> {
        if !self.has_location() {
            return None;
        }
        let stmt = self.statement;
        if self.line_offset == 0 && stmt.char_no > 1 {
            Some(format!("{}:{}:{}", stmt.file, stmt.line_no, stmt.char_no))
        } else {
            Some(format!("{}:{}", stmt.file, stmt.line_no as isize + self.line_offset))
        }
    }

    /// Prepend location information to the message if available, otherwise
    /// append the full SQL text of the statement
    pub fn message_with_location(&self) -> String {
        match self.location() {
            Some(location) => format!("{}: {}", location, self.message),
            None => format!("{} [Full SQL: {}]", self.message, self.statement.text),
        }
    }
}

impl std::fmt::Display for Annotation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message_with_location())
    }
}
