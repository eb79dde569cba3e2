//! Lint result accumulation
//!
//! A [`LintResult`] collects everything produced by linting one directory.
//! Callers walking a tree merge child results into a parent with
//! [`LintResult::merge`].

use serde::{Serialize, Serializer};
use crate::config::ConfigError;
use crate::diagnostic::Annotation;

/// A run-level failure: linting could not be completed for some unit
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LintError {
    /// Invalid configuration; aborts the whole directory
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A logical schema could not be materialized; other schemas still run
    #[error("Skipping schema in {dir} due to error: {reason}")]
    SchemaSkipped { dir: String, reason: String },
}

impl LintError {
    /// Whether this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl Serialize for LintError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Counts of each kind of entry in a result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub errors: usize,
    pub warnings: usize,
    pub format_notices: usize,
    pub debug_logs: usize,
    pub exceptions: usize,
}

/// Combined annotations and failures from linting a directory and its subdirs
///
/// `errors` are linting errors (a problem was found), while `exceptions`
/// mean linting could not be completed for some unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LintResult<'a> {
    pub errors: Vec<Annotation<'a>>,
    pub warnings: Vec<Annotation<'a>>,
    pub format_notices: Vec<Annotation<'a>>,
    pub debug_logs: Vec<String>,
    pub exceptions: Vec<LintError>,
}

impl<'a> LintResult<'a> {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Result whose sole content is one config exception
    ///
    /// Anything that is not already a [`ConfigError`] is converted to one
    /// through its `Into` implementation.
    pub fn bad_config(err: impl Into<ConfigError>) -> Self {
        Self {
            exceptions: vec![LintError::Config(err.into())],
            ..Self::default()
        }
    }

    /// Append all of `other`'s entries after this result's own
    pub fn merge(&mut self, other: LintResult<'a>) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.format_notices.extend(other.format_notices);
        self.debug_logs.extend(other.debug_logs);
        self.exceptions.extend(other.exceptions);
    }

    /// Entry counts
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            errors: self.errors.len(),
            warnings: self.warnings.len(),
            format_notices: self.format_notices.len(),
            debug_logs: self.debug_logs.len(),
            exceptions: self.exceptions.len(),
        }
    }

    /// No errors, warnings, format notices or exceptions
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
            && self.warnings.is_empty()
            && self.format_notices.is_empty()
            && self.exceptions.is_empty()
    }

    /// Whether any linting error or exception was recorded
    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty() || !self.exceptions.is_empty()
    }

    /// Process exit code for a lint run
    ///
    /// 0 when clean, 1 when only warnings or format notices were found,
    /// 2 when any error or exception was recorded.
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            2
        } else if self.is_clean() {
            0
        } else {
            1
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
