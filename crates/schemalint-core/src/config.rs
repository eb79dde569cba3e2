//! Per-directory configuration and resolved linter options

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use regex::Regex;
use crate::diagnostic::Severity;

/// Built-in defaults for every option the linter reads
pub const OPTION_DEFAULTS: &[(&str, &str)] = &[
    ("warnings", "no-pk,bad-charset,bad-engine"),
    ("errors", ""),
    ("allow-charset", "latin1,utf8mb4"),
    ("allow-engine", "innodb"),
    ("ignore-schema", ""),
    ("ignore-table", ""),
    ("schema", ""),
];

/// Raw option values in effect for one directory
///
/// Values are stored as the strings they were configured with; typed
/// accessors interpret them on demand. Options without an explicit value
/// fall back to [`OPTION_DEFAULTS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirConfig {
    values: BTreeMap<String, String>,
}

impl DirConfig {
    /// Create a config with no explicit values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an option
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Whether `name` was given an explicit value
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Raw value of `name`: explicit, else default, else empty
    pub fn get(&self, name: &str) -> &str {
        if let Some(value) = self.values.get(name) {
            return value;
        }
        OPTION_DEFAULTS
            .iter()
            .find(|(option, _)| *option == name)
            .map(|(_, default)| *default)
            .unwrap_or("")
    }

    /// Split the value of `name` on `delimiter`
    ///
    /// Empty items are dropped, so an unset option yields an empty list.
    pub fn get_slice(&self, name: &str, delimiter: char, trim: bool) -> Vec<String> {
        self.get(name)
            .split(delimiter)
            .map(|item| if trim { item.trim() } else { item })
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Compile the value of `name` as a regular expression
    ///
    /// Returns `Ok(None)` when the option is empty.
    pub fn get_regex(&self, name: &str) -> Result<Option<Regex>, ConfigError> {
        let pattern = self.get(name);
        if pattern.is_empty() {
            return Ok(None);
        }
        Regex::new(pattern)
            .map(Some)
            .map_err(|e| ConfigError::new(format!("Invalid regexp for option {}: {}", name, e)))
    }
}

/// Resolved settings controlling linter behavior for one directory
///
/// Produced by the options translator, which guarantees that every key of
/// `problem_severity` names a registered problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Options {
    /// Severity of each enabled problem, keyed by lower-case problem name
    pub problem_severity: BTreeMap<String, Severity>,

    /// Permitted character sets, as configured
    pub allowed_char_sets: Vec<String>,

    /// Permitted storage engines, as configured
    pub allowed_engines: Vec<String>,
}

impl Options {
    /// Severity configured for a problem, if it is enabled
    pub fn severity_of(&self, problem: &str) -> Option<Severity> {
        self.problem_severity.get(problem).copied()
    }

    /// Whether a character set is permitted (case-insensitive)
    pub fn is_char_set_allowed(&self, char_set: &str) -> bool {
        self.allowed_char_sets.iter().any(|allowed| allowed.eq_ignore_ascii_case(char_set))
    }

    /// Whether a storage engine is permitted (case-insensitive)
    pub fn is_engine_allowed(&self, engine: &str) -> bool {
        self.allowed_engines.iter().any(|allowed| allowed.eq_ignore_ascii_case(engine))
    }
}

/// Invalid linter configuration
///
/// Kept distinct from every other failure so callers can tell "your
/// settings are invalid" apart from "linting could not run".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ConfigError(pub String);

impl ConfigError {
    /// Create a config error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Convert any other error into a config error, keeping its message
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self(err.to_string())
    }

    /// The error message
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<regex::Error> for ConfigError {
    fn from(err: regex::Error) -> Self {
        Self::from_error(&err)
    }
}
