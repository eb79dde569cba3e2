//! Workspace trait for materializing logical schemas

use schemalint_core::{LogicalSchema, ObjectKey, ObjectType, Statement};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::schema::Schema;

/// Settings passed through to the workspace implementation
///
/// The linter never interprets these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceOptions {
    /// Name of the temporary schema to create
    pub schema_name: String,

    /// Default character set for the temporary schema
    pub default_char_set: Option<String>,

    /// Default collation for the temporary schema
    pub default_collation: Option<String>,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            schema_name: "_schemalint_tmp".to_string(),
            default_char_set: None,
            default_collation: None,
        }
    }
}

/// A single statement that failed when executed in the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementError<'a> {
    /// Offending filesystem statement
    pub statement: &'a Statement,

    /// Object the statement tried to create
    pub object_key: ObjectKey,

    /// Database error text
    pub error: String,
}

impl StatementError<'_> {
    /// Type of the object the statement tried to create
    pub fn object_type(&self) -> ObjectType {
        self.object_key.object_type
    }

    /// Name of the object the statement tried to create
    pub fn object_name(&self) -> &str {
        &self.object_key.name
    }
}

impl fmt::Display for StatementError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.object_key, self.error)
    }
}

/// Errors that prevent a workspace from materializing a schema at all
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Unable to provision workspace: {0}")]
    Provision(String),

    #[error("Execution failed: {0}")]
    Execution(String),

    #[error("Introspection failed: {0}")]
    Introspection(String),

    #[error("Cleanup failed: {0}")]
    Cleanup(String),
}

/// Outcome of materializing a logical schema
#[derive(Debug, Clone)]
pub struct ExecResult<'a> {
    /// Introspected schema
    pub schema: Schema,

    /// Statements that failed; the objects they create are absent from `schema`
    pub statement_errors: Vec<StatementError<'a>>,
}

/// Trait for services that materialize logical schemas
///
/// Calls are synchronous and own whatever database resources they need for
/// their own duration only.
pub trait Workspace: Send + Sync {
    /// Get the workspace name (e.g., "temp-schema", "docker")
    fn name(&self) -> &'static str;

    /// Run every statement of `logical` and introspect the result
    ///
    /// Per-statement failures are returned in the `Ok` value; `Err` means
    /// the workspace itself could not be used.
    fn exec_logical_schema<'a>(
        &self,
        logical: &'a LogicalSchema,
        opts: &WorkspaceOptions,
    ) -> Result<ExecResult<'a>, WorkspaceError>;
}
