//! Mock workspace for testing
//!
//! This workspace returns predefined schemas without touching any database.
//! It's useful for:
//! - Unit testing the linter
//! - Simulating statement errors and workspace failures
//! - Demos without a running instance
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemalint_catalog::{MockWorkspace, Schema, Table, Workspace, WorkspaceOptions};
//! use schemalint_core::ObjectKey;
//!
//! // Schemas are keyed by logical schema name ("" for the default one)
//! let workspace = MockWorkspace::new()
//!     .with_schema("", Schema::new("app").with_table(Table::new("users", "CREATE TABLE `users` (...)")))
//!     .with_statement_error(ObjectKey::table("orders"), "Unknown storage engine 'Nope'");
//!
//! let exec = workspace.exec_logical_schema(&logical, &WorkspaceOptions::default())?;
//! ```
//!
//! ## Simulating Failures
//!
//! ```rust,ignore
//! let workspace = MockWorkspace::new()
//!     .with_failure("broken", WorkspaceError::Provision("no instance".to_string()));
//! ```

use crate::schema::Schema;
use crate::workspace::{ExecResult, StatementError, Workspace, WorkspaceError, WorkspaceOptions};
use schemalint_core::{LogicalSchema, ObjectKey};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory workspace returning predefined schemas
///
/// # Features
///
/// - Store schemas by logical schema name
/// - Report statement errors for specific objects
/// - Fail materialization for specific logical schemas
/// - Count materialization attempts
pub struct MockWorkspace {
    /// Predefined schemas by logical schema name
    schemas: HashMap<String, Schema>,

    /// Statement errors to report, by object
    statement_errors: Vec<(ObjectKey, String)>,

    /// Failures to return, by logical schema name
    failures: HashMap<String, WorkspaceError>,

    /// Number of `exec_logical_schema` calls so far
    calls: AtomicUsize,
}

impl MockWorkspace {
    /// Create a mock workspace with no predefined schemas
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            statement_errors: Vec::new(),
            failures: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Return `schema` when materializing the logical schema named `logical_name`
    pub fn with_schema(mut self, logical_name: impl Into<String>, schema: Schema) -> Self {
        self.schemas.insert(logical_name.into(), schema);
        self
    }

    /// Report `error` for the statement creating `key`, in any logical
    /// schema that has one
    pub fn with_statement_error(mut self, key: ObjectKey, error: impl Into<String>) -> Self {
        self.statement_errors.push((key, error.into()));
        self
    }

    /// Fail materialization of the logical schema named `logical_name`
    pub fn with_failure(mut self, logical_name: impl Into<String>, error: WorkspaceError) -> Self {
        self.failures.insert(logical_name.into(), error);
        self
    }

    /// Number of materialization attempts so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace for MockWorkspace {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn exec_logical_schema<'a>(
        &self,
        logical: &'a LogicalSchema,
        opts: &WorkspaceOptions,
    ) -> Result<ExecResult<'a>, WorkspaceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(logical_schema = %logical.name, workspace = %opts.schema_name, "mock materialization");

        if let Some(err) = self.failures.get(&logical.name) {
            return Err(err.clone());
        }

        let schema = self
            .schemas
            .get(&logical.name)
            .cloned()
            .unwrap_or_else(|| Schema {
                char_set: opts.default_char_set.clone().unwrap_or_default(),
                collation: opts.default_collation.clone().unwrap_or_default(),
                ..Schema::new(opts.schema_name.clone())
            });

        let statement_errors = self
            .statement_errors
            .iter()
            .filter_map(|(key, error)| {
                logical.create_for(key).map(|statement| StatementError {
                    statement,
                    object_key: key.clone(),
                    error: error.clone(),
                })
            })
            .collect();

        Ok(ExecResult { schema, statement_errors })
    }
}
