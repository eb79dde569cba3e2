//! Materialized schemas and the workspace execution contract
//!
//! A workspace takes a logical schema read from the filesystem, runs its
//! `CREATE` statements against a disposable database, and returns the
//! introspected result. This crate defines the model of that result and the
//! trait workspaces implement; provisioning real database instances is left
//! to implementors.
//!
//! ## Example
//!
//! ```rust,ignore
//! use schemalint_catalog::{MockWorkspace, Workspace, WorkspaceOptions};
//!
//! let workspace = MockWorkspace::new().with_schema("", schema);
//! let exec = workspace.exec_logical_schema(&logical, &WorkspaceOptions::default())?;
//! for (key, create) in exec.schema.object_definitions() {
//!     println!("{}: {}", key, create);
//! }
//! ```

pub mod schema;
pub mod workspace;
pub mod mock;

pub use schema::{Column, Index, Routine, Schema, Table};
pub use workspace::{ExecResult, StatementError, Workspace, WorkspaceError, WorkspaceOptions};
pub use mock::MockWorkspace;
