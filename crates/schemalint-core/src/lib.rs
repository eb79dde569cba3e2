//! Schemalint Core
//!
//! Core domain model shared by the catalog and the linting engine.
//! Problem names and summary strings are part of the public output;
//! never rename them, only add new ones.

pub mod diagnostic;
pub mod schema;
pub mod report;
pub mod config;

pub use diagnostic::{Annotation, Severity};
pub use schema::{Dir, LogicalSchema, ObjectKey, ObjectType, Statement};
pub use report::{LintError, LintResult, ResultSummary};
pub use config::{ConfigError, DirConfig, Options};
