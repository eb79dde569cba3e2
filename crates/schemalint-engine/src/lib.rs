//! Schemalint engine - linting logic
//!
//! This crate implements the linting behavior on top of the core model:
//! - Problem registry and built-in problems
//! - Translation of directory configuration into options
//! - Directory linting, including reformat detection

pub mod problem;
pub mod problems;
pub mod options;
pub mod linter;

pub use problem::{Problem, ProblemRegistry};
pub use options::options_for_dir;
pub use linter::{lint_dir, Linter, REFORMAT_SUMMARY, STATEMENT_ERROR_SUMMARY};
