//! Directory linting
//!
//! Each call lints exactly the logical schemas of one directory. Walking a
//! tree and merging the per-directory results is up to the caller.

use regex::Regex;
use schemalint_catalog::{ExecResult, Workspace, WorkspaceOptions};
use schemalint_core::{Annotation, ConfigError, Dir, LintError, LintResult, LogicalSchema, ObjectKey, ObjectType, Options, Severity};
use tracing::{debug, warn};

use crate::options::options_for_dir;
use crate::problem::ProblemRegistry;

/// Summary used for statements the workspace failed to execute
pub const STATEMENT_ERROR_SUMMARY: &str = "SQL statement returned an error";

/// Summary used for statements whose text differs from the canonical form
pub const REFORMAT_SUMMARY: &str = "SQL statement should be reformatted";

/// `ignore-schema` and `ignore-table` patterns of a directory
struct IgnoreFilters {
    schema: Option<Regex>,
    table: Option<Regex>,
}

impl IgnoreFilters {
    fn for_dir(dir: &Dir) -> Result<Self, ConfigError> {
        Ok(Self {
            table: dir.config.get_regex("ignore-table")?,
            schema: dir.config.get_regex("ignore-schema")?,
        })
    }

    /// The `ignore-table` pattern, if it matches `key`
    fn ignored_table(&self, key: &ObjectKey) -> Option<&Regex> {
        self.table
            .as_ref()
            .filter(|pattern| key.object_type == ObjectType::Table && pattern.is_match(&key.name))
    }
}

/// Lints directories using a problem registry and a workspace
pub struct Linter<'r> {
    registry: &'r ProblemRegistry,
    workspace: &'r dyn Workspace,
}

impl<'r> Linter<'r> {
    /// Create a linter
    pub fn new(registry: &'r ProblemRegistry, workspace: &'r dyn Workspace) -> Self {
        Self { registry, workspace }
    }

    /// Lint every logical schema of `dir`
    ///
    /// Invalid configuration aborts the directory with a result holding only
    /// the config exception. A logical schema that cannot be materialized is
    /// recorded as an exception and the remaining ones are still linted.
    pub fn lint_dir<'a>(&self, dir: &'a Dir, ws_opts: &WorkspaceOptions) -> LintResult<'a> {
        let filters = match IgnoreFilters::for_dir(dir) {
            Ok(filters) => filters,
            Err(err) => {
                warn!(dir = %dir.rel_path, error = %err, "invalid ignore pattern");
                return LintResult::bad_config(err);
            }
        };
        let opts = match options_for_dir(dir, self.registry) {
            Ok(opts) => opts,
            Err(err) => {
                warn!(dir = %dir.rel_path, error = %err, "invalid linter configuration");
                return LintResult::bad_config(err);
            }
        };

        let mut result = LintResult::new();
        for logical in &dir.logical_schemas {
            let schema_result = self.lint_logical_schema(dir, logical, &opts, &filters, ws_opts);
            result.merge(schema_result);
        }

        debug!(
            dir = %dir.rel_path,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            format_notices = result.format_notices.len(),
            exceptions = result.exceptions.len(),
            "linted directory"
        );
        result
    }

    fn lint_logical_schema<'a>(
        &self,
        dir: &'a Dir,
        logical: &'a LogicalSchema,
        opts: &Options,
        filters: &IgnoreFilters,
        ws_opts: &WorkspaceOptions,
    ) -> LintResult<'a> {
        let mut result = LintResult::new();

        // Only literal names are checked; shell-outs and `*` need a live instance
        if let Some(pattern) = &filters.schema {
            if dir.literal_schema_names(logical).iter().any(|name| pattern.is_match(name)) {
                debug!(dir = %dir.rel_path, pattern = %pattern, "skipping ignored schema");
                result
                    .debug_logs
                    .push(format!("Skipping schema in {} because ignore-schema='{}'", dir.rel_path, pattern));
                return result;
            }
        }

        let exec = match self.workspace.exec_logical_schema(logical, ws_opts) {
            Ok(exec) => exec,
            Err(err) => {
                warn!(dir = %dir.rel_path, workspace = self.workspace.name(), error = %err, "unable to materialize schema");
                result.exceptions.push(LintError::SchemaSkipped {
                    dir: dir.rel_path.clone(),
                    reason: err.to_string(),
                });
                return result;
            }
        };

        self.record_statement_errors(&exec, filters, &mut result);
        self.run_problems(&exec, logical, opts, &mut result);
        self.detect_reformats(&exec, logical, filters, &mut result);
        result
    }

    fn record_statement_errors<'a>(&self, exec: &ExecResult<'a>, filters: &IgnoreFilters, result: &mut LintResult<'a>) {
        for stmt_err in &exec.statement_errors {
            if let Some(pattern) = filters.ignored_table(&stmt_err.object_key) {
                result
                    .debug_logs
                    .push(format!("Skipping {} because ignore-table='{}'", stmt_err.object_key, pattern));
                continue;
            }
            result
                .errors
                .push(Annotation::new(stmt_err.statement, STATEMENT_ERROR_SUMMARY, stmt_err.error.clone()));
        }
    }

    fn run_problems<'a>(&self, exec: &ExecResult<'_>, logical: &'a LogicalSchema, opts: &Options, result: &mut LintResult<'a>) {
        for (name, severity) in &opts.problem_severity {
            let Some(problem) = self.registry.get(name) else {
                debug!(problem = %name, "problem not registered, skipping");
                continue;
            };
            let annotations = problem.check(&exec.schema, logical, opts);
            debug!(
                problem = %name,
                description = problem.description(),
                findings = annotations.len(),
                "ran problem check"
            );
            match severity {
                Severity::Warning => result.warnings.extend(annotations),
                Severity::Error => result.errors.extend(annotations),
            }
        }
    }

    /// Compare each canonical `CREATE` from the workspace with the statement
    /// on disk, emitting a notice with the canonical text wherever they differ
    fn detect_reformats<'a>(
        &self,
        exec: &ExecResult<'_>,
        logical: &'a LogicalSchema,
        filters: &IgnoreFilters,
        result: &mut LintResult<'a>,
    ) {
        for (key, canonical) in exec.schema.object_definitions() {
            if let Some(pattern) = filters.ignored_table(&key) {
                result
                    .debug_logs
                    .push(format!("Skipping {} because ignore-table='{}'", key, pattern));
                continue;
            }
            let Some(statement) = logical.create_for(&key) else {
                result
                    .debug_logs
                    .push(format!("Skipping {} because it has no CREATE statement on the filesystem", key));
                continue;
            };
            let (body, suffix) = statement.split_text_body();
            if canonical != body {
                result.format_notices.push(Annotation::new(
                    statement,
                    REFORMAT_SUMMARY,
                    format!("{}{}", canonical, suffix),
                ));
            }
        }
    }
}

/// Lint `dir` with `registry` and `workspace`
pub fn lint_dir<'a>(
    dir: &'a Dir,
    registry: &ProblemRegistry,
    workspace: &dyn Workspace,
    ws_opts: &WorkspaceOptions,
) -> LintResult<'a> {
    Linter::new(registry, workspace).lint_dir(dir, ws_opts)
}
