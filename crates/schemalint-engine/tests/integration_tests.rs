//! Integration tests for directory linting

use pretty_assertions::assert_eq;
use schemalint_catalog::{Column, Index, MockWorkspace, Schema, Table, WorkspaceError, WorkspaceOptions};
use schemalint_core::{Dir, DirConfig, LintError, LintResult, LogicalSchema, ObjectKey, Statement};
use schemalint_engine::{lint_dir, Linter, ProblemRegistry, REFORMAT_SUMMARY, STATEMENT_ERROR_SUMMARY};

const USERS_CANONICAL: &str = "CREATE TABLE `users` (\n  `id` int NOT NULL,\n  `name` varchar(40) DEFAULT NULL,\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

const ORDERS_CANONICAL: &str = "CREATE TABLE `orders` (\n  `id` int NOT NULL,\n  `user_id` int NOT NULL,\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

/// `users` matches its canonical form; `orders` is written lower-case on disk
fn app_logical_schema(name: &str) -> LogicalSchema {
    LogicalSchema::new(name)
        .with_create(
            ObjectKey::table("users"),
            Statement::new(format!("{};\n", USERS_CANONICAL)).with_location("users.sql", 1, 1),
        )
        .with_create(
            ObjectKey::table("orders"),
            Statement::new("create table orders (\n  id int not null primary key,\n  user_id int not null\n);\n\n")
                .with_location("orders.sql", 1, 1),
        )
}

fn app_schema() -> Schema {
    Schema::new("app")
        .with_table(
            Table::new("users", USERS_CANONICAL)
                .with_column(Column::new("id", "int"))
                .with_column(Column::new("name", "varchar(40)").with_char_set("utf8mb4", "utf8mb4_general_ci"))
                .with_primary_key(Index::primary(&["id"])),
        )
        .with_table(
            Table::new("orders", ORDERS_CANONICAL)
                .with_column(Column::new("id", "int"))
                .with_column(Column::new("user_id", "int"))
                .with_primary_key(Index::primary(&["id"])),
        )
}

fn app_dir(config: DirConfig) -> Dir {
    Dir::new("schemas/app")
        .with_config(config.with("schema", "app"))
        .with_logical_schema(app_logical_schema(""))
}

fn lint<'a>(dir: &'a Dir, workspace: &MockWorkspace) -> LintResult<'a> {
    let registry = ProblemRegistry::with_builtins();
    lint_dir(dir, &registry, workspace, &WorkspaceOptions::default())
}

#[test]
fn reformat_notice_carries_canonical_text_and_suffix() {
    let dir = app_dir(DirConfig::new());
    let workspace = MockWorkspace::new().with_schema("", app_schema());

    let result = lint(&dir, &workspace);

    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.exceptions.is_empty());
    assert_eq!(result.format_notices.len(), 1);
    let notice = &result.format_notices[0];
    assert_eq!(notice.summary, REFORMAT_SUMMARY);
    assert_eq!(notice.message, format!("{};\n\n", ORDERS_CANONICAL));
    assert_eq!(notice.statement.file, "orders.sql");
    assert_eq!(result.exit_code(), 1);
}

#[test]
fn ignored_schema_is_not_materialized() {
    let dir = app_dir(DirConfig::new().with("ignore-schema", "^app$"));
    let workspace = MockWorkspace::new().with_schema("", app_schema());

    let result = lint(&dir, &workspace);

    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.exceptions.is_empty());
    assert!(result.format_notices.is_empty());
    assert_eq!(result.debug_logs, vec!["Skipping schema in schemas/app because ignore-schema='^app$'"]);
    assert_eq!(workspace.call_count(), 0);
}

#[test]
fn ignored_schema_skips_only_matching_logical_schema() {
    let dir = Dir::new("schemas")
        .with_config(DirConfig::new().with("ignore-schema", "^archive"))
        .with_logical_schema(app_logical_schema("archive_2019"))
        .with_logical_schema(app_logical_schema("app"));
    let workspace = MockWorkspace::new()
        .with_schema("archive_2019", app_schema())
        .with_schema("app", app_schema());

    let result = lint(&dir, &workspace);

    assert_eq!(workspace.call_count(), 1);
    assert_eq!(result.debug_logs.len(), 1);
    assert_eq!(result.format_notices.len(), 1);
}

#[test]
fn dynamic_schema_names_are_not_matched() {
    let dir = Dir::new("schemas/app")
        .with_config(DirConfig::new().with("schema", "`list-schemas.sh`").with("ignore-schema", "list"))
        .with_logical_schema(app_logical_schema(""));
    let workspace = MockWorkspace::new().with_schema("", app_schema());

    let result = lint(&dir, &workspace);

    assert_eq!(workspace.call_count(), 1);
    assert!(result.debug_logs.is_empty());
}

#[test]
fn problems_are_partitioned_by_severity() {
    let dir = app_dir(
        DirConfig::new()
            .with("warnings", "bad-engine")
            .with("errors", "no-pk")
            .with("allow-engine", "innodb"),
    );
    let schema = Schema::new("app")
        .with_table(Table::new("users", USERS_CANONICAL).with_engine("MyISAM"))
        .with_table(Table::new("orders", ORDERS_CANONICAL).with_primary_key(Index::primary(&["id"])));
    let workspace = MockWorkspace::new().with_schema("", schema);

    let result = lint(&dir, &workspace);

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].summary, "Missing primary key");
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].summary, "Storage engine not permitted");
    assert_eq!(
        result.warnings[0].message_with_location(),
        "users.sql:1: Table `users` uses storage engine MyISAM, which is not listed in option allow-engine (innodb)"
    );
    assert_eq!(result.exit_code(), 2);
}

#[test]
fn statement_errors_become_error_annotations() {
    let dir = app_dir(DirConfig::new());
    let schema = Schema::new("app").with_table(
        Table::new("users", USERS_CANONICAL).with_primary_key(Index::primary(&["id"])),
    );
    let workspace = MockWorkspace::new()
        .with_schema("", schema)
        .with_statement_error(ObjectKey::table("orders"), "Error 1064: You have an error in your SQL syntax");

    let result = lint(&dir, &workspace);

    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.summary, STATEMENT_ERROR_SUMMARY);
    assert_eq!(error.message_with_location(), "orders.sql:1: Error 1064: You have an error in your SQL syntax");
    assert!(result.format_notices.is_empty());
}

#[test]
fn ignore_table_filters_statement_errors_and_notices() {
    let dir = app_dir(DirConfig::new().with("ignore-table", "^ord"));
    let workspace = MockWorkspace::new()
        .with_schema("", app_schema())
        .with_statement_error(ObjectKey::table("orders"), "Error 1146: Table doesn't exist");

    let result = lint(&dir, &workspace);

    assert!(result.errors.is_empty());
    assert!(result.format_notices.is_empty());
    assert_eq!(
        result.debug_logs,
        vec![
            "Skipping table `orders` because ignore-table='^ord'",
            "Skipping table `orders` because ignore-table='^ord'",
        ]
    );
}

#[test]
fn invalid_problem_name_aborts_directory() {
    let dir = app_dir(DirConfig::new().with("errors", "no-pk,no-such-problem"));
    let workspace = MockWorkspace::new().with_schema("", app_schema());

    let result = lint(&dir, &workspace);

    assert_eq!(result.exceptions.len(), 1);
    assert!(result.exceptions[0].is_config());
    assert!(result.exceptions[0].to_string().starts_with("Option errors "));
    assert!(result.errors.is_empty() && result.format_notices.is_empty() && result.debug_logs.is_empty());
    assert_eq!(workspace.call_count(), 0);
}

#[test]
fn malformed_ignore_pattern_aborts_directory() {
    let dir = app_dir(DirConfig::new().with("ignore-table", "(unclosed"));
    let workspace = MockWorkspace::new().with_schema("", app_schema());

    let result = lint(&dir, &workspace);

    assert_eq!(result.summary().exceptions, 1);
    assert!(matches!(&result.exceptions[0], LintError::Config(_)));
    assert_eq!(workspace.call_count(), 0);
}

#[test]
fn materialization_failure_is_schema_fatal_only() {
    let dir = Dir::new("schemas")
        .with_logical_schema(app_logical_schema("broken"))
        .with_logical_schema(app_logical_schema("app"));
    let workspace = MockWorkspace::new()
        .with_failure("broken", WorkspaceError::Provision("instance unreachable".to_string()))
        .with_schema("app", app_schema());

    let result = lint(&dir, &workspace);

    assert_eq!(
        result.exceptions,
        vec![LintError::SchemaSkipped {
            dir: "schemas".to_string(),
            reason: "Unable to provision workspace: instance unreachable".to_string(),
        }]
    );
    assert_eq!(result.format_notices.len(), 1);
    assert_eq!(workspace.call_count(), 2);
}

#[test]
fn canonical_object_without_statement_is_logged() {
    let dir = app_dir(DirConfig::new());
    let schema = app_schema().with_table(Table::new("created_by_trigger", "CREATE TABLE `created_by_trigger` (`id` int)"));
    let workspace = MockWorkspace::new().with_schema("", schema);

    let result = lint(&dir, &workspace);

    assert_eq!(result.format_notices.len(), 1);
    assert!(result
        .debug_logs
        .iter()
        .any(|log| log.contains("table `created_by_trigger`")));
}

#[test]
fn results_merge_across_directories() {
    let workspace = MockWorkspace::new().with_schema("", app_schema());
    let registry = ProblemRegistry::with_builtins();
    let linter = Linter::new(&registry, &workspace);
    let ws_opts = WorkspaceOptions::default();

    let parent = app_dir(DirConfig::new());
    let child = app_dir(DirConfig::new().with("errors", "bogus"));

    let mut result = linter.lint_dir(&parent, &ws_opts);
    result.merge(linter.lint_dir(&child, &ws_opts));

    assert_eq!(result.format_notices.len(), 1);
    assert_eq!(result.exceptions.len(), 1);
    assert_eq!(result.exit_code(), 2);
}

#[test]
fn config_from_toml_fixture() {
    let config: DirConfig = toml::from_str(
        r#"
        allow-charset = "utf8mb4,utf8"
        allow-engine = "myisam"
        warnings = "no-pk,bad-charset,bad-engine"
        "#,
    )
    .unwrap();
    let dir = app_dir(config);
    let workspace = MockWorkspace::new().with_schema("", app_schema());

    let result = lint(&dir, &workspace);

    // both tables are InnoDB, which this directory does not allow
    assert_eq!(result.warnings.len(), 2);
    assert!(result.warnings.iter().all(|w| w.summary == "Storage engine not permitted"));
    assert!(result.errors.is_empty());
}
