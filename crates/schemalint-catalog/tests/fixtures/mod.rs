//! Test fixtures for workspace integration tests
//!
//! Canonical `CREATE` text here is what a MySQL 8 workspace reports for the
//! corresponding filesystem statements.

use schemalint_catalog::{Column, Index, Routine, Schema, Table};
use schemalint_core::{LogicalSchema, ObjectKey, ObjectType, Statement};

pub const USERS_CANONICAL: &str = "CREATE TABLE `users` (\n  `id` int NOT NULL,\n  `email` varchar(100) NOT NULL,\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

pub const TOTAL_CANONICAL: &str = "CREATE FUNCTION `total`() RETURNS int\n    DETERMINISTIC\nRETURN 42";

/// Filesystem side: one table and one function
pub fn app_logical_schema() -> LogicalSchema {
    LogicalSchema::new("app")
        .with_create(
            ObjectKey::table("users"),
            Statement::new(format!("{};\n", USERS_CANONICAL)).with_location("users.sql", 1, 1),
        )
        .with_create(
            ObjectKey::func("total"),
            Statement::new(format!("{}//\n", TOTAL_CANONICAL))
                .with_location("total.sql", 2, 1)
                .with_delimiter("//"),
        )
}

/// Workspace side of [`app_logical_schema`]
pub fn app_schema() -> Schema {
    Schema::new("app")
        .with_table(
            Table::new("users", USERS_CANONICAL)
                .with_column(Column::new("id", "int"))
                .with_column(Column::new("email", "varchar(100)").with_char_set("utf8mb4", "utf8mb4_0900_ai_ci"))
                .with_primary_key(Index::primary(&["id"])),
        )
        .with_routine(Routine {
            name: "total".to_string(),
            routine_type: ObjectType::Func,
            create_statement: TOTAL_CANONICAL.to_string(),
        })
}
