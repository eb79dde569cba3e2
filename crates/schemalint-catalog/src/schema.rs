//! Introspected schema model

use schemalint_core::{ObjectKey, ObjectType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A column of a live table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Column type as reported by the database, e.g. `varchar(40)`
    pub type_in_db: String,

    /// Character set, for textual columns
    pub char_set: Option<String>,

    /// Collation, for textual columns
    pub collation: Option<String>,
}

impl Column {
    /// Create a non-textual column
    pub fn new(name: impl Into<String>, type_in_db: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_in_db: type_in_db.into(),
            char_set: None,
            collation: None,
        }
    }

    /// Set character set and collation
    pub fn with_char_set(mut self, char_set: impl Into<String>, collation: impl Into<String>) -> Self {
        self.char_set = Some(char_set.into());
        self.collation = Some(collation.into());
        self
    }
}

/// An index of a live table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name
    pub name: String,

    /// Indexed column names, in order
    pub columns: Vec<String>,
}

impl Index {
    /// The `PRIMARY` index over `columns`
    pub fn primary(columns: &[&str]) -> Self {
        Self {
            name: "PRIMARY".to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// A live table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,

    /// Storage engine, e.g. `InnoDB`
    pub engine: String,

    /// Default character set
    pub char_set: String,

    /// Default collation
    pub collation: String,

    /// Columns, in table order
    pub columns: Vec<Column>,

    /// Primary key, if any
    pub primary_key: Option<Index>,

    /// Canonical `CREATE TABLE` as reported by the database
    pub create_statement: String,
}

impl Table {
    /// Create an InnoDB utf8mb4 table with no columns
    pub fn new(name: impl Into<String>, create_statement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine: "InnoDB".to_string(),
            char_set: "utf8mb4".to_string(),
            collation: "utf8mb4_general_ci".to_string(),
            columns: Vec::new(),
            primary_key: None,
            create_statement: create_statement.into(),
        }
    }

    /// Set the storage engine
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Set the default character set and collation
    pub fn with_char_set(mut self, char_set: impl Into<String>, collation: impl Into<String>) -> Self {
        self.char_set = char_set.into();
        self.collation = collation.into();
        self
    }

    /// Add a column
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the primary key
    pub fn with_primary_key(mut self, index: Index) -> Self {
        self.primary_key = Some(index);
        self
    }

    /// Identity of this table
    pub fn object_key(&self) -> ObjectKey {
        ObjectKey::table(self.name.clone())
    }
}

/// A live stored procedure or function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub name: String,
    pub routine_type: ObjectType,
    pub create_statement: String,
}

impl Routine {
    /// Identity of this routine
    pub fn object_key(&self) -> ObjectKey {
        ObjectKey::new(self.routine_type, self.name.clone())
    }
}

/// An introspected schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name
    pub name: String,

    /// Default character set
    pub char_set: String,

    /// Default collation
    pub collation: String,

    /// Tables, in name order
    pub tables: Vec<Table>,

    /// Stored procedures and functions
    pub routines: Vec<Routine>,
}

impl Schema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a table
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Add a routine
    pub fn with_routine(mut self, routine: Routine) -> Self {
        self.routines.push(routine);
        self
    }

    /// Find a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Canonical `CREATE` text of every object, keyed by object identity
    pub fn object_definitions(&self) -> BTreeMap<ObjectKey, String> {
        let tables = self
            .tables
            .iter()
            .map(|t| (t.object_key(), t.create_statement.clone()));
        let routines = self
            .routines
            .iter()
            .map(|r| (r.object_key(), r.create_statement.clone()));
        tables.chain(routines).collect()
    }
}
