//! Filesystem-side schema model
//!
//! These types describe what was read from disk: directories, the logical
//! schemas declared in them, and the individual `CREATE` statements along
//! with their source locations. Parsing is done elsewhere; this module only
//! holds the result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::config::DirConfig;

/// Kind of schema object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// Table
    Table,

    /// Stored procedure
    Proc,

    /// Stored function
    Func,
}

impl ObjectType {
    /// Name used in SQL and in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Proc => "procedure",
            Self::Func => "function",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a schema object: its type plus its name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectKey {
    /// Object type
    pub object_type: ObjectType,

    /// Object name, unquoted
    pub name: String,
}

impl ObjectKey {
    /// Create a new object key
    pub fn new(object_type: ObjectType, name: impl Into<String>) -> Self {
        Self {
            object_type,
            name: name.into(),
        }
    }

    /// Key for a table
    pub fn table(name: impl Into<String>) -> Self {
        Self::new(ObjectType::Table, name)
    }

    /// Key for a stored procedure
    pub fn proc(name: impl Into<String>) -> Self {
        Self::new(ObjectType::Proc, name)
    }

    /// Key for a stored function
    pub fn func(name: impl Into<String>) -> Self {
        Self::new(ObjectType::Func, name)
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}`", self.object_type, self.name)
    }
}

/// A single SQL statement read from a file
///
/// An empty `file` or a zero `line_no` means the location is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// File path relative to the directory being linted
    pub file: String,

    /// Line number of the statement start (1-indexed, 0 if unknown)
    pub line_no: usize,

    /// Column of the statement start (1-indexed, 0 if unknown)
    pub char_no: usize,

    /// Raw text, including the delimiter and trailing whitespace
    pub text: String,

    /// Statement delimiter in effect when the statement was read
    pub delimiter: String,

    /// Object created by this statement, if it is a `CREATE`
    pub object_key: Option<ObjectKey>,
}

impl Statement {
    /// Create a statement with no known location and the default delimiter
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            file: String::new(),
            line_no: 0,
            char_no: 0,
            text: text.into(),
            delimiter: ";".to_string(),
            object_key: None,
        }
    }

    /// Set file, line and column
    pub fn with_location(mut self, file: impl Into<String>, line_no: usize, char_no: usize) -> Self {
        self.file = file.into();
        self.line_no = line_no;
        self.char_no = char_no;
        self
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the object created by this statement
    pub fn with_object_key(mut self, key: ObjectKey) -> Self {
        self.object_key = Some(key);
        self
    }

    /// Split the text into its body and the trailing suffix
    ///
    /// The suffix is the delimiter together with any whitespace surrounding
    /// it at the end of the statement. Concatenating both parts always yields
    /// the original text.
    pub fn split_text_body(&self) -> (&str, &str) {
        let mut end = self.text.trim_end().len();
        let delimiter = self.delimiter.as_str();
        if !delimiter.is_empty() && self.text[..end].ends_with(delimiter) {
            end -= delimiter.len();
            end = self.text[..end].trim_end().len();
        }
        self.text.split_at(end)
    }

    /// 0-based index of the first line that starts with `prefix`, ignoring
    /// indentation
    pub fn find_line_offset(&self, prefix: &str) -> Option<usize> {
        self.text.lines().position(|line| line.trim_start().starts_with(prefix))
    }
}

/// The set of `CREATE` statements that make up one schema on disk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogicalSchema {
    /// Schema name, empty for the directory's default schema
    pub name: String,

    /// `CREATE` statements keyed by the object they create
    pub creates: BTreeMap<ObjectKey, Statement>,
}

impl LogicalSchema {
    /// Create an empty logical schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creates: BTreeMap::new(),
        }
    }

    /// Add a `CREATE` statement for `key`
    pub fn with_create(mut self, key: ObjectKey, statement: Statement) -> Self {
        self.add_create(key, statement);
        self
    }

    /// Add a `CREATE` statement for `key`, replacing any previous one
    pub fn add_create(&mut self, key: ObjectKey, statement: Statement) {
        let statement = statement.with_object_key(key.clone());
        self.creates.insert(key, statement);
    }

    /// Find the statement creating `key`
    pub fn create_for(&self, key: &ObjectKey) -> Option<&Statement> {
        self.creates.get(key)
    }
}

/// A directory of schema files together with its resolved configuration
#[derive(Debug, Clone, Default)]
pub struct Dir {
    /// Path relative to the root of the tree being linted, for messages
    pub rel_path: String,

    /// Configuration in effect for this directory
    pub config: DirConfig,

    /// Logical schemas declared by files in this directory
    pub logical_schemas: Vec<LogicalSchema>,
}

impl Dir {
    /// Create a directory with default configuration and no schemas
    pub fn new(rel_path: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            config: DirConfig::default(),
            logical_schemas: Vec::new(),
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: DirConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a logical schema
    pub fn with_logical_schema(mut self, logical: LogicalSchema) -> Self {
        self.logical_schemas.push(logical);
        self
    }

    /// Literal schema names that `logical` will be applied to
    ///
    /// A named logical schema maps to its own name. The default logical
    /// schema maps to the `schema` option, minus dynamic expressions
    /// (back-tick shell-outs and `*`) which need a live instance to resolve.
    pub fn literal_schema_names(&self, logical: &LogicalSchema) -> Vec<String> {
        if !logical.name.is_empty() {
            return vec![logical.name.clone()];
        }
        self.config
            .get_slice("schema", ',', true)
            .into_iter()
            .filter(|name| name != "*" && !name.starts_with('`'))
            .collect()
    }
}
