//! Error types for querycraft.

use thiserror::Error;

/// The main error type for statement construction and schema loading.
///
/// Rendering never fails: every structural problem is reported here, when the
/// offending statement or schema is built.
#[derive(Debug, Error)]
pub enum QueryError {
    /// INSERT/UPDATE/DELETE was built without a target table.
    #[error("Table required: statement has no target table")]
    TableRequired,

    /// INSERT/UPDATE was built with an empty value map.
    #[error("No values: INSERT and UPDATE need at least one column value")]
    NoValues,

    /// A column name is not exposed by the table it was looked up in.
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// A table name is not present in the schema.
    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    /// A join whose left side cannot be found among the statement's selections.
    #[error("Invalid join: {0}")]
    InvalidJoin(String),

    /// Parallel column/value vectors of different length.
    #[error("Value count mismatch: {columns} columns, {values} values")]
    ValueCountMismatch { columns: usize, values: usize },

    /// A column owned by a table other than the statement's target.
    #[error("Column '{column}' does not belong to table '{table}'")]
    ForeignColumn { column: String, table: String },

    /// An UPDATE/DELETE filter refers to something other than the bare
    /// target table, which is the only name such a statement introduces.
    #[error("Filter refers to '{qualifier}', but the statement only introduces table '{table}'")]
    ForeignFilter { qualifier: String, table: String },

    #[error("Duplicate table '{0}'")]
    DuplicateTable(String),

    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// Failed to parse a text schema definition.
    #[error("Schema parse error at position {position}: {message}")]
    SchemaParse { position: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    /// Create an unknown column error.
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create an invalid join error.
    pub fn invalid_join(message: impl Into<String>) -> Self {
        Self::InvalidJoin(message.into())
    }

    /// Create a schema parse error at the given position.
    pub fn schema_parse(position: usize, message: impl Into<String>) -> Self {
        Self::SchemaParse {
            position,
            message: message.into(),
        }
    }
}

/// Result type alias for querycraft operations.
pub type QueryResult<T> = Result<T, QueryError>;
