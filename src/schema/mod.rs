//! Schema metadata consumed by the builder.
//!
//! A [`Schema`] maps table names to [`Table`]s, each owning its [`Column`]s in
//! declaration order. It is passive data: the builder only looks names up.
//!
//! # Example
//! ```
//! use querycraft::schema::Schema;
//!
//! let mut schema = Schema::new();
//! schema.add_table("users").unwrap();
//! schema.add_column("users", "id").unwrap();
//! schema.add_column("users", "name").unwrap();
//!
//! let users = schema.table("users").unwrap();
//! assert_eq!(users.columns().len(), 2);
//! ```

mod loader;

pub use loader::{ColumnDef, SchemaDef, TableDef, parse_definition};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ast::TableIdent;
use crate::error::{QueryError, QueryResult};

/// A foreign reference from one column to a column of another table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignRef {
    pub table: String,
    pub column: String,
}

impl ForeignRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// A column and the name of the table that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    table: String,
    references: Option<ForeignRef>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning table.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn references(&self) -> Option<&ForeignRef> {
        self.references.as_ref()
    }
}

/// A named table with an optional schema-level alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    alias: Option<String>,
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            columns: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn push_column(&mut self, name: &str, references: Option<ForeignRef>) -> QueryResult<()> {
        if self.index.contains_key(name) {
            return Err(QueryError::DuplicateColumn {
                table: self.name.clone(),
                column: name.to_string(),
            });
        }
        self.index.insert(name.to_string(), self.columns.len());
        self.columns.push(Column {
            name: name.to_string(),
            table: self.name.clone(),
            references,
        });
        Ok(())
    }
}

/// A set of tables keyed by unique name.
///
/// Tables are shared with the identifiers handed out by [`Schema::table`];
/// mutating the schema afterwards copies the table and leaves existing
/// identifiers on their snapshot.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    tables: BTreeMap<String, Arc<Table>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, name: &str) -> QueryResult<()> {
        if self.tables.contains_key(name) {
            return Err(QueryError::DuplicateTable(name.to_string()));
        }
        self.tables.insert(name.to_string(), Arc::new(Table::new(name)));
        Ok(())
    }

    /// Set the schema-level alias of a table. Identifiers obtained from
    /// [`Schema::table`] start out with this alias.
    pub fn set_alias(&mut self, table: &str, alias: &str) -> QueryResult<()> {
        let t = self.table_mut(table)?;
        t.alias = if alias.is_empty() {
            None
        } else {
            Some(alias.to_string())
        };
        Ok(())
    }

    pub fn add_column(&mut self, table: &str, column: &str) -> QueryResult<()> {
        self.table_mut(table)?.push_column(column, None)
    }

    /// Add a column that references `references.table`.`references.column`.
    pub fn add_reference_column(
        &mut self,
        table: &str,
        column: &str,
        references: ForeignRef,
    ) -> QueryResult<()> {
        self.table_mut(table)?.push_column(column, Some(references))
    }

    /// Identifier for the named table, or `None` if it does not exist.
    pub fn table(&self, name: &str) -> Option<TableIdent> {
        self.tables.get(name).cloned().map(TableIdent::new)
    }

    /// Identifier for the named table.
    pub fn try_table(&self, name: &str) -> QueryResult<TableIdent> {
        self.table(name)
            .ok_or_else(|| QueryError::UnknownTable(name.to_string()))
    }

    pub fn table_meta(&self, name: &str) -> Option<&Arc<Table>> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn table_mut(&mut self, name: &str) -> QueryResult<&mut Table> {
        self.tables
            .get_mut(name)
            .map(Arc::make_mut)
            .ok_or_else(|| QueryError::UnknownTable(name.to_string()))
    }
}
