//! Table and column identifiers.

use std::sync::Arc;

use super::{Scannable, non_empty};
use crate::error::{QueryError, QueryResult};
use crate::scanner::Scanner;
use crate::schema::{ForeignRef, Table};
use crate::symbols::Symbol;
use crate::value::Value;

/// A reference to a schema table with an optional local alias.
///
/// Renders as `name` or `name AS alias` in FROM position. Columns of an aliased
/// table are qualified with the alias instead of the name.
#[derive(Debug, Clone)]
pub struct TableIdent {
    table: Arc<Table>,
    alias: Option<String>,
}

impl TableIdent {
    /// Identifier for `table`, starting with its schema-level alias.
    pub fn new(table: Arc<Table>) -> Self {
        let alias = table.alias().map(str::to_string);
        Self { table, alias }
    }

    pub fn name(&self) -> &str {
        self.table.name()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Copy of this identifier under a different alias.
    pub fn with_alias(&self, alias: impl Into<String>) -> Self {
        Self {
            table: Arc::clone(&self.table),
            alias: non_empty(alias),
        }
    }

    /// Copy of this identifier without any alias.
    pub fn unaliased(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            alias: None,
        }
    }

    /// The alias if set, otherwise the table name.
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.table.name())
    }

    pub fn schema_table(&self) -> &Arc<Table> {
        &self.table
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.table.has_column(name)
    }

    /// Identifier for the named column of this table.
    pub fn column(&self, name: &str) -> QueryResult<ColumnIdent> {
        if !self.table.has_column(name) {
            return Err(QueryError::unknown_column(self.name(), name));
        }
        Ok(ColumnIdent {
            table: self.clone(),
            name: name.to_string(),
            alias: None,
        })
    }

    /// Every column, in declaration order.
    pub fn columns(&self) -> Vec<ColumnIdent> {
        self.table
            .columns()
            .iter()
            .map(|c| ColumnIdent {
                table: self.clone(),
                name: c.name().to_string(),
                alias: None,
            })
            .collect()
    }

    /// Same schema table under the same alias.
    pub fn same_as(&self, other: &TableIdent) -> bool {
        self.table.name() == other.table.name() && self.alias == other.alias
    }
}

impl PartialEq for TableIdent {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Scannable for TableIdent {
    fn arg_count(&self) -> usize {
        0
    }

    fn size(&self, _scanner: &Scanner) -> usize {
        self.name().len() + self.alias.as_ref().map_or(0, |a| Symbol::As.len() + a.len())
    }

    fn scan(&self, _scanner: &Scanner, out: &mut String, _args: &mut Vec<Value>) {
        out.push_str(self.name());
        if let Some(alias) = &self.alias {
            out.push_str(Symbol::As.as_str());
            out.push_str(alias);
        }
    }
}

/// A column of a table identifier.
///
/// Renders as `<table alias or name>.<column>`.
#[derive(Debug, Clone)]
pub struct ColumnIdent {
    table: TableIdent,
    name: String,
    alias: Option<String>,
}

impl ColumnIdent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        Self {
            alias: non_empty(alias),
            ..self
        }
    }

    /// The owning table identifier.
    pub fn table(&self) -> &TableIdent {
        &self.table
    }

    pub fn references(&self) -> Option<&ForeignRef> {
        self.table
            .schema_table()
            .column(&self.name)
            .and_then(|c| c.references())
    }

    /// Same column of the same table identifier.
    pub fn same_column(&self, other: &ColumnIdent) -> bool {
        self.name == other.name && self.table.same_as(&other.table)
    }
}

impl Scannable for ColumnIdent {
    fn arg_count(&self) -> usize {
        0
    }

    fn size(&self, _scanner: &Scanner) -> usize {
        self.table.qualifier().len() + Symbol::Period.len() + self.name.len()
    }

    fn scan(&self, _scanner: &Scanner, out: &mut String, _args: &mut Vec<Value>) {
        out.push_str(self.table.qualifier());
        out.push_str(Symbol::Period.as_str());
        out.push_str(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Projection;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;

    fn users() -> TableIdent {
        let mut schema = Schema::new();
        schema.add_table("users").unwrap();
        schema.add_column("users", "id").unwrap();
        schema.add_column("users", "name").unwrap();
        schema.table("users").unwrap()
    }

    fn render<S: Scannable>(node: &S) -> String {
        Scanner::default().string_args(node).0
    }

    #[test]
    fn test_table_from_position() {
        let users = users();
        assert_eq!(render(&users), "users");
        assert_eq!(render(&users.with_alias("u")), "users AS u");
    }

    #[test]
    fn test_column_qualified_by_alias() {
        let users = users().with_alias("u");
        let id = users.column("id").unwrap();
        assert_eq!(render(&id), "u.id");
        assert_eq!(render(&users.unaliased().column("id").unwrap()), "users.id");
    }

    #[test]
    fn test_column_alias_only_in_select_position() {
        let name = users().column("name").unwrap().with_alias("author");
        let projection = Projection::from(name);
        assert_eq!(render(&projection), "users.name");

        let scanner = Scanner::default();
        let mut out = String::new();
        projection.scan_with_alias(&scanner, &mut out, &mut Vec::new());
        assert_eq!(out, "users.name AS author");
        assert_eq!(out.len(), projection.size_with_alias(&scanner));
    }

    #[test]
    fn test_unknown_column() {
        let err = users().column("email").unwrap_err();
        assert!(matches!(
            err,
            QueryError::UnknownColumn { ref table, ref column } if table == "users" && column == "email"
        ));
    }

    #[test]
    fn test_identity() {
        let users = users();
        assert!(users.same_as(&users.clone()));
        assert!(!users.same_as(&users.with_alias("u")));
        assert!(users.with_alias("u").same_as(&users.with_alias("u")));
        assert_eq!(users.columns().len(), 2);
    }
}
