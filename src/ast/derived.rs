//! Derived tables (a SELECT in FROM or projection position) and their columns.

use std::sync::{Arc, OnceLock};

use super::{Projection, Scannable, Select, non_empty};
use crate::error::{QueryError, QueryResult};
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

/// Qualifier used for a derived table that was never given an alias.
const UNNAMED: &str = "derived";

/// A SELECT wrapped under an alias.
///
/// Clones share the alias cell, so columns taken from an anonymous derived
/// table pick up the name assigned to it when the enclosing statement is
/// assembled. The alias can be set once.
#[derive(Debug, Clone)]
pub struct DerivedTable {
    alias: Arc<OnceLock<String>>,
    select: Arc<Select>,
}

impl DerivedTable {
    pub fn new(select: Select, alias: Option<String>) -> Self {
        let cell = OnceLock::new();
        if let Some(alias) = alias.and_then(non_empty) {
            let _ = cell.set(alias);
        }
        Self {
            alias: Arc::new(cell),
            select: Arc::new(select),
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.get().map(String::as_str)
    }

    /// The alias, or a fixed placeholder before one is assigned.
    pub fn qualifier(&self) -> &str {
        self.alias().unwrap_or(UNNAMED)
    }

    /// The same SELECT under a new identity and alias.
    pub fn renamed(&self, alias: impl Into<String>) -> Self {
        let cell = OnceLock::new();
        if let Some(alias) = non_empty(alias) {
            let _ = cell.set(alias);
        }
        Self {
            alias: Arc::new(cell),
            select: Arc::clone(&self.select),
        }
    }

    /// Identity comparison: true for clones of the same derived table.
    pub fn same_as(&self, other: &DerivedTable) -> bool {
        Arc::ptr_eq(&self.alias, &other.alias)
    }

    /// Assign `alias` if none is set yet. Returns whether it was assigned.
    pub(crate) fn assign_alias(&self, alias: String) -> bool {
        self.alias.set(alias).is_ok()
    }

    pub fn select(&self) -> &Select {
        &self.select
    }

    /// The column the inner SELECT exposes under `name`.
    pub fn column(&self, name: &str) -> QueryResult<DerivedColumn> {
        self.select
            .projections()
            .iter()
            .filter_map(Projection::output_name)
            .find(|n| *n == name)
            .map(|n| DerivedColumn {
                table: self.clone(),
                name: n.to_string(),
                alias: None,
            })
            .ok_or_else(|| QueryError::unknown_column(self.qualifier(), name))
    }

    /// Every named column of the inner SELECT, in order.
    pub fn columns(&self) -> Vec<DerivedColumn> {
        self.select
            .projections()
            .iter()
            .filter_map(Projection::output_name)
            .map(|n| DerivedColumn {
                table: self.clone(),
                name: n.to_string(),
                alias: None,
            })
            .collect()
    }

    /// Size as a scalar subquery: `(<select>)`.
    pub(crate) fn scalar_size(&self, scanner: &Scanner) -> usize {
        Symbol::LeftParen.len() + self.select.size(scanner) + Symbol::RightParen.len()
    }

    pub(crate) fn scalar_scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(Symbol::LeftParen.as_str());
        self.select.scan(scanner, out, args);
        out.push_str(Symbol::RightParen.as_str());
    }
}

/// Renders in FROM position: `(<select>) AS <alias>`.
impl Scannable for DerivedTable {
    fn arg_count(&self) -> usize {
        self.select.arg_count()
    }

    fn size(&self, scanner: &Scanner) -> usize {
        self.scalar_size(scanner) + Symbol::As.len() + self.qualifier().len()
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        self.scalar_scan(scanner, out, args);
        out.push_str(Symbol::As.as_str());
        out.push_str(self.qualifier());
    }
}

/// A column of a derived table, qualified by the derived table's alias.
#[derive(Debug, Clone)]
pub struct DerivedColumn {
    table: DerivedTable,
    name: String,
    alias: Option<String>,
}

impl DerivedColumn {
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

    pub fn table(&self) -> &DerivedTable {
        &self.table
    }
}

impl Scannable for DerivedColumn {
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
