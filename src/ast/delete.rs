//! DELETE statements.

use super::insert::check_target_filter;
use super::{Expression, FilterClause, Scannable, TableIdent};
use crate::error::{QueryError, QueryResult};
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

/// `DELETE FROM t[ WHERE ...]`.
#[derive(Debug, Clone)]
pub struct Delete {
    table: TableIdent,
    filter: FilterClause,
}

impl Delete {
    pub fn new(table: &TableIdent) -> Self {
        Self {
            table: table.unaliased(),
            filter: FilterClause::where_clause(),
        }
    }

    pub fn builder() -> DeleteBuilder {
        DeleteBuilder::default()
    }

    /// Append a WHERE expression. Repeated calls are ANDed.
    ///
    /// The target renders bare, so columns must come from the unaliased
    /// table; anything else is [`QueryError::ForeignFilter`].
    pub fn filter(mut self, expr: Expression) -> QueryResult<Self> {
        check_target_filter(&self.table, &expr)?;
        self.filter.push(expr);
        Ok(self)
    }

    pub fn table(&self) -> &TableIdent {
        &self.table
    }

    pub fn where_clause(&self) -> &FilterClause {
        &self.filter
    }
}

impl Scannable for Delete {
    fn arg_count(&self) -> usize {
        self.filter.arg_count()
    }

    fn size(&self, scanner: &Scanner) -> usize {
        let filter = if self.filter.is_empty() {
            0
        } else {
            scanner.separator().len() + self.filter.size(scanner)
        };
        Symbol::DeleteFrom.len() + self.table.size(scanner) + filter
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(Symbol::DeleteFrom.as_str());
        self.table.scan(scanner, out, args);
        if !self.filter.is_empty() {
            out.push_str(scanner.separator());
            self.filter.scan(scanner, out, args);
        }
    }
}

/// DELETE construction where the target may be missing.
#[derive(Debug, Clone, Default)]
pub struct DeleteBuilder {
    table: Option<TableIdent>,
    filters: Vec<Expression>,
}

impl DeleteBuilder {
    pub fn table(mut self, table: &TableIdent) -> Self {
        self.table = Some(table.clone());
        self
    }

    pub fn filter(mut self, expr: Expression) -> Self {
        self.filters.push(expr);
        self
    }

    pub fn build(self) -> QueryResult<Delete> {
        let table = self.table.ok_or(QueryError::TableRequired)?;
        self.filters
            .into_iter()
            .try_fold(Delete::new(&table), Delete::filter)
    }
}
