//! UPDATE statements.

use super::insert::{Assignments, check_assignments, check_target_filter};
use super::{ColumnIdent, Expression, FilterClause, Scannable, TableIdent};
use crate::error::QueryResult;
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

/// `UPDATE t SET a = ?, b = ?[ WHERE ...]`.
#[derive(Debug, Clone)]
pub struct Update {
    table: TableIdent,
    columns: Vec<String>,
    values: Vec<Value>,
    filter: FilterClause,
}

impl Update {
    /// Set `columns` of `table` to `values`. The two must have the same length
    /// and every column must belong to `table`.
    pub fn new(table: &TableIdent, columns: Vec<ColumnIdent>, values: Vec<Value>) -> QueryResult<Self> {
        let columns = check_assignments(table, &columns, &values)?;
        Ok(Self {
            table: table.unaliased(),
            columns,
            values,
            filter: FilterClause::where_clause(),
        })
    }

    pub fn builder() -> UpdateBuilder {
        UpdateBuilder::default()
    }

    /// Append a WHERE expression. Repeated calls are ANDed.
    ///
    /// Columns must come from the unaliased target table.
    pub fn filter(mut self, expr: Expression) -> QueryResult<Self> {
        check_target_filter(&self.table, &expr)?;
        self.filter.push(expr);
        Ok(self)
    }

    pub fn table(&self) -> &TableIdent {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn where_clause(&self) -> &FilterClause {
        &self.filter
    }
}

impl Scannable for Update {
    fn arg_count(&self) -> usize {
        self.values.len() + self.filter.arg_count()
    }

    fn size(&self, scanner: &Scanner) -> usize {
        let assignments = self.columns.iter().map(|c| c.len() + Symbol::Equal.len()).sum::<usize>()
            + Symbol::Comma.len() * self.columns.len().saturating_sub(1);
        let filter = if self.filter.is_empty() {
            0
        } else {
            scanner.separator().len() + self.filter.size(scanner)
        };
        Symbol::Update.len() + self.table.size(scanner) + Symbol::Set.len() + assignments + filter
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(Symbol::Update.as_str());
        self.table.scan(scanner, out, args);
        out.push_str(Symbol::Set.as_str());
        for (i, (column, value)) in self.columns.iter().zip(&self.values).enumerate() {
            if i > 0 {
                out.push_str(Symbol::Comma.as_str());
            }
            out.push_str(column);
            out.push_str(Symbol::Equal.as_str());
            scanner.interpolate(value, out, args);
        }
        if !self.filter.is_empty() {
            out.push_str(scanner.separator());
            self.filter.scan(scanner, out, args);
        }
    }
}

/// Name-keyed UPDATE construction.
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    table: Option<TableIdent>,
    assignments: Assignments,
    filters: Vec<Expression>,
}

impl UpdateBuilder {
    pub fn table(mut self, table: &TableIdent) -> Self {
        self.table = Some(table.clone());
        self
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.set(column, value);
        self
    }

    pub fn filter(mut self, expr: Expression) -> Self {
        self.filters.push(expr);
        self
    }

    pub fn build(self) -> QueryResult<Update> {
        let (table, columns, values) = self.assignments.resolve(self.table)?;
        let mut filter = FilterClause::where_clause();
        for expr in self.filters {
            check_target_filter(&table, &expr)?;
            filter.push(expr);
        }
        Ok(Update {
            table,
            columns,
            values,
            filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use crate::error::QueryError;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;

    fn users() -> TableIdent {
        let mut schema = Schema::new();
        schema.add_table("users").unwrap();
        schema.add_column("users", "id").unwrap();
        schema.add_column("users", "name").unwrap();
        schema.table("users").unwrap()
    }

    #[test]
    fn test_update_with_filter() {
        let users = users().with_alias("u");
        let update = Update::new(
            &users,
            vec![users.column("name").unwrap().with_alias("n")],
            vec![Value::from("bob")],
        )
        .unwrap()
        .filter(Expression::new(
            ExprKind::Equal,
            vec![users.unaliased().column("id").unwrap().into(), 3.into()],
        ))
        .unwrap();
        let scanner = Scanner::postgres();
        let (sql, args) = scanner.string_args(&update);
        assert_eq!(sql, "UPDATE users SET name = $1 WHERE users.id = $2");
        assert_eq!(args, vec![Value::Text("bob".to_string()), Value::Int(3)]);
        assert_eq!(
            sql.len(),
            update.size(&scanner) + scanner.interpolation_width(update.arg_count())
        );
    }

    #[test]
    fn test_filter_through_target_alias_rejected() {
        let u = users().with_alias("u");
        let by_alias = || {
            Expression::new(ExprKind::Equal, vec![u.column("id").unwrap().into(), 3.into()])
        };

        let err = Update::new(&u, vec![u.column("name").unwrap()], vec![Value::from("bob")])
            .unwrap()
            .filter(by_alias())
            .unwrap_err();
        assert!(matches!(err, QueryError::ForeignFilter { .. }));

        let err = Update::builder()
            .table(&u)
            .set("name", "bob")
            .filter(by_alias())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::ForeignFilter { ref qualifier, .. } if qualifier == "u"
        ));
    }

    #[test]
    fn test_builder() {
        let users = users();
        let update = Update::builder()
            .table(&users)
            .set("name", "carol")
            .set("id", 9)
            .build()
            .unwrap();
        let (sql, args) = Scanner::mysql().string_args(&update);
        assert_eq!(sql, "UPDATE users SET name = ?, id = ?");
        assert_eq!(args.len(), 2);

        assert!(matches!(
            Update::builder().set("name", "x").build(),
            Err(QueryError::TableRequired)
        ));
        assert!(matches!(
            Update::builder().table(&users).build(),
            Err(QueryError::NoValues)
        ));
    }
}
