//! INSERT statements.

use super::{ColumnIdent, Expression, Scannable, Selection, TableIdent};
use crate::error::{QueryError, QueryResult};
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

/// Check a column/value assignment against `table` and return the bare
/// column names in order.
pub(crate) fn check_assignments(
    table: &TableIdent,
    columns: &[ColumnIdent],
    values: &[Value],
) -> QueryResult<Vec<String>> {
    if values.is_empty() {
        return Err(QueryError::NoValues);
    }
    if columns.len() != values.len() {
        return Err(QueryError::ValueCountMismatch {
            columns: columns.len(),
            values: values.len(),
        });
    }
    columns
        .iter()
        .map(|c| {
            if c.table().name() == table.name() {
                Ok(c.name().to_string())
            } else {
                Err(QueryError::ForeignColumn {
                    column: format!("{}.{}", c.table().name(), c.name()),
                    table: table.name().to_string(),
                })
            }
        })
        .collect()
}

/// Check that every column in an UPDATE/DELETE filter qualifies through the
/// bare `table` name.
pub(crate) fn check_target_filter(table: &TableIdent, expr: &Expression) -> QueryResult<()> {
    for source in expr.sources() {
        let bare = matches!(&source, Selection::Table(t) if t.name() == table.name() && t.alias().is_none());
        if !bare {
            return Err(QueryError::ForeignFilter {
                qualifier: source.qualifier().to_string(),
                table: table.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Ordered name to value pairs; setting a name twice keeps the last value in
/// the first position.
#[derive(Debug, Clone, Default)]
pub(crate) struct Assignments {
    pairs: Vec<(String, Value)>,
}

impl Assignments {
    pub(crate) fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(c, _)| *c == column) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((column, value)),
        }
    }

    /// Resolve every name against `table`.
    pub(crate) fn resolve(
        self,
        table: Option<TableIdent>,
    ) -> QueryResult<(TableIdent, Vec<String>, Vec<Value>)> {
        let table = table.ok_or(QueryError::TableRequired)?;
        if self.pairs.is_empty() {
            return Err(QueryError::NoValues);
        }
        let mut columns = Vec::with_capacity(self.pairs.len());
        let mut values = Vec::with_capacity(self.pairs.len());
        for (column, value) in self.pairs {
            if !table.has_column(&column) {
                return Err(QueryError::unknown_column(table.name(), column));
            }
            columns.push(column);
            values.push(value);
        }
        Ok((table.unaliased(), columns, values))
    }
}

fn names_size(names: &[String]) -> usize {
    names.iter().map(String::len).sum::<usize>()
        + Symbol::Comma.len() * names.len().saturating_sub(1)
}

/// `INSERT INTO t (a, b) VALUES (?, ?)`.
///
/// The target and its columns are always rendered bare.
#[derive(Debug, Clone)]
pub struct Insert {
    table: TableIdent,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Insert {
    /// Insert `values` into `columns` of `table`. The two must have the same
    /// length and every column must belong to `table`.
    pub fn new(table: &TableIdent, columns: Vec<ColumnIdent>, values: Vec<Value>) -> QueryResult<Self> {
        let columns = check_assignments(table, &columns, &values)?;
        Ok(Self {
            table: table.unaliased(),
            columns,
            values,
        })
    }

    pub fn builder() -> InsertBuilder {
        InsertBuilder::default()
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
}

impl Scannable for Insert {
    fn arg_count(&self) -> usize {
        self.values.len()
    }

    fn size(&self, scanner: &Scanner) -> usize {
        Symbol::InsertInto.len()
            + self.table.size(scanner)
            + Symbol::OpenList.len()
            + names_size(&self.columns)
            + Symbol::Values.len()
            + Symbol::Comma.len() * self.values.len().saturating_sub(1)
            + Symbol::RightParen.len()
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(Symbol::InsertInto.as_str());
        self.table.scan(scanner, out, args);
        out.push_str(Symbol::OpenList.as_str());
        out.push_str(&self.columns.join(Symbol::Comma.as_str()));
        out.push_str(Symbol::Values.as_str());
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                out.push_str(Symbol::Comma.as_str());
            }
            scanner.interpolate(value, out, args);
        }
        out.push_str(Symbol::RightParen.as_str());
    }
}

/// Name-keyed INSERT construction.
///
/// ```ignore
/// let insert = Insert::builder()
///     .table(&users)
///     .value("name", "alice")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InsertBuilder {
    table: Option<TableIdent>,
    assignments: Assignments,
}

impl InsertBuilder {
    pub fn table(mut self, table: &TableIdent) -> Self {
        self.table = Some(table.clone());
        self
    }

    pub fn value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.set(column, value);
        self
    }

    pub fn build(self) -> QueryResult<Insert> {
        let (table, columns, values) = self.assignments.resolve(self.table)?;
        Ok(Insert {
            table,
            columns,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        let mut schema = Schema::new();
        schema.add_table("users").unwrap();
        schema.add_column("users", "id").unwrap();
        schema.add_column("users", "name").unwrap();
        schema.add_table("posts").unwrap();
        schema.add_column("posts", "id").unwrap();
        schema
    }

    #[test]
    fn test_insert_is_bare_and_parameterized() {
        let users = schema().table("users").unwrap().with_alias("u");
        let insert = Insert::new(
            &users,
            vec![
                users.column("id").unwrap().with_alias("x"),
                users.column("name").unwrap(),
            ],
            vec![Value::Int(1), Value::from("alice")],
        )
        .unwrap();
        let scanner = Scanner::postgres();
        let (sql, args) = scanner.string_args(&insert);
        assert_eq!(sql, "INSERT INTO users (id, name) VALUES ($1, $2)");
        assert_eq!(args, vec![Value::Int(1), Value::Text("alice".to_string())]);
        assert_eq!(sql.len(), insert.size(&scanner) + scanner.interpolation_width(2));
    }

    #[test]
    fn test_typed_construction_errors() {
        let schema = schema();
        let users = schema.table("users").unwrap();
        let posts = schema.table("posts").unwrap();

        let err = Insert::new(&users, vec![users.column("id").unwrap()], vec![]).unwrap_err();
        assert!(matches!(err, QueryError::NoValues));

        let err = Insert::new(
            &users,
            vec![users.column("id").unwrap()],
            vec![Value::Int(1), Value::Int(2)],
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::ValueCountMismatch { columns: 1, values: 2 }));

        let err = Insert::new(&users, vec![posts.column("id").unwrap()], vec![Value::Int(1)])
            .unwrap_err();
        assert!(matches!(err, QueryError::ForeignColumn { .. }));
    }

    #[test]
    fn test_builder() {
        let users = schema().table("users").unwrap();
        let insert = Insert::builder()
            .table(&users)
            .value("name", "alice")
            .value("id", 7)
            .value("name", "bob")
            .build()
            .unwrap();
        let (sql, args) = Scanner::mysql().string_args(&insert);
        assert_eq!(sql, "INSERT INTO users (name, id) VALUES (?, ?)");
        assert_eq!(args, vec![Value::Text("bob".to_string()), Value::Int(7)]);
    }

    #[test]
    fn test_builder_errors() {
        let users = schema().table("users").unwrap();
        assert!(matches!(
            Insert::builder().value("id", 1).build(),
            Err(QueryError::TableRequired)
        ));
        assert!(matches!(
            Insert::builder().table(&users).build(),
            Err(QueryError::NoValues)
        ));
        assert!(matches!(
            Insert::builder().table(&users).value("email", "x").build(),
            Err(QueryError::UnknownColumn { .. })
        ));
    }
}
