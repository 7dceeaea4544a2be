//! Condition builders for WHERE, HAVING and ON.
//!
//! Operands are anything convertible to an [`Element`]: columns, functions,
//! nested expressions, or plain values (which become bound literals).

use crate::ast::{Element, ExprKind, Expression, List};

fn binary(kind: ExprKind, left: impl Into<Element>, right: impl Into<Element>) -> Expression {
    Expression::new(kind, vec![left.into(), right.into()])
}

/// `left = right`
pub fn eq(left: impl Into<Element>, right: impl Into<Element>) -> Expression {
    binary(ExprKind::Equal, left, right)
}

pub fn ne(left: impl Into<Element>, right: impl Into<Element>) -> Expression {
    binary(ExprKind::NotEqual, left, right)
}

pub fn lt(left: impl Into<Element>, right: impl Into<Element>) -> Expression {
    binary(ExprKind::Less, left, right)
}

pub fn lte(left: impl Into<Element>, right: impl Into<Element>) -> Expression {
    binary(ExprKind::LessOrEqual, left, right)
}

pub fn gt(left: impl Into<Element>, right: impl Into<Element>) -> Expression {
    binary(ExprKind::Greater, left, right)
}

pub fn gte(left: impl Into<Element>, right: impl Into<Element>) -> Expression {
    binary(ExprKind::GreaterOrEqual, left, right)
}

pub fn like(subject: impl Into<Element>, pattern: impl Into<Element>) -> Expression {
    binary(ExprKind::Like, subject, pattern)
}

/// `(left AND right)`
pub fn and(left: Expression, right: Expression) -> Expression {
    binary(ExprKind::And, left, right)
}

/// `(left OR right)`
pub fn or(left: Expression, right: Expression) -> Expression {
    binary(ExprKind::Or, left, right)
}

/// `subject IN (v1, v2, ...)`. Pass at least one value.
pub fn is_in<V: Into<Element>>(
    subject: impl Into<Element>,
    values: impl IntoIterator<Item = V>,
) -> Expression {
    binary(ExprKind::In, subject, List::new(values))
}

/// `subject NOT IN (v1, v2, ...)`. Pass at least one value.
pub fn not_in<V: Into<Element>>(
    subject: impl Into<Element>,
    values: impl IntoIterator<Item = V>,
) -> Expression {
    binary(ExprKind::NotIn, subject, List::new(values))
}

/// `subject BETWEEN low AND high`
pub fn between(
    subject: impl Into<Element>,
    low: impl Into<Element>,
    high: impl Into<Element>,
) -> Expression {
    Expression::new(ExprKind::Between, vec![subject.into(), low.into(), high.into()])
}

pub fn is_null(subject: impl Into<Element>) -> Expression {
    Expression::new(ExprKind::IsNull, vec![subject.into()])
}

pub fn is_not_null(subject: impl Into<Element>) -> Expression {
    Expression::new(ExprKind::IsNotNull, vec![subject.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnIdent, Scannable};
    use crate::scanner::Scanner;
    use crate::schema::Schema;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn name() -> ColumnIdent {
        let mut schema = Schema::new();
        schema.add_table("users").unwrap();
        schema.add_column("users", "name").unwrap();
        schema.table("users").unwrap().column("name").unwrap()
    }

    fn render(e: &Expression) -> (String, Vec<Value>) {
        let scanner = Scanner::mysql();
        let (sql, args) = scanner.string_args(e);
        assert_eq!(sql.len(), e.size(&scanner) + e.arg_count());
        (sql, args)
    }

    #[test]
    fn test_or_is_parenthesized() {
        let name = name();
        let (sql, args) = render(&or(eq(&name, "foo"), eq(&name, "bar")));
        assert_eq!(sql, "(users.name = ? OR users.name = ?)");
        assert_eq!(
            args,
            vec![Value::Text("foo".to_string()), Value::Text("bar".to_string())]
        );
    }

    #[test]
    fn test_operands_in_any_order() {
        let name = name();
        assert_eq!(render(&ne("x", &name)).0, "? != users.name");
        assert_eq!(render(&gte(&name, "m")).0, "users.name >= ?");
    }

    #[test]
    fn test_set_and_null_tests() {
        let name = name();
        assert_eq!(render(&is_in(&name, ["a"])).0, "users.name IN (?)");
        assert_eq!(render(&not_in(&name, ["a", "b"])).0, "users.name NOT IN (?, ?)");
        assert_eq!(render(&is_not_null(&name)).0, "users.name IS NOT NULL");
        assert_eq!(render(&like(&name, "a%")).0, "users.name LIKE ?");
    }

    #[test]
    fn test_alias_suppressed_in_conditions() {
        let name = name().with_alias("author");
        let (sql, _) = render(&and(is_null(&name), lt(&name, "z")));
        assert_eq!(sql, "(users.name IS NULL AND users.name < ?)");
        assert!(!sql.contains(" AS "));
    }
}
