//! Template-driven expressions.
//!
//! An expression is a constant template of symbol slots and element slots plus
//! the child elements that fill the element slots, left to right. Functions use
//! the same machinery with their own template table.

use super::{Element, Scannable, Selection};
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

/// One slot of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Literal symbol text
    Sym(Symbol),
    /// The next child element
    Elem,
    /// A symbol chosen when the node is built (CAST type, EXTRACT unit)
    Placeholder,
}

use Slot::{Elem, Placeholder, Sym};

const EQUAL: &[Slot] = &[Elem, Sym(Symbol::Equal), Elem];
const NOT_EQUAL: &[Slot] = &[Elem, Sym(Symbol::NotEqual), Elem];
const GREATER: &[Slot] = &[Elem, Sym(Symbol::Greater), Elem];
const GREATER_OR_EQUAL: &[Slot] = &[Elem, Sym(Symbol::GreaterOrEqual), Elem];
const LESS: &[Slot] = &[Elem, Sym(Symbol::Less), Elem];
const LESS_OR_EQUAL: &[Slot] = &[Elem, Sym(Symbol::LessOrEqual), Elem];
const LIKE: &[Slot] = &[Elem, Sym(Symbol::Like), Elem];
const AND: &[Slot] = &[
    Sym(Symbol::LeftParen),
    Elem,
    Sym(Symbol::And),
    Elem,
    Sym(Symbol::RightParen),
];
const OR: &[Slot] = &[
    Sym(Symbol::LeftParen),
    Elem,
    Sym(Symbol::Or),
    Elem,
    Sym(Symbol::RightParen),
];
const IN: &[Slot] = &[Elem, Sym(Symbol::In), Elem, Sym(Symbol::RightParen)];
const NOT_IN: &[Slot] = &[Elem, Sym(Symbol::NotIn), Elem, Sym(Symbol::RightParen)];
const BETWEEN: &[Slot] = &[Elem, Sym(Symbol::Between), Elem, Sym(Symbol::And), Elem];
const IS_NULL: &[Slot] = &[Elem, Sym(Symbol::IsNull)];
const IS_NOT_NULL: &[Slot] = &[Elem, Sym(Symbol::IsNotNull)];

/// Expression kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Equal,
    NotEqual,
    And,
    Or,
    In,
    NotIn,
    Between,
    IsNull,
    IsNotNull,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Like,
}

impl ExprKind {
    pub(crate) fn template(self) -> &'static [Slot] {
        match self {
            ExprKind::Equal => EQUAL,
            ExprKind::NotEqual => NOT_EQUAL,
            ExprKind::And => AND,
            ExprKind::Or => OR,
            ExprKind::In => IN,
            ExprKind::NotIn => NOT_IN,
            ExprKind::Between => BETWEEN,
            ExprKind::IsNull => IS_NULL,
            ExprKind::IsNotNull => IS_NOT_NULL,
            ExprKind::Less => LESS,
            ExprKind::LessOrEqual => LESS_OR_EQUAL,
            ExprKind::Greater => GREATER,
            ExprKind::GreaterOrEqual => GREATER_OR_EQUAL,
            ExprKind::Like => LIKE,
        }
    }

    /// Number of child elements the template consumes.
    pub fn arity(self) -> usize {
        element_slots(self.template())
    }
}

pub(crate) fn element_slots(template: &[Slot]) -> usize {
    template.iter().filter(|s| matches!(s, Elem)).count()
}

/// Size of a template filled with `children` and `placeholder`.
pub(crate) fn template_size(
    template: &[Slot],
    placeholder: Option<Symbol>,
    children: &[Element],
    scanner: &Scanner,
) -> usize {
    let mut children = children.iter();
    template
        .iter()
        .map(|slot| match slot {
            Sym(s) => s.len(),
            Elem => children.next().map_or(0, |c| c.size(scanner)),
            Placeholder => placeholder.map_or(0, Symbol::len),
        })
        .sum()
}

pub(crate) fn template_scan(
    template: &[Slot],
    placeholder: Option<Symbol>,
    children: &[Element],
    scanner: &Scanner,
    out: &mut String,
    args: &mut Vec<Value>,
) {
    let mut children = children.iter();
    for slot in template {
        match slot {
            Sym(s) => out.push_str(s.as_str()),
            Elem => {
                if let Some(child) = children.next() {
                    child.scan(scanner, out, args);
                }
            }
            Placeholder => {
                if let Some(s) = placeholder {
                    out.push_str(s.as_str());
                }
            }
        }
    }
}

/// A comparison, logical, set or null test.
#[derive(Debug, Clone)]
pub struct Expression {
    kind: ExprKind,
    children: Vec<Element>,
}

impl Expression {
    /// Build an expression; `children` must match the kind's arity.
    pub(crate) fn new(kind: ExprKind, children: Vec<Element>) -> Self {
        debug_assert_eq!(children.len(), kind.arity(), "{:?} arity", kind);
        Self { kind, children }
    }

    pub fn kind(&self) -> ExprKind {
        self.kind
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Every selection referenced by a column anywhere in this expression.
    pub fn sources(&self) -> Vec<Selection> {
        let mut out = Vec::new();
        self.collect_sources(&mut out);
        out
    }

    pub(crate) fn collect_sources(&self, out: &mut Vec<Selection>) {
        for child in &self.children {
            child.collect_sources(out);
        }
    }
}

impl Scannable for Expression {
    fn arg_count(&self) -> usize {
        self.children.iter().map(Scannable::arg_count).sum()
    }

    fn size(&self, scanner: &Scanner) -> usize {
        template_size(self.kind.template(), None, &self.children, scanner)
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        template_scan(self.kind.template(), None, &self.children, scanner, out, args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::List;
    use pretty_assertions::assert_eq;

    fn render(e: &Expression, scanner: &Scanner) -> (String, Vec<Value>) {
        let (sql, args) = scanner.string_args(e);
        assert_eq!(
            sql.len(),
            e.size(scanner) + scanner.interpolation_width(e.arg_count())
        );
        (sql, args)
    }

    #[test]
    fn test_arity() {
        assert_eq!(ExprKind::Equal.arity(), 2);
        assert_eq!(ExprKind::Between.arity(), 3);
        assert_eq!(ExprKind::IsNull.arity(), 1);
        assert_eq!(ExprKind::In.arity(), 2);
    }

    #[test]
    fn test_and_is_parenthesized() {
        let e = Expression::new(
            ExprKind::And,
            vec![
                Expression::new(ExprKind::Equal, vec![1.into(), 2.into()]).into(),
                Expression::new(ExprKind::IsNull, vec![3.into()]).into(),
            ],
        );
        let (sql, args) = render(&e, &Scanner::postgres());
        assert_eq!(sql, "($1 = $2 AND $3 IS NULL)");
        assert_eq!(args, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_in_single_value() {
        let e = Expression::new(ExprKind::In, vec![1.into(), List::new([2]).into()]);
        assert_eq!(render(&e, &Scanner::mysql()).0, "? IN (?)");
    }

    #[test]
    fn test_between() {
        let e = Expression::new(ExprKind::Between, vec![5.into(), 1.into(), 10.into()]);
        assert_eq!(render(&e, &Scanner::postgres()).0, "$1 BETWEEN $2 AND $3");
    }
}
