//! Query AST.
//!
//! Every node implements [`Scannable`]: it reports how many arguments it binds,
//! how many bytes of SQL it produces (excluding parameter markers), and writes
//! itself into an output buffer. Nodes come in three roles:
//!
//! - [`Projection`]: produces a scalar (columns, literals, functions, subqueries)
//! - [`Selection`]: produces rows (tables, derived tables)
//! - [`Element`]: anything an expression can hold
//!
//! Projections render their `AS alias` suffix only in SELECT-list position; the
//! plain [`Scannable`] rendering of a projection never includes it.

mod clauses;
mod delete;
mod derived;
mod expression;
mod function;
mod identifiers;
mod insert;
mod list;
mod literal;
mod select;
mod sort;
mod statement;
mod trim;
mod update;

pub use clauses::{FilterClause, FromClause, GroupByClause, Join, JoinKind, LimitClause, OrderByClause};
pub use delete::{Delete, DeleteBuilder};
pub use derived::{DerivedColumn, DerivedTable};
pub use expression::{ExprKind, Expression};
pub use function::{DataType, Function, FunctionKind, IntervalUnit};
pub use identifiers::{ColumnIdent, TableIdent};
pub use insert::{Insert, InsertBuilder};
pub use list::List;
pub use literal::Literal;
pub use select::Select;
pub use sort::{SortColumn, SortExt};
pub use statement::Statement;
pub use trim::{Trim, TrimLocation};
pub use update::{Update, UpdateBuilder};

pub(crate) use expression::Slot;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

/// The rendering contract shared by every AST node.
///
/// `scan` must write exactly `size(scanner)` bytes plus the width of
/// `arg_count()` parameter markers, and push exactly `arg_count()` values.
pub trait Scannable {
    /// Number of arguments this subtree binds.
    fn arg_count(&self) -> usize;

    /// Bytes of SQL this subtree produces, excluding parameter markers.
    fn size(&self, scanner: &Scanner) -> usize;

    /// Write SQL into `out` and append bound values to `args`.
    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>);
}

impl<T: Scannable + ?Sized> Scannable for Box<T> {
    fn arg_count(&self) -> usize {
        (**self).arg_count()
    }

    fn size(&self, scanner: &Scanner) -> usize {
        (**self).size(scanner)
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        (**self).scan(scanner, out, args)
    }
}

/// Empty aliases are treated as no alias.
pub(crate) fn non_empty(alias: impl Into<String>) -> Option<String> {
    let alias = alias.into();
    if alias.is_empty() { None } else { Some(alias) }
}

/// Size of `items` rendered comma-separated.
pub(crate) fn list_size<T: Scannable>(items: &[T], scanner: &Scanner) -> usize {
    items.iter().map(|i| i.size(scanner)).sum::<usize>()
        + Symbol::Comma.len() * items.len().saturating_sub(1)
}

pub(crate) fn list_scan<T: Scannable>(
    items: &[T],
    scanner: &Scanner,
    out: &mut String,
    args: &mut Vec<Value>,
) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(Symbol::Comma.as_str());
        }
        item.scan(scanner, out, args);
    }
}

pub(crate) fn list_arg_count<T: Scannable>(items: &[T]) -> usize {
    items.iter().map(Scannable::arg_count).sum()
}

fn alias_suffix_size(alias: Option<&str>) -> usize {
    alias.map_or(0, |a| Symbol::As.len() + a.len())
}

fn scan_alias_suffix(alias: Option<&str>, out: &mut String) {
    if let Some(a) = alias {
        out.push_str(Symbol::As.as_str());
        out.push_str(a);
    }
}

/// A node producing a single scalar column.
#[derive(Debug, Clone)]
pub enum Projection {
    Column(ColumnIdent),
    Derived(DerivedColumn),
    Literal(Literal),
    Function(Box<Function>),
    Trim(Box<Trim>),
    /// A SELECT used as a scalar value
    Subquery(DerivedTable),
}

impl Projection {
    pub fn alias(&self) -> Option<&str> {
        match self {
            Projection::Column(c) => c.alias(),
            Projection::Derived(d) => d.alias(),
            Projection::Literal(l) => l.alias(),
            Projection::Function(f) => f.alias(),
            Projection::Trim(t) => t.alias(),
            Projection::Subquery(s) => s.alias(),
        }
    }

    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        match self {
            Projection::Column(c) => Projection::Column(c.with_alias(alias)),
            Projection::Derived(d) => Projection::Derived(d.with_alias(alias)),
            Projection::Literal(l) => Projection::Literal(l.with_alias(alias)),
            Projection::Function(f) => Projection::Function(Box::new(f.with_alias(alias))),
            Projection::Trim(t) => Projection::Trim(Box::new(t.with_alias(alias))),
            Projection::Subquery(s) => Projection::Subquery(s.renamed(alias)),
        }
    }

    /// The name an enclosing query sees this projection under: its alias, or
    /// the column name for unaliased columns.
    pub fn output_name(&self) -> Option<&str> {
        match self {
            Projection::Column(c) => Some(c.alias().unwrap_or(c.name())),
            Projection::Derived(d) => Some(d.alias().unwrap_or(d.name())),
            other => other.alias(),
        }
    }

    /// The selection this projection reads from, if any.
    pub fn source(&self) -> Option<Selection> {
        let mut sources = Vec::new();
        self.collect_sources(&mut sources);
        sources.into_iter().next()
    }

    pub(crate) fn collect_sources(&self, out: &mut Vec<Selection>) {
        match self {
            Projection::Column(c) => out.push(Selection::Table(c.table().clone())),
            Projection::Derived(d) => out.push(Selection::Derived(d.table().clone())),
            Projection::Function(f) => f.collect_sources(out),
            Projection::Trim(t) => t.subject().collect_sources(out),
            Projection::Literal(_) | Projection::Subquery(_) => {}
        }
    }

    /// Sort ascending by this projection.
    pub fn asc(self) -> SortColumn {
        SortColumn::new(self, false)
    }

    /// Sort descending by this projection.
    pub fn desc(self) -> SortColumn {
        SortColumn::new(self, true)
    }

    /// Size in SELECT-list position, alias included.
    pub(crate) fn size_with_alias(&self, scanner: &Scanner) -> usize {
        self.size(scanner) + alias_suffix_size(self.alias())
    }

    /// Render in SELECT-list position, alias included.
    pub(crate) fn scan_with_alias(
        &self,
        scanner: &Scanner,
        out: &mut String,
        args: &mut Vec<Value>,
    ) {
        self.scan(scanner, out, args);
        scan_alias_suffix(self.alias(), out);
    }
}

impl Scannable for Projection {
    fn arg_count(&self) -> usize {
        match self {
            Projection::Column(c) => c.arg_count(),
            Projection::Derived(d) => d.arg_count(),
            Projection::Literal(l) => l.arg_count(),
            Projection::Function(f) => f.arg_count(),
            Projection::Trim(t) => t.arg_count(),
            Projection::Subquery(s) => s.arg_count(),
        }
    }

    fn size(&self, scanner: &Scanner) -> usize {
        match self {
            Projection::Column(c) => c.size(scanner),
            Projection::Derived(d) => d.size(scanner),
            Projection::Literal(l) => l.size(scanner),
            Projection::Function(f) => f.size(scanner),
            Projection::Trim(t) => t.size(scanner),
            Projection::Subquery(s) => s.scalar_size(scanner),
        }
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        match self {
            Projection::Column(c) => c.scan(scanner, out, args),
            Projection::Derived(d) => d.scan(scanner, out, args),
            Projection::Literal(l) => l.scan(scanner, out, args),
            Projection::Function(f) => f.scan(scanner, out, args),
            Projection::Trim(t) => t.scan(scanner, out, args),
            Projection::Subquery(s) => s.scalar_scan(scanner, out, args),
        }
    }
}

impl From<ColumnIdent> for Projection {
    fn from(c: ColumnIdent) -> Self {
        Projection::Column(c)
    }
}

impl From<&ColumnIdent> for Projection {
    fn from(c: &ColumnIdent) -> Self {
        Projection::Column(c.clone())
    }
}

impl From<DerivedColumn> for Projection {
    fn from(d: DerivedColumn) -> Self {
        Projection::Derived(d)
    }
}

impl From<Literal> for Projection {
    fn from(l: Literal) -> Self {
        Projection::Literal(l)
    }
}

impl From<Function> for Projection {
    fn from(f: Function) -> Self {
        Projection::Function(Box::new(f))
    }
}

impl From<Trim> for Projection {
    fn from(t: Trim) -> Self {
        Projection::Trim(Box::new(t))
    }
}

impl From<DerivedTable> for Projection {
    fn from(s: DerivedTable) -> Self {
        Projection::Subquery(s)
    }
}

/// A node producing rows.
#[derive(Debug, Clone)]
pub enum Selection {
    Table(TableIdent),
    Derived(DerivedTable),
}

impl Selection {
    /// The text used to qualify columns of this selection.
    pub fn qualifier(&self) -> &str {
        match self {
            Selection::Table(t) => t.qualifier(),
            Selection::Derived(d) => d.qualifier(),
        }
    }

    /// Same identity and same alias.
    pub fn same_as(&self, other: &Selection) -> bool {
        match (self, other) {
            (Selection::Table(a), Selection::Table(b)) => a.same_as(b),
            (Selection::Derived(a), Selection::Derived(b)) => a.same_as(b),
            _ => false,
        }
    }

    /// Every column of this selection as a projection, in declaration order.
    pub fn projections(&self) -> Vec<Projection> {
        match self {
            Selection::Table(t) => t.columns().into_iter().map(Projection::from).collect(),
            Selection::Derived(d) => d.columns().into_iter().map(Projection::from).collect(),
        }
    }

    pub(crate) fn as_table(&self) -> Option<&TableIdent> {
        match self {
            Selection::Table(t) => Some(t),
            Selection::Derived(_) => None,
        }
    }
}

impl Scannable for Selection {
    fn arg_count(&self) -> usize {
        match self {
            Selection::Table(t) => t.arg_count(),
            Selection::Derived(d) => d.arg_count(),
        }
    }

    fn size(&self, scanner: &Scanner) -> usize {
        match self {
            Selection::Table(t) => t.size(scanner),
            Selection::Derived(d) => d.size(scanner),
        }
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        match self {
            Selection::Table(t) => t.scan(scanner, out, args),
            Selection::Derived(d) => d.scan(scanner, out, args),
        }
    }
}

impl From<TableIdent> for Selection {
    fn from(t: TableIdent) -> Self {
        Selection::Table(t)
    }
}

impl From<&TableIdent> for Selection {
    fn from(t: &TableIdent) -> Self {
        Selection::Table(t.clone())
    }
}

impl From<DerivedTable> for Selection {
    fn from(d: DerivedTable) -> Self {
        Selection::Derived(d)
    }
}

impl From<Select> for Selection {
    fn from(s: Select) -> Self {
        Selection::Derived(s.derived())
    }
}

/// Any node that can appear inside an expression.
#[derive(Debug, Clone)]
pub enum Element {
    Projection(Projection),
    Expression(Box<Expression>),
    List(List),
}

impl Element {
    pub(crate) fn collect_sources(&self, out: &mut Vec<Selection>) {
        match self {
            Element::Projection(p) => p.collect_sources(out),
            Element::Expression(e) => e.collect_sources(out),
            Element::List(l) => l.collect_sources(out),
        }
    }
}

impl Scannable for Element {
    fn arg_count(&self) -> usize {
        match self {
            Element::Projection(p) => p.arg_count(),
            Element::Expression(e) => e.arg_count(),
            Element::List(l) => l.arg_count(),
        }
    }

    fn size(&self, scanner: &Scanner) -> usize {
        match self {
            Element::Projection(p) => p.size(scanner),
            Element::Expression(e) => e.size(scanner),
            Element::List(l) => l.size(scanner),
        }
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        match self {
            Element::Projection(p) => p.scan(scanner, out, args),
            Element::Expression(e) => e.scan(scanner, out, args),
            Element::List(l) => l.scan(scanner, out, args),
        }
    }
}

impl From<Projection> for Element {
    fn from(p: Projection) -> Self {
        Element::Projection(p)
    }
}

impl From<Expression> for Element {
    fn from(e: Expression) -> Self {
        Element::Expression(Box::new(e))
    }
}

impl From<List> for Element {
    fn from(l: List) -> Self {
        Element::List(l)
    }
}

macro_rules! element_from_projection {
    ($($t:ty),*) => {
        $(impl From<$t> for Element {
            fn from(p: $t) -> Self {
                Element::Projection(Projection::from(p))
            }
        })*
    };
}

element_from_projection!(ColumnIdent, DerivedColumn, Literal, Function, Trim, DerivedTable);

impl From<&ColumnIdent> for Element {
    fn from(c: &ColumnIdent) -> Self {
        Element::Projection(Projection::Column(c.clone()))
    }
}

// Plain values become literals.
macro_rules! element_from_value {
    ($($t:ty),*) => {
        $(impl From<$t> for Element {
            fn from(v: $t) -> Self {
                Element::Projection(Projection::Literal(Literal::new(v)))
            }
        })*
    };
}

element_from_value!(
    Value,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    &str,
    String,
    Vec<u8>,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    serde_json::Value
);
