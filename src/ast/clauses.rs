//! FROM / JOIN / WHERE / GROUP BY / HAVING / ORDER BY / LIMIT.
//!
//! Clause keywords carry no leading space. The statement writes the scanner's
//! separator in front of each clause.

use serde::{Deserialize, Serialize};

use super::{
    Expression, Projection, Scannable, Selection, SortColumn, list_arg_count, list_scan, list_size,
};
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    Inner,
    LeftOuter,
    Cross,
}

impl JoinKind {
    fn keyword(self) -> Symbol {
        match self {
            JoinKind::Inner => Symbol::Join,
            JoinKind::LeftOuter => Symbol::LeftJoin,
            JoinKind::Cross => Symbol::CrossJoin,
        }
    }
}

/// A join of `right` onto `left`.
///
/// `left` is never rendered; it records which selection the join hangs off so
/// the statement can check it is reachable.
#[derive(Debug, Clone)]
pub struct Join {
    kind: JoinKind,
    left: Selection,
    right: Selection,
    on: Option<Expression>,
}

impl Join {
    pub fn inner(left: impl Into<Selection>, right: impl Into<Selection>, on: Expression) -> Self {
        Self {
            kind: JoinKind::Inner,
            left: left.into(),
            right: right.into(),
            on: Some(on),
        }
    }

    pub fn left_outer(
        left: impl Into<Selection>,
        right: impl Into<Selection>,
        on: Expression,
    ) -> Self {
        Self {
            kind: JoinKind::LeftOuter,
            ..Self::inner(left, right, on)
        }
    }

    pub fn cross(left: impl Into<Selection>, right: impl Into<Selection>) -> Self {
        Self {
            kind: JoinKind::Cross,
            left: left.into(),
            right: right.into(),
            on: None,
        }
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn left(&self) -> &Selection {
        &self.left
    }

    pub fn right(&self) -> &Selection {
        &self.right
    }

    pub fn on(&self) -> Option<&Expression> {
        self.on.as_ref()
    }
}

impl Scannable for Join {
    fn arg_count(&self) -> usize {
        self.right.arg_count() + self.on.as_ref().map_or(0, Scannable::arg_count)
    }

    fn size(&self, scanner: &Scanner) -> usize {
        self.kind.keyword().len()
            + self.right.size(scanner)
            + self.on.as_ref().map_or(0, |e| Symbol::On.len() + e.size(scanner))
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(self.kind.keyword().as_str());
        self.right.scan(scanner, out, args);
        if let Some(on) = &self.on {
            out.push_str(Symbol::On.as_str());
            on.scan(scanner, out, args);
        }
    }
}

/// The selections of a statement plus the joins hanging off them.
#[derive(Debug, Clone, Default)]
pub struct FromClause {
    selections: Vec<Selection>,
    joins: Vec<Join>,
}

impl FromClause {
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty() && self.joins.is_empty()
    }

    pub fn contains(&self, selection: &Selection) -> bool {
        self.selections.iter().any(|s| s.same_as(selection))
    }

    /// Every selection a column may refer to: the FROM list and both sides of
    /// every join.
    pub fn introduced(&self) -> impl Iterator<Item = &Selection> {
        self.selections
            .iter()
            .chain(self.joins.iter().flat_map(|j| [&j.left, &j.right]))
    }

    pub fn introduces(&self, selection: &Selection) -> bool {
        self.introduced().any(|s| s.same_as(selection))
    }

    pub fn is_joined(&self, selection: &Selection) -> bool {
        self.joins.iter().any(|j| j.right.same_as(selection))
    }

    /// Whether some join hangs off `selection`.
    pub fn is_join_root(&self, selection: &Selection) -> bool {
        self.joins.iter().any(|j| j.left.same_as(selection))
    }

    /// Append unless already present. Returns whether it was added.
    pub(crate) fn add_selection(&mut self, selection: Selection) -> bool {
        if self.contains(&selection) {
            return false;
        }
        self.selections.push(selection);
        true
    }

    /// Drop `selection` from the FROM list. Returns whether it was present.
    pub(crate) fn remove_selection(&mut self, selection: &Selection) -> bool {
        let before = self.selections.len();
        self.selections.retain(|s| !s.same_as(selection));
        self.selections.len() != before
    }

    pub(crate) fn push_join(&mut self, join: Join) {
        self.joins.push(join);
    }
}

impl Scannable for FromClause {
    fn arg_count(&self) -> usize {
        list_arg_count(&self.selections) + list_arg_count(&self.joins)
    }

    fn size(&self, scanner: &Scanner) -> usize {
        Symbol::From.len()
            + list_size(&self.selections, scanner)
            + self
                .joins
                .iter()
                .map(|j| scanner.separator().len() + j.size(scanner))
                .sum::<usize>()
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(Symbol::From.as_str());
        list_scan(&self.selections, scanner, out, args);
        for join in &self.joins {
            out.push_str(scanner.separator());
            join.scan(scanner, out, args);
        }
    }
}

/// WHERE or HAVING: expressions joined with ` AND `.
#[derive(Debug, Clone)]
pub struct FilterClause {
    keyword: Symbol,
    exprs: Vec<Expression>,
}

impl FilterClause {
    pub(crate) fn where_clause() -> Self {
        Self {
            keyword: Symbol::Where,
            exprs: Vec::new(),
        }
    }

    pub(crate) fn having() -> Self {
        Self {
            keyword: Symbol::Having,
            exprs: Vec::new(),
        }
    }

    pub fn exprs(&self) -> &[Expression] {
        &self.exprs
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub(crate) fn push(&mut self, expr: Expression) {
        self.exprs.push(expr);
    }
}

impl Scannable for FilterClause {
    fn arg_count(&self) -> usize {
        list_arg_count(&self.exprs)
    }

    fn size(&self, scanner: &Scanner) -> usize {
        self.keyword.len()
            + self.exprs.iter().map(|e| e.size(scanner)).sum::<usize>()
            + Symbol::And.len() * self.exprs.len().saturating_sub(1)
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(self.keyword.as_str());
        for (i, expr) in self.exprs.iter().enumerate() {
            if i > 0 {
                out.push_str(Symbol::And.as_str());
            }
            expr.scan(scanner, out, args);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupByClause {
    projections: Vec<Projection>,
}

impl GroupByClause {
    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }

    pub(crate) fn extend(&mut self, projections: impl IntoIterator<Item = Projection>) {
        self.projections.extend(projections);
    }
}

impl Scannable for GroupByClause {
    fn arg_count(&self) -> usize {
        list_arg_count(&self.projections)
    }

    fn size(&self, scanner: &Scanner) -> usize {
        Symbol::GroupBy.len() + list_size(&self.projections, scanner)
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(Symbol::GroupBy.as_str());
        list_scan(&self.projections, scanner, out, args);
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderByClause {
    columns: Vec<SortColumn>,
}

impl OrderByClause {
    pub fn columns(&self) -> &[SortColumn] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub(crate) fn extend(&mut self, columns: impl IntoIterator<Item = SortColumn>) {
        self.columns.extend(columns);
    }
}

impl Scannable for OrderByClause {
    fn arg_count(&self) -> usize {
        list_arg_count(&self.columns)
    }

    fn size(&self, scanner: &Scanner) -> usize {
        Symbol::OrderBy.len() + list_size(&self.columns, scanner)
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(Symbol::OrderBy.as_str());
        list_scan(&self.columns, scanner, out, args);
    }
}

/// `LIMIT ?[ OFFSET ?]`; both numbers are bound as arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitClause {
    limit: u64,
    offset: Option<u64>,
}

impl LimitClause {
    pub fn new(limit: u64, offset: Option<u64>) -> Self {
        Self { limit, offset }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }
}

impl Scannable for LimitClause {
    fn arg_count(&self) -> usize {
        1 + usize::from(self.offset.is_some())
    }

    fn size(&self, _scanner: &Scanner) -> usize {
        Symbol::Limit.len() + self.offset.map_or(0, |_| Symbol::Offset.len())
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(Symbol::Limit.as_str());
        scanner.interpolate(&Value::UInt(self.limit), out, args);
        if let Some(offset) = self.offset {
            out.push_str(Symbol::Offset.as_str());
            scanner.interpolate(&Value::UInt(offset), out, args);
        }
    }
}
