//! SELECT statements and their assembly.

use tracing::debug;

use super::{
    DerivedTable, ExprKind, Expression, FilterClause, FromClause, GroupByClause, Join, JoinKind,
    LimitClause, OrderByClause, Projection, Scannable, Selection, SortColumn, TableIdent,
};
use crate::error::{QueryError, QueryResult};
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

/// A SELECT statement.
///
/// Assembly methods take and return the statement by value so calls chain:
///
/// ```ignore
/// let query = Select::new(users.columns())
///     .filter(eq(users.column("id")?, 1))
///     .limit(10);
/// ```
#[derive(Debug, Clone)]
pub struct Select {
    projections: Vec<Projection>,
    from: FromClause,
    filter: FilterClause,
    group_by: GroupByClause,
    having: FilterClause,
    order_by: OrderByClause,
    limit: Option<LimitClause>,
    /// Anonymous derived tables named so far.
    derived_count: usize,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            projections: Vec::new(),
            from: FromClause::default(),
            filter: FilterClause::where_clause(),
            group_by: GroupByClause::default(),
            having: FilterClause::having(),
            order_by: OrderByClause::default(),
            limit: None,
            derived_count: 0,
        }
    }
}

impl Select {
    /// A SELECT of `projections`, reading from every selection they refer to.
    pub fn new<P: Into<Projection>>(projections: impl IntoIterator<Item = P>) -> Self {
        let projections: Vec<Projection> = projections.into_iter().map(Into::into).collect();
        let mut select = Self::default();
        let mut sources = Vec::new();
        for projection in &projections {
            projection.collect_sources(&mut sources);
        }
        select.reserve_derived_names(&sources);
        for projection in projections {
            select.add_projection(projection);
        }
        select
    }

    /// Assemble a statement from already-classified parts: projections and
    /// their sources first, then explicit selections, then joins. A join's
    /// left side is added to FROM when nothing has introduced it yet; its
    /// right side is taken out of FROM. A join whose right side is already
    /// joined, already hangs another join, or equals its left side is a
    /// duplicate and is skipped.
    pub(crate) fn assemble(
        projections: Vec<Projection>,
        selections: Vec<Selection>,
        joins: Vec<Join>,
    ) -> Self {
        let mut select = Self::default();
        let mut seen = Vec::new();
        for projection in &projections {
            projection.collect_sources(&mut seen);
        }
        seen.extend(selections.iter().cloned());
        for join in &joins {
            seen.push(join.left().clone());
            seen.push(join.right().clone());
        }
        select.reserve_derived_names(&seen);

        for projection in projections {
            select.add_projection(projection);
        }
        for selection in selections {
            select.add_selection(selection);
        }
        for join in joins {
            select.name_anonymous(join.left());
            select.name_anonymous(join.right());
            if select.from.is_joined(join.right())
                || select.from.is_join_root(join.right())
                || join.left().same_as(join.right())
            {
                debug!(right = join.right().qualifier(), "duplicate join ignored");
                continue;
            }
            if !select.from.introduces(join.left()) {
                select.from.add_selection(join.left().clone());
            }
            if select.from.remove_selection(join.right()) {
                debug!(right = join.right().qualifier(), "join right side removed from FROM");
            }
            select.from.push_join(join);
        }
        select
    }

    /// Append a projection and its sources.
    pub(crate) fn add_projection(&mut self, projection: Projection) {
        let mut sources = Vec::new();
        projection.collect_sources(&mut sources);
        for source in sources {
            self.add_selection(source);
        }
        self.projections.push(projection);
    }

    /// Add `selection` to FROM unless it is already there or already joined.
    pub(crate) fn add_selection(&mut self, selection: Selection) {
        self.name_anonymous(&selection);
        if self.from.is_joined(&selection) {
            debug!(selection = selection.qualifier(), "selection already joined");
            return;
        }
        if !self.from.add_selection(selection) {
            debug!("duplicate selection ignored");
        }
    }

    /// Give an anonymous derived table the next `derivedK` name not already
    /// used by a selection of this statement.
    pub(crate) fn name_anonymous(&mut self, selection: &Selection) {
        let Selection::Derived(d) = selection else {
            return;
        };
        if d.alias().is_some() {
            return;
        }
        let alias = loop {
            let candidate = format!("derived{}", self.derived_count);
            self.derived_count += 1;
            if !self.from.introduced().any(|s| s.qualifier() == candidate) {
                break candidate;
            }
        };
        if d.assign_alias(alias) {
            debug!(alias = d.qualifier(), "named anonymous derived table");
        }
    }

    /// Move the `derivedK` counter past names that derived tables already
    /// carry, e.g. from an earlier statement they were assembled into.
    fn reserve_derived_names(&mut self, selections: &[Selection]) {
        for selection in selections {
            let Selection::Derived(d) = selection else {
                continue;
            };
            let taken = d
                .alias()
                .and_then(|a| a.strip_prefix("derived"))
                .and_then(|k| k.parse::<usize>().ok());
            if let Some(k) = taken {
                self.derived_count = self.derived_count.max(k + 1);
            }
        }
    }

    /// Append a WHERE expression. Repeated calls are ANDed.
    pub fn filter(mut self, expr: Expression) -> Self {
        self.filter.push(expr);
        self
    }

    /// Append a HAVING expression. Repeated calls are ANDed.
    pub fn having(mut self, expr: Expression) -> Self {
        self.having.push(expr);
        self
    }

    pub fn group_by<P: Into<Projection>>(mut self, projections: impl IntoIterator<Item = P>) -> Self {
        self.group_by.extend(projections.into_iter().map(Into::into));
        self
    }

    pub fn order_by<S: Into<SortColumn>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.order_by.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(LimitClause::new(limit, None));
        self
    }

    pub fn limit_with_offset(mut self, limit: u64, offset: u64) -> Self {
        self.limit = Some(LimitClause::new(limit, Some(offset)));
        self
    }

    /// `JOIN right ON on`.
    ///
    /// The left side is the first selection referenced by `on`, other than
    /// `right`, and every such selection must already be in FROM or joined.
    pub fn join(self, right: impl Into<Selection>, on: Expression) -> QueryResult<Self> {
        self.add_join(JoinKind::Inner, right.into(), Some(on))
    }

    /// `LEFT JOIN right ON on`, with the same checks as [`Select::join`].
    pub fn outer_join(self, right: impl Into<Selection>, on: Expression) -> QueryResult<Self> {
        self.add_join(JoinKind::LeftOuter, right.into(), Some(on))
    }

    /// `CROSS JOIN right`, hanging off the first FROM selection.
    pub fn cross_join(self, right: impl Into<Selection>) -> QueryResult<Self> {
        self.add_join(JoinKind::Cross, right.into(), None)
    }

    /// Inner join on a foreign reference between `right` and a table already
    /// in this statement, in either direction.
    pub fn join_on_reference(self, right: &TableIdent) -> QueryResult<Self> {
        let on = self.reference_condition(right)?;
        self.join(right, on)
    }

    fn reference_condition(&self, right: &TableIdent) -> QueryResult<Expression> {
        let tables: Vec<&TableIdent> =
            self.from.introduced().filter_map(Selection::as_table).collect();

        for column in right.columns() {
            let Some(reference) = column.references() else {
                continue;
            };
            if let Some(table) = tables
                .iter()
                .find(|t| t.name() == reference.table && !t.same_as(right))
            {
                let target = table.column(&reference.column)?;
                return Ok(Expression::new(
                    ExprKind::Equal,
                    vec![target.into(), column.into()],
                ));
            }
        }

        for table in tables.iter().filter(|t| !t.same_as(right)) {
            for column in table.columns() {
                let Some(reference) = column.references() else {
                    continue;
                };
                if reference.table == right.name() {
                    let target = right.column(&reference.column)?;
                    return Ok(Expression::new(
                        ExprKind::Equal,
                        vec![column.into(), target.into()],
                    ));
                }
            }
        }

        Err(QueryError::invalid_join(format!(
            "no foreign reference between {} and the selected tables",
            right.qualifier()
        )))
    }

    fn add_join(
        mut self,
        kind: JoinKind,
        right: Selection,
        on: Option<Expression>,
    ) -> QueryResult<Self> {
        if self.from.is_empty() {
            return Err(QueryError::invalid_join(format!(
                "cannot join {} onto a statement with no selections",
                right.qualifier()
            )));
        }
        self.reserve_derived_names(std::slice::from_ref(&right));
        self.name_anonymous(&right);
        if self.from.is_joined(&right) || self.from.is_join_root(&right) {
            debug!(right = right.qualifier(), "duplicate join ignored");
            return Ok(self);
        }
        if let Some(clash) = self
            .from
            .introduced()
            .find(|s| s.qualifier() == right.qualifier() && !s.same_as(&right))
        {
            return Err(QueryError::invalid_join(format!(
                "{} is already used by another selection",
                clash.qualifier()
            )));
        }

        let left = match &on {
            Some(expr) => self.join_left(&right, expr)?,
            None => self
                .from
                .introduced()
                .next()
                .cloned()
                .ok_or_else(|| QueryError::invalid_join("no selection to cross join onto"))?,
        };

        if left.same_as(&right) {
            return Err(QueryError::invalid_join(format!(
                "cannot join {} onto itself",
                right.qualifier()
            )));
        }
        if self.from.remove_selection(&right) {
            debug!(right = right.qualifier(), "join right side removed from FROM");
        }
        let join = match (kind, on) {
            (JoinKind::Inner, Some(on)) => Join::inner(left, right, on),
            (JoinKind::LeftOuter, Some(on)) => Join::left_outer(left, right, on),
            _ => Join::cross(left, right),
        };
        self.from.push_join(join);
        Ok(self)
    }

    fn join_left(&self, right: &Selection, on: &Expression) -> QueryResult<Selection> {
        let sources: Vec<Selection> = on
            .sources()
            .into_iter()
            .filter(|s| !s.same_as(right))
            .collect();

        if let Some(unknown) = sources.iter().find(|s| !self.from.introduces(s)) {
            return Err(QueryError::invalid_join(format!(
                "{} is not part of this statement",
                unknown.qualifier()
            )));
        }
        sources.into_iter().next().ok_or_else(|| {
            QueryError::invalid_join(format!(
                "ON clause for {} references no other selection",
                right.qualifier()
            ))
        })
    }

    /// Wrap this statement as a derived table named `alias`.
    pub fn with_alias(self, alias: impl Into<String>) -> DerivedTable {
        DerivedTable::new(self, Some(alias.into()))
    }

    /// Wrap this statement as a derived table to be named by the enclosing
    /// statement.
    pub fn derived(self) -> DerivedTable {
        DerivedTable::new(self, None)
    }

    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    pub fn from_clause(&self) -> &FromClause {
        &self.from
    }

    pub fn where_clause(&self) -> &FilterClause {
        &self.filter
    }

    pub fn group_by_clause(&self) -> &GroupByClause {
        &self.group_by
    }

    pub fn having_clause(&self) -> &FilterClause {
        &self.having
    }

    pub fn order_by_clause(&self) -> &OrderByClause {
        &self.order_by
    }

    pub fn limit_clause(&self) -> Option<&LimitClause> {
        self.limit.as_ref()
    }

    /// The clauses that render, in output order.
    fn clauses(&self) -> Vec<&dyn Scannable> {
        let mut clauses: Vec<&dyn Scannable> = Vec::with_capacity(6);
        if !self.from.is_empty() {
            clauses.push(&self.from);
        }
        if !self.filter.is_empty() {
            clauses.push(&self.filter);
        }
        if !self.group_by.is_empty() {
            clauses.push(&self.group_by);
        }
        if !self.having.is_empty() {
            clauses.push(&self.having);
        }
        if !self.order_by.is_empty() {
            clauses.push(&self.order_by);
        }
        if let Some(limit) = &self.limit {
            clauses.push(limit);
        }
        clauses
    }
}

impl Scannable for Select {
    fn arg_count(&self) -> usize {
        self.projections.iter().map(Scannable::arg_count).sum::<usize>()
            + self.clauses().iter().map(|c| c.arg_count()).sum::<usize>()
    }

    fn size(&self, scanner: &Scanner) -> usize {
        let projections = if self.projections.is_empty() {
            Symbol::Star.len()
        } else {
            self.projections
                .iter()
                .map(|p| p.size_with_alias(scanner))
                .sum::<usize>()
                + Symbol::Comma.len() * (self.projections.len() - 1)
        };
        Symbol::Select.len()
            + projections
            + self
                .clauses()
                .iter()
                .map(|c| scanner.separator().len() + c.size(scanner))
                .sum::<usize>()
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        out.push_str(Symbol::Select.as_str());
        if self.projections.is_empty() {
            out.push_str(Symbol::Star.as_str());
        }
        for (i, projection) in self.projections.iter().enumerate() {
            if i > 0 {
                out.push_str(Symbol::Comma.as_str());
            }
            projection.scan_with_alias(scanner, out, args);
        }
        for clause in self.clauses() {
            out.push_str(scanner.separator());
            clause.scan(scanner, out, args);
        }
    }
}
