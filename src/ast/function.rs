//! Aggregate and scalar functions.

use serde::{Deserialize, Serialize};

use super::expression::{element_slots, template_scan, template_size};
use super::{Element, List, Literal, Projection, Scannable, Selection, Slot, non_empty};
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

use Slot::{Elem, Placeholder, Sym};

const MAX: &[Slot] = &[Sym(Symbol::Max), Elem, Sym(Symbol::RightParen)];
const MIN: &[Slot] = &[Sym(Symbol::Min), Elem, Sym(Symbol::RightParen)];
const SUM: &[Slot] = &[Sym(Symbol::Sum), Elem, Sym(Symbol::RightParen)];
const AVG: &[Slot] = &[Sym(Symbol::Avg), Elem, Sym(Symbol::RightParen)];
const COUNT: &[Slot] = &[Sym(Symbol::Count), Elem, Sym(Symbol::RightParen)];
const COUNT_ALL: &[Slot] = &[Sym(Symbol::CountAll)];
const COUNT_DISTINCT: &[Slot] = &[Sym(Symbol::CountDistinct), Elem, Sym(Symbol::RightParen)];
const CAST: &[Slot] = &[
    Sym(Symbol::Cast),
    Elem,
    Sym(Symbol::As),
    Placeholder,
    Sym(Symbol::RightParen),
];
const CHAR_LENGTH: &[Slot] = &[Sym(Symbol::CharLength), Elem, Sym(Symbol::RightParen)];
const BIT_LENGTH: &[Slot] = &[Sym(Symbol::BitLength), Elem, Sym(Symbol::RightParen)];
const ASCII: &[Slot] = &[Sym(Symbol::Ascii), Elem, Sym(Symbol::RightParen)];
const REVERSE: &[Slot] = &[Sym(Symbol::Reverse), Elem, Sym(Symbol::RightParen)];
const CONCAT: &[Slot] = &[Sym(Symbol::Concat), Elem, Sym(Symbol::RightParen)];
const CONCAT_WS: &[Slot] = &[
    Sym(Symbol::ConcatWs),
    Elem,
    Sym(Symbol::Comma),
    Elem,
    Sym(Symbol::RightParen),
];
const NOW: &[Slot] = &[Sym(Symbol::Now)];
const CURRENT_TIMESTAMP: &[Slot] = &[Sym(Symbol::CurrentTimestamp)];
const CURRENT_TIME: &[Slot] = &[Sym(Symbol::CurrentTime)];
const CURRENT_DATE: &[Slot] = &[Sym(Symbol::CurrentDate)];
const EXTRACT: &[Slot] = &[
    Sym(Symbol::Extract),
    Placeholder,
    Sym(Symbol::FromKeyword),
    Elem,
    Sym(Symbol::RightParen),
];

/// Function identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Max,
    Min,
    Sum,
    Avg,
    Count,
    CountAll,
    CountDistinct,
    Cast,
    CharLength,
    BitLength,
    Ascii,
    Reverse,
    Concat,
    ConcatWs,
    Now,
    CurrentTimestamp,
    CurrentTime,
    CurrentDate,
    Extract,
}

impl FunctionKind {
    pub(crate) fn template(self) -> &'static [Slot] {
        match self {
            FunctionKind::Max => MAX,
            FunctionKind::Min => MIN,
            FunctionKind::Sum => SUM,
            FunctionKind::Avg => AVG,
            FunctionKind::Count => COUNT,
            FunctionKind::CountAll => COUNT_ALL,
            FunctionKind::CountDistinct => COUNT_DISTINCT,
            FunctionKind::Cast => CAST,
            FunctionKind::CharLength => CHAR_LENGTH,
            FunctionKind::BitLength => BIT_LENGTH,
            FunctionKind::Ascii => ASCII,
            FunctionKind::Reverse => REVERSE,
            FunctionKind::Concat => CONCAT,
            FunctionKind::ConcatWs => CONCAT_WS,
            FunctionKind::Now => NOW,
            FunctionKind::CurrentTimestamp => CURRENT_TIMESTAMP,
            FunctionKind::CurrentTime => CURRENT_TIME,
            FunctionKind::CurrentDate => CURRENT_DATE,
            FunctionKind::Extract => EXTRACT,
        }
    }

    pub fn arity(self) -> usize {
        element_slots(self.template())
    }
}

/// CAST target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Binary,
    Char,
    Date,
    DateTime,
    Decimal,
    Integer,
    Json,
    Signed,
    Text,
    Time,
    Timestamp,
    Unsigned,
}

impl DataType {
    pub fn symbol(self) -> Symbol {
        match self {
            DataType::Binary => Symbol::TypeBinary,
            DataType::Char => Symbol::TypeChar,
            DataType::Date => Symbol::TypeDate,
            DataType::DateTime => Symbol::TypeDateTime,
            DataType::Decimal => Symbol::TypeDecimal,
            DataType::Integer => Symbol::TypeInteger,
            DataType::Json => Symbol::TypeJson,
            DataType::Signed => Symbol::TypeSigned,
            DataType::Text => Symbol::TypeText,
            DataType::Time => Symbol::TypeTime,
            DataType::Timestamp => Symbol::TypeTimestamp,
            DataType::Unsigned => Symbol::TypeUnsigned,
        }
    }
}

/// EXTRACT units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Microsecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl IntervalUnit {
    pub fn symbol(self) -> Symbol {
        match self {
            IntervalUnit::Microsecond => Symbol::UnitMicrosecond,
            IntervalUnit::Second => Symbol::UnitSecond,
            IntervalUnit::Minute => Symbol::UnitMinute,
            IntervalUnit::Hour => Symbol::UnitHour,
            IntervalUnit::Day => Symbol::UnitDay,
            IntervalUnit::Week => Symbol::UnitWeek,
            IntervalUnit::Month => Symbol::UnitMonth,
            IntervalUnit::Quarter => Symbol::UnitQuarter,
            IntervalUnit::Year => Symbol::UnitYear,
        }
    }
}

/// A function call with an optional alias.
///
/// Arguments render with their aliases suppressed.
#[derive(Debug, Clone)]
pub struct Function {
    kind: FunctionKind,
    placeholder: Option<Symbol>,
    children: Vec<Element>,
    alias: Option<String>,
    /// The selection counted by COUNT(*)
    selection: Option<Selection>,
}

impl Function {
    fn build(kind: FunctionKind, children: Vec<Element>) -> Self {
        debug_assert_eq!(children.len(), kind.arity(), "{:?} arity", kind);
        Self {
            kind,
            placeholder: None,
            children,
            alias: None,
            selection: None,
        }
    }

    /// A function applied to a single projection.
    pub(crate) fn unary(kind: FunctionKind, arg: impl Into<Projection>) -> Self {
        Self::build(kind, vec![Element::Projection(arg.into())])
    }

    /// A function with no arguments.
    pub(crate) fn nullary(kind: FunctionKind) -> Self {
        Self::build(kind, Vec::new())
    }

    /// `COUNT(*)` over `selection`. The selection only takes part in FROM
    /// resolution; it is not rendered.
    pub(crate) fn count_all(selection: Selection) -> Self {
        Self {
            selection: Some(selection),
            ..Self::build(FunctionKind::CountAll, Vec::new())
        }
    }

    pub(crate) fn cast(arg: impl Into<Projection>, to: DataType) -> Self {
        Self {
            placeholder: Some(to.symbol()),
            ..Self::unary(FunctionKind::Cast, arg)
        }
    }

    pub(crate) fn extract(unit: IntervalUnit, arg: impl Into<Projection>) -> Self {
        Self {
            placeholder: Some(unit.symbol()),
            ..Self::unary(FunctionKind::Extract, arg)
        }
    }

    pub(crate) fn concat(items: List) -> Self {
        Self::build(FunctionKind::Concat, vec![Element::List(items)])
    }

    /// `CONCAT_WS(<separator>, <items>)`. The separator is bound like any
    /// literal, so it gets the dialect's marker.
    pub(crate) fn concat_ws(separator: impl Into<Value>, items: List) -> Self {
        Self::build(
            FunctionKind::ConcatWs,
            vec![Literal::new(separator).into(), Element::List(items)],
        )
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
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

    pub(crate) fn collect_sources(&self, out: &mut Vec<Selection>) {
        if let Some(selection) = &self.selection {
            out.push(selection.clone());
        }
        for child in &self.children {
            child.collect_sources(out);
        }
    }
}

impl Scannable for Function {
    fn arg_count(&self) -> usize {
        self.children.iter().map(Scannable::arg_count).sum()
    }

    fn size(&self, scanner: &Scanner) -> usize {
        template_size(self.kind.template(), self.placeholder, &self.children, scanner)
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        template_scan(
            self.kind.template(),
            self.placeholder,
            &self.children,
            scanner,
            out,
            args,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;

    fn users() -> crate::ast::TableIdent {
        let mut schema = Schema::new();
        schema.add_table("users").unwrap();
        schema.add_column("users", "id").unwrap();
        schema.add_column("users", "name").unwrap();
        schema.add_column("users", "created_at").unwrap();
        schema.table("users").unwrap()
    }

    fn render(f: &Function, scanner: &Scanner) -> (String, Vec<Value>) {
        let (sql, args) = scanner.string_args(f);
        assert_eq!(
            sql.len(),
            f.size(scanner) + scanner.interpolation_width(f.arg_count())
        );
        (sql, args)
    }

    #[test]
    fn test_aggregate_suppresses_argument_alias() {
        let id = users().column("id").unwrap().with_alias("uid");
        let f = Function::unary(FunctionKind::Max, id).with_alias("top");
        assert_eq!(render(&f, &Scanner::mysql()).0, "MAX(users.id)");
    }

    #[test]
    fn test_cast_fills_type_slot() {
        let id = users().column("id").unwrap();
        let f = Function::cast(id, DataType::Char);
        assert_eq!(render(&f, &Scanner::mysql()).0, "CAST(users.id AS CHAR)");
    }

    #[test]
    fn test_extract_fills_unit_slot() {
        let created = users().column("created_at").unwrap();
        let f = Function::extract(IntervalUnit::Year, created);
        assert_eq!(
            render(&f, &Scanner::mysql()).0,
            "EXTRACT(YEAR FROM users.created_at)"
        );
    }

    #[test]
    fn test_count_all_keeps_selection_for_resolution() {
        let users = users();
        let f = Function::count_all(Selection::Table(users.clone()));
        assert_eq!(render(&f, &Scanner::mysql()).0, "COUNT(*)");
        assert!(Projection::from(f).source().unwrap().same_as(&users.into()));
    }

    #[test]
    fn test_concat_ws_uses_dialect_marker() {
        let users = users();
        let items = List::new([users.column("id").unwrap(), users.column("name").unwrap()]);
        let f = Function::concat_ws("-", items);
        let (sql, args) = render(&f, &Scanner::postgres());
        assert_eq!(sql, "CONCAT_WS($1, users.id, users.name)");
        assert_eq!(args, vec![Value::Text("-".to_string())]);
    }

    #[test]
    fn test_niladic_functions() {
        assert_eq!(
            render(&Function::nullary(FunctionKind::Now), &Scanner::mysql()).0,
            "NOW()"
        );
        assert_eq!(
            render(&Function::nullary(FunctionKind::CurrentDate), &Scanner::mysql()).0,
            "CURRENT_DATE"
        );
    }
}
