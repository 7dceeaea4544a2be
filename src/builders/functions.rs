//! Function builders.

use crate::ast::{
    DataType, Element, Function, FunctionKind, IntervalUnit, List, Literal, Projection, Selection,
    SortColumn, Trim, TrimLocation,
};
use crate::value::Value;

pub fn max(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::Max, arg)
}

pub fn min(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::Min, arg)
}

pub fn sum(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::Sum, arg)
}

pub fn avg(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::Avg, arg)
}

/// `COUNT(arg)`
pub fn count(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::Count, arg)
}

/// `COUNT(*)` over the rows of `selection`.
pub fn count_all(selection: impl Into<Selection>) -> Function {
    Function::count_all(selection.into())
}

/// `COUNT(DISTINCT arg)`
pub fn count_distinct(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::CountDistinct, arg)
}

/// `CAST(arg AS to)`
pub fn cast(arg: impl Into<Projection>, to: DataType) -> Function {
    Function::cast(arg, to)
}

pub fn char_length(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::CharLength, arg)
}

pub fn bit_length(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::BitLength, arg)
}

pub fn ascii(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::Ascii, arg)
}

pub fn reverse(arg: impl Into<Projection>) -> Function {
    Function::unary(FunctionKind::Reverse, arg)
}

pub fn concat<E: Into<Element>>(items: impl IntoIterator<Item = E>) -> Function {
    Function::concat(List::new(items))
}

/// `CONCAT_WS(separator, items...)`; the separator is bound.
pub fn concat_ws<E: Into<Element>>(
    separator: impl Into<Value>,
    items: impl IntoIterator<Item = E>,
) -> Function {
    Function::concat_ws(separator, List::new(items))
}

pub fn now() -> Function {
    Function::nullary(FunctionKind::Now)
}

pub fn current_timestamp() -> Function {
    Function::nullary(FunctionKind::CurrentTimestamp)
}

pub fn current_time() -> Function {
    Function::nullary(FunctionKind::CurrentTime)
}

pub fn current_date() -> Function {
    Function::nullary(FunctionKind::CurrentDate)
}

/// `EXTRACT(unit FROM arg)`
pub fn extract(unit: IntervalUnit, arg: impl Into<Projection>) -> Function {
    Function::extract(unit, arg)
}

pub fn trim(subject: impl Into<Projection>) -> Trim {
    Trim::new(subject, TrimLocation::Both)
}

pub fn ltrim(subject: impl Into<Projection>) -> Trim {
    Trim::new(subject, TrimLocation::Leading)
}

pub fn rtrim(subject: impl Into<Projection>) -> Trim {
    Trim::new(subject, TrimLocation::Trailing)
}

/// Strip any of `chars` from both ends.
pub fn trim_chars(subject: impl Into<Projection>, chars: impl Into<String>) -> Trim {
    Trim::with_chars(subject, chars, TrimLocation::Both)
}

pub fn ltrim_chars(subject: impl Into<Projection>, chars: impl Into<String>) -> Trim {
    Trim::with_chars(subject, chars, TrimLocation::Leading)
}

pub fn rtrim_chars(subject: impl Into<Projection>, chars: impl Into<String>) -> Trim {
    Trim::with_chars(subject, chars, TrimLocation::Trailing)
}

/// A bound value usable as a projection.
pub fn literal(value: impl Into<Value>) -> Literal {
    Literal::new(value)
}

pub fn asc(projection: impl Into<Projection>) -> SortColumn {
    SortColumn::new(projection, false)
}

pub fn desc(projection: impl Into<Projection>) -> SortColumn {
    SortColumn::new(projection, true)
}
