//! ORDER BY entries.

use super::{ColumnIdent, DerivedColumn, Function, Projection, Scannable, Trim};
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

/// A projection plus sort direction. Never renders the projection's alias.
#[derive(Debug, Clone)]
pub struct SortColumn {
    projection: Projection,
    descending: bool,
}

impl SortColumn {
    pub fn new(projection: impl Into<Projection>, descending: bool) -> Self {
        Self {
            projection: projection.into(),
            descending,
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

impl Scannable for SortColumn {
    fn arg_count(&self) -> usize {
        self.projection.arg_count()
    }

    fn size(&self, scanner: &Scanner) -> usize {
        self.projection.size(scanner) + if self.descending { Symbol::Desc.len() } else { 0 }
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        self.projection.scan(scanner, out, args);
        if self.descending {
            out.push_str(Symbol::Desc.as_str());
        }
    }
}

macro_rules! ascending_from {
    ($($t:ty),*) => {
        $(impl From<$t> for SortColumn {
            fn from(p: $t) -> Self {
                SortColumn::new(p, false)
            }
        })*
    };
}

ascending_from!(Projection, ColumnIdent, DerivedColumn, Function, Trim);

/// Sorting shorthands for anything that converts into a [`Projection`].
pub trait SortExt: Into<Projection> + Sized {
    /// `<projection>`
    fn asc(self) -> SortColumn {
        SortColumn::new(self, false)
    }

    /// `<projection> DESC`
    fn desc(self) -> SortColumn {
        SortColumn::new(self, true)
    }
}

impl SortExt for ColumnIdent {}
impl SortExt for DerivedColumn {}
impl SortExt for Function {}
impl SortExt for Trim {}
