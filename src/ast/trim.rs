//! TRIM / LTRIM / RTRIM / BTRIM.
//!
//! The rendered shape depends on the dialect, the trim location and whether a
//! set of characters to strip was given:
//!
//! | location | no chars, MySQL | no chars, PostgreSQL          | chars, MySQL                  | chars, PostgreSQL              |
//! | -------- | --------------- | ----------------------------- | ----------------------------- | ------------------------------ |
//! | both     | `TRIM(s)`       | `BTRIM(s)`                    | `TRIM(? FROM s)`              | `BTRIM(s, $N)`                 |
//! | leading  | `LTRIM(s)`      | `TRIM(LEADING FROM s)`        | `TRIM(LEADING ? FROM s)`      | `TRIM(LEADING $N FROM s)`      |
//! | trailing | `RTRIM(s)`      | `TRIM(TRAILING FROM s)`       | `TRIM(TRAILING ? FROM s)`     | `TRIM(TRAILING $N FROM s)`     |

use serde::{Deserialize, Serialize};

use super::{Projection, Scannable, non_empty};
use crate::dialect::Dialect;
use crate::scanner::Scanner;
use crate::symbols::Symbol;
use crate::value::Value;

/// Which end of the subject to trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimLocation {
    #[default]
    Both,
    Leading,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Sym(Symbol),
    Subject,
    Chars,
}

use Part::{Chars, Subject};

const MYSQL_BOTH: &[Part] = &[Part::Sym(Symbol::Trim), Subject, Part::Sym(Symbol::RightParen)];
const MYSQL_LEADING: &[Part] = &[Part::Sym(Symbol::LTrim), Subject, Part::Sym(Symbol::RightParen)];
const MYSQL_TRAILING: &[Part] = &[Part::Sym(Symbol::RTrim), Subject, Part::Sym(Symbol::RightParen)];
const MYSQL_BOTH_CHARS: &[Part] = &[
    Part::Sym(Symbol::Trim),
    Chars,
    Part::Sym(Symbol::FromKeyword),
    Subject,
    Part::Sym(Symbol::RightParen),
];
const LEADING_CHARS: &[Part] = &[
    Part::Sym(Symbol::Trim),
    Part::Sym(Symbol::Leading),
    Part::Sym(Symbol::Space),
    Chars,
    Part::Sym(Symbol::FromKeyword),
    Subject,
    Part::Sym(Symbol::RightParen),
];
const TRAILING_CHARS: &[Part] = &[
    Part::Sym(Symbol::Trim),
    Part::Sym(Symbol::Trailing),
    Part::Sym(Symbol::Space),
    Chars,
    Part::Sym(Symbol::FromKeyword),
    Subject,
    Part::Sym(Symbol::RightParen),
];
const POSTGRES_BOTH: &[Part] = &[Part::Sym(Symbol::BTrim), Subject, Part::Sym(Symbol::RightParen)];
const POSTGRES_LEADING: &[Part] = &[
    Part::Sym(Symbol::Trim),
    Part::Sym(Symbol::Leading),
    Part::Sym(Symbol::FromKeyword),
    Subject,
    Part::Sym(Symbol::RightParen),
];
const POSTGRES_TRAILING: &[Part] = &[
    Part::Sym(Symbol::Trim),
    Part::Sym(Symbol::Trailing),
    Part::Sym(Symbol::FromKeyword),
    Subject,
    Part::Sym(Symbol::RightParen),
];
const POSTGRES_BOTH_CHARS: &[Part] = &[
    Part::Sym(Symbol::BTrim),
    Subject,
    Part::Sym(Symbol::Comma),
    Chars,
    Part::Sym(Symbol::RightParen),
];

/// A trim call on a projection.
#[derive(Debug, Clone)]
pub struct Trim {
    subject: Projection,
    chars: Option<String>,
    location: TrimLocation,
    alias: Option<String>,
}

impl Trim {
    /// Trim whitespace at `location`.
    pub fn new(subject: impl Into<Projection>, location: TrimLocation) -> Self {
        Self {
            subject: subject.into(),
            chars: None,
            location,
            alias: None,
        }
    }

    /// Trim the characters in `chars` at `location`. An empty `chars` is the
    /// same as [`Trim::new`].
    pub fn with_chars(
        subject: impl Into<Projection>,
        chars: impl Into<String>,
        location: TrimLocation,
    ) -> Self {
        Self {
            chars: non_empty(chars),
            ..Self::new(subject, location)
        }
    }

    pub fn subject(&self) -> &Projection {
        &self.subject
    }

    pub fn chars(&self) -> Option<&str> {
        self.chars.as_deref()
    }

    pub fn location(&self) -> TrimLocation {
        self.location
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

    fn parts(&self, dialect: Dialect) -> &'static [Part] {
        match (dialect, self.location, self.chars.is_some()) {
            (Dialect::MySql, TrimLocation::Both, false) => MYSQL_BOTH,
            (Dialect::MySql, TrimLocation::Leading, false) => MYSQL_LEADING,
            (Dialect::MySql, TrimLocation::Trailing, false) => MYSQL_TRAILING,
            (Dialect::MySql, TrimLocation::Both, true) => MYSQL_BOTH_CHARS,
            (Dialect::Postgres, TrimLocation::Both, false) => POSTGRES_BOTH,
            (Dialect::Postgres, TrimLocation::Leading, false) => POSTGRES_LEADING,
            (Dialect::Postgres, TrimLocation::Trailing, false) => POSTGRES_TRAILING,
            (Dialect::Postgres, TrimLocation::Both, true) => POSTGRES_BOTH_CHARS,
            (_, TrimLocation::Leading, true) => LEADING_CHARS,
            (_, TrimLocation::Trailing, true) => TRAILING_CHARS,
        }
    }
}

impl Scannable for Trim {
    fn arg_count(&self) -> usize {
        self.subject.arg_count() + usize::from(self.chars.is_some())
    }

    fn size(&self, scanner: &Scanner) -> usize {
        self.parts(scanner.dialect())
            .iter()
            .map(|part| match part {
                Part::Sym(s) => s.len(),
                Subject => self.subject.size(scanner),
                Chars => 0,
            })
            .sum()
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        for part in self.parts(scanner.dialect()) {
            match part {
                Part::Sym(s) => out.push_str(s.as_str()),
                Subject => self.subject.scan(scanner, out, args),
                Chars => {
                    if let Some(chars) = &self.chars {
                        scanner.interpolate(&Value::Text(chars.clone()), out, args);
                    }
                }
            }
        }
    }
}
