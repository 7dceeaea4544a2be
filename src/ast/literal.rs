//! Literal values.

use super::{Scannable, non_empty};
use crate::scanner::Scanner;
use crate::value::Value;

/// A bound value. Renders as a single parameter marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: Value,
    alias: Option<String>,
}

impl Literal {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            alias: None,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
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
}

impl Scannable for Literal {
    fn arg_count(&self) -> usize {
        1
    }

    fn size(&self, _scanner: &Scanner) -> usize {
        0
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        scanner.interpolate(&self.value, out, args);
    }
}
