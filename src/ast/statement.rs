//! Any of the four statements.

use super::{Delete, Insert, Scannable, Select, Update};
use crate::scanner::Scanner;
use crate::value::Value;

#[derive(Debug, Clone)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Scannable for Statement {
    fn arg_count(&self) -> usize {
        match self {
            Statement::Select(s) => s.arg_count(),
            Statement::Insert(s) => s.arg_count(),
            Statement::Update(s) => s.arg_count(),
            Statement::Delete(s) => s.arg_count(),
        }
    }

    fn size(&self, scanner: &Scanner) -> usize {
        match self {
            Statement::Select(s) => s.size(scanner),
            Statement::Insert(s) => s.size(scanner),
            Statement::Update(s) => s.size(scanner),
            Statement::Delete(s) => s.size(scanner),
        }
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        match self {
            Statement::Select(s) => s.scan(scanner, out, args),
            Statement::Insert(s) => s.scan(scanner, out, args),
            Statement::Update(s) => s.scan(scanner, out, args),
            Statement::Delete(s) => s.scan(scanner, out, args),
        }
    }
}

impl From<Select> for Statement {
    fn from(s: Select) -> Self {
        Statement::Select(s)
    }
}

impl From<Insert> for Statement {
    fn from(s: Insert) -> Self {
        Statement::Insert(s)
    }
}

impl From<Update> for Statement {
    fn from(s: Update) -> Self {
        Statement::Update(s)
    }
}

impl From<Delete> for Statement {
    fn from(s: Delete) -> Self {
        Statement::Delete(s)
    }
}
