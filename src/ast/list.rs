//! Comma-separated element lists.

use super::{Element, Scannable, Selection, list_arg_count, list_scan, list_size};
use crate::scanner::Scanner;
use crate::value::Value;

/// An ordered sequence of elements rendered as `a, b, c`.
#[derive(Debug, Clone, Default)]
pub struct List {
    items: Vec<Element>,
}

impl List {
    pub fn new<I, E>(items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, item: impl Into<Element>) {
        self.items.push(item.into());
    }

    pub fn items(&self) -> &[Element] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn collect_sources(&self, out: &mut Vec<Selection>) {
        for item in &self.items {
            item.collect_sources(out);
        }
    }
}

impl Scannable for List {
    fn arg_count(&self) -> usize {
        list_arg_count(&self.items)
    }

    fn size(&self, scanner: &Scanner) -> usize {
        list_size(&self.items, scanner)
    }

    fn scan(&self, scanner: &Scanner, out: &mut String, args: &mut Vec<Value>) {
        list_scan(&self.items, scanner, out, args);
    }
}
