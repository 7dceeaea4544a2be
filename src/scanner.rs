//! Rendering driver.
//!
//! A [`Scanner`] carries the active dialect and formatting options and turns any
//! [`Scannable`] tree into `(sql, args)` in two walks: one to size the output
//! exactly, one to emit it.

use crate::ast::Scannable;
use crate::config::ScannerConfig;
use crate::dialect::Dialect;
use crate::value::Value;

/// Dialect plus formatting options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanner {
    dialect: Dialect,
    separator: String,
    prefix: String,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl Scanner {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            separator: " ".to_string(),
            prefix: String::new(),
        }
    }

    pub fn mysql() -> Self {
        Self::new(Dialect::MySql)
    }

    pub fn postgres() -> Self {
        Self::new(Dialect::Postgres)
    }

    /// Set the text written between top-level clauses (default `" "`).
    /// An empty separator falls back to the default.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if separator.is_empty() {
            tracing::debug!("empty clause separator replaced with a space");
            self.separator = " ".to_string();
        } else {
            self.separator = separator;
        }
        self
    }

    /// Set the text written before the statement (default empty).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Width of the markers for `arg_count` arguments under this dialect.
    pub fn interpolation_width(&self, arg_count: usize) -> usize {
        self.dialect.interpolation_width(arg_count)
    }

    /// Render `top` into SQL text plus its ordered argument list.
    pub fn string_args<S: Scannable + ?Sized>(&self, top: &S) -> (String, Vec<Value>) {
        let arg_count = top.arg_count();
        let buf_size =
            top.size(self) + self.interpolation_width(arg_count) + self.prefix.len();

        tracing::trace!(dialect = %self.dialect, buf_size, arg_count, "rendering");

        let mut out = String::with_capacity(buf_size);
        let mut args = Vec::with_capacity(arg_count);
        out.push_str(&self.prefix);
        top.scan(self, &mut out, &mut args);

        debug_assert_eq!(out.len(), buf_size, "size() disagrees with scan()");
        debug_assert_eq!(args.len(), arg_count, "arg_count() disagrees with scan()");
        (out, args)
    }

    /// Emit the next parameter marker and record its value.
    ///
    /// The marker index is the position of the value in `args`, so numbering
    /// follows emission order.
    pub(crate) fn interpolate(&self, value: &Value, out: &mut String, args: &mut Vec<Value>) {
        args.push(value.clone());
        self.dialect.write_marker(out, args.len());
    }
}

impl From<&ScannerConfig> for Scanner {
    fn from(config: &ScannerConfig) -> Self {
        Scanner::new(config.dialect)
            .with_separator(config.separator.clone())
            .with_prefix(config.prefix.clone())
    }
}

impl From<ScannerConfig> for Scanner {
    fn from(config: ScannerConfig) -> Self {
        Scanner::new(config.dialect)
            .with_separator(config.separator)
            .with_prefix(config.prefix)
    }
}

/// Convenience rendering for every scannable node.
pub trait ToSql: Scannable {
    /// Render with the default scanner (MySQL, single-space separator).
    fn to_sql(&self) -> (String, Vec<Value>) {
        Scanner::default().string_args(self)
    }

    /// Render with the default formatting for `dialect`.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> (String, Vec<Value>) {
        Scanner::new(dialect).string_args(self)
    }
}

impl<T: Scannable + ?Sized> ToSql for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_marker_per_dialect() {
        let lit = Literal::new(42);
        assert_eq!(Scanner::mysql().string_args(&lit), ("?".to_string(), vec![Value::Int(42)]));
        assert_eq!(
            Scanner::postgres().string_args(&lit),
            ("$1".to_string(), vec![Value::Int(42)])
        );
    }

    #[test]
    fn test_prefix_is_emitted_first() {
        let scanner = Scanner::mysql().with_prefix("\n");
        let (sql, _) = scanner.string_args(&Literal::new("x"));
        assert_eq!(sql, "\n?");
    }

    #[test]
    fn test_empty_separator_falls_back_to_space() {
        let scanner = Scanner::mysql().with_separator("");
        assert_eq!(scanner.separator(), " ");

        let config = ScannerConfig {
            dialect: Dialect::MySql,
            separator: String::new(),
            prefix: String::new(),
        };
        assert_eq!(Scanner::from(config).separator(), " ");
    }

    #[test]
    fn test_from_config() {
        let config = ScannerConfig {
            dialect: Dialect::Postgres,
            separator: "\n".to_string(),
            prefix: String::new(),
        };
        let scanner = Scanner::from(&config);
        assert_eq!(scanner.dialect(), Dialect::Postgres);
        assert_eq!(scanner.separator(), "\n");
    }
}
