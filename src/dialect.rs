//! SQL dialects and their parameter-marker rule.

use serde::{Deserialize, Serialize};

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// `?` markers.
    #[serde(rename = "mysql", alias = "MySQL")]
    MySql,
    /// `$1`, `$2`, ... markers.
    #[serde(rename = "postgres", alias = "postgresql", alias = "PostgreSQL")]
    Postgres,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::MySql
    }
}

impl Dialect {
    /// Width in bytes of the marker for the `index`-th argument (1-based).
    pub fn marker_width(&self, index: usize) -> usize {
        match self {
            Dialect::MySql => 1,
            Dialect::Postgres => 1 + digits(index),
        }
    }

    /// Total width of the markers for `arg_count` arguments numbered from 1.
    pub fn interpolation_width(&self, arg_count: usize) -> usize {
        match self {
            Dialect::MySql => arg_count,
            Dialect::Postgres => {
                let mut width = 0;
                let mut low = 1usize;
                let mut digit_count = 1;
                while low <= arg_count {
                    let high = low.saturating_mul(10).saturating_sub(1).min(arg_count);
                    width += (high - low + 1) * (1 + digit_count);
                    low = low.saturating_mul(10);
                    digit_count += 1;
                }
                width
            }
        }
    }

    /// Append the marker for the `index`-th argument (1-based).
    pub fn write_marker(&self, out: &mut String, index: usize) {
        match self {
            Dialect::MySql => out.push('?'),
            Dialect::Postgres => {
                out.push('$');
                out.push_str(&index.to_string());
            }
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Postgres => write!(f, "postgres"),
        }
    }
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
