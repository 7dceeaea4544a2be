//! # querycraft
//!
//! > **Stop concatenating strings. Build the tree.**
//!
//! querycraft assembles SELECT / INSERT / UPDATE / DELETE statements from typed
//! values (tables, columns, expressions, clauses) and renders them as
//! `(sql, args)` for prepared-statement execution, with `?` markers for MySQL
//! and `$N` markers for PostgreSQL. Argument values never appear in the SQL.
//!
//! ## Quick Example
//!
//! ```rust
//! use querycraft::prelude::*;
//!
//! let mut schema = Schema::new();
//! schema.add_table("users")?;
//! schema.add_column("users", "id")?;
//! schema.add_column("users", "name")?;
//!
//! let users = schema.try_table("users")?;
//! let query = select([&users]).filter(eq(users.column("id")?, 1));
//!
//! let (sql, args) = query.to_sql();
//! assert_eq!(sql, "SELECT users.id, users.name FROM users WHERE users.id = ?");
//! assert_eq!(args, vec![Value::Int(1)]);
//!
//! let (sql, _) = query.to_sql_with_dialect(Dialect::Postgres);
//! assert_eq!(sql, "SELECT users.id, users.name FROM users WHERE users.id = $1");
//! # Ok::<(), QueryError>(())
//! ```
//!
//! ## Layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`schema`]   | Tables, columns and foreign references; loaders       |
//! | [`ast`]      | Statement tree and the [`Scannable`] rendering contract |
//! | [`builders`] | `select`, `eq`, `max`, `trim_chars`, ...              |
//! | [`scanner`]  | Dialect and formatting; turns a tree into `(sql, args)` |
//! | [`config`]   | Scanner settings from TOML                            |

pub mod ast;
pub mod builders;
pub mod config;
pub mod dialect;
pub mod error;
pub mod scanner;
pub mod schema;
pub mod symbols;
pub mod value;

pub use ast::{Scannable, Statement};
pub use builders::select;
pub use config::ScannerConfig;
pub use dialect::Dialect;
pub use error::{QueryError, QueryResult};
pub use scanner::{Scanner, ToSql};
pub use schema::Schema;
pub use value::Value;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::builders::*;
    pub use crate::config::ScannerConfig;
    pub use crate::dialect::Dialect;
    pub use crate::error::*;
    pub use crate::scanner::{Scanner, ToSql};
    pub use crate::schema::{ForeignRef, Schema};
    pub use crate::value::Value;
}
