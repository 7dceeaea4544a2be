//! Fluent constructors for conditions, functions and statements.
//!
//! ```ignore
//! use querycraft::prelude::*;
//!
//! let query = select([&users])
//!     .filter(or(eq(&name, "foo"), eq(&name, "bar")))
//!     .order_by([desc(&name)])
//!     .limit(10);
//! ```

mod conditions;
mod functions;
mod statements;

pub use conditions::*;
pub use functions::*;
pub use statements::{SelectItem, delete, insert, select, update};
