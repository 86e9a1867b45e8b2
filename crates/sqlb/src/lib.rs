//! # sqlb
//!
//! Build Postgres statements as trees of composable expressions, then render
//! them as text with `$1, $2, ...` placeholders plus the bound values in the
//! matching order.
//!
//! ## Features
//!
//! - **Composable**: `and`, `or`, `equal`, `in_`, `as_` ... nest to any depth
//! - **Consistent binding**: text and arguments come from the same traversal,
//!   so `args()[i]` binds to `$(i + 1)` for statements without nested scopes
//! - **Subqueries**: a builder's [`Builder::expr`] nests in another statement
//!   with its own placeholder numbering; the combined arguments then no longer
//!   bind positionally
//! - **tokio-postgres ready**: arguments are `ToSql` values, see
//!   [`Builder::build`]
//!
//! ## Example
//!
//! ```ignore
//! use sqlb::{Builder, and, arg, contains, equal, is, name, not_null};
//!
//! let mut b = Builder::new();
//! b.select(name("*")).from(name("user")).where_(and(vec![
//!     equal(name("updated_at"), arg(5i32)),
//!     is(name("updated_at"), not_null()),
//!     contains(name("roles"), arg(serde_json::json!({"manager": 1}))),
//! ]));
//!
//! assert_eq!(
//!     b.to_sql(),
//!     "SELECT * FROM user WHERE  (updated_at = $1 AND updated_at IS  NOT NULL  AND roles @> $2)"
//! );
//! let (sql, params) = b.build();
//! let rows = client.query(sql, &params).await?;
//! ```

pub mod builder;
pub mod config;
pub mod counter;
pub mod error;
pub mod expr;
pub mod param;

mod pool;
#[cfg(feature = "tracing")]
mod trace;
mod tree;
mod walk;

pub use builder::{Builder, RenderCache};
pub use config::BuilderConfig;
pub use counter::Counter;
pub use error::{SqlbError, SqlbResult};
pub use expr::{
    Expr, ExprKind, and, arg, as_, contains, equal, has_key, in_, is, is_contained_by, list,
    name, names, not_null, or, param,
};
pub use param::{Param, ParamList};
