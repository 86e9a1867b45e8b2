//! Composable expression nodes.
//!
//! An [`Expr`] is a small owned tree. Every node has an optional left and
//! right neighbor plus a body that depends on its kind:
//!
//! - **text**: a literal keyword, operator or identifier
//! - **arg**: one bound value, rendered as `$n`
//! - **list**: child expressions joined by a separator
//! - **names**: raw identifiers joined by a separator
//! - **scope**: a nested statement with its own placeholder numbering
//!
//! Rendering always visits `left`, then the body, then `right`. For lists the
//! neighbors act as wrappers, e.g. `" ("` and `") "` around an `AND` group.
//!
//! # Example
//!
//! ```ignore
//! use sqlb::{and, arg, equal, is, name, not_null};
//!
//! let cond = and(vec![
//!     equal(name("updated_at"), arg(5i32)),
//!     is(name("updated_at"), not_null()),
//! ]);
//! let (sql, params) = cond.build();
//! assert_eq!(sql, " (updated_at = $1 AND updated_at IS  NOT NULL ) ");
//! assert_eq!(params.len(), 1);
//! ```

use crate::counter::Counter;
use crate::param::{Param, ParamList};
use crate::tree::Tree;
use crate::walk::{self, Renderer};
use std::borrow::Cow;
use tokio_postgres::types::ToSql;

/// Expression tree node.
#[derive(Clone, Debug)]
pub struct Expr {
    pub(crate) kind: ExprKind,
    pub(crate) left: Option<Box<Expr>>,
    pub(crate) right: Option<Box<Expr>>,
}

/// The body of an [`Expr`].
#[derive(Clone, Debug)]
pub enum ExprKind {
    /// Fixed SQL text.
    Text(Cow<'static, str>),

    /// A bound value.
    Arg(Param),

    /// Child expressions joined by `sep`.
    List {
        exprs: Vec<Expr>,
        sep: Cow<'static, str>,
    },

    /// Raw identifiers joined by `sep`. Carries no arguments.
    Names {
        names: Vec<String>,
        sep: Cow<'static, str>,
    },

    /// A nested statement whose placeholders restart at `$1`.
    Scope(Box<Expr>),
}

impl Expr {
    fn from_kind(kind: ExprKind) -> Self {
        Self {
            kind,
            left: None,
            right: None,
        }
    }

    /// Fixed SQL text with no neighbors.
    pub fn text(body: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ExprKind::Text(body.into()))
    }

    /// Fixed SQL text between two optional neighbors.
    pub fn op(body: &'static str, left: Option<Expr>, right: Option<Expr>) -> Self {
        Self {
            kind: ExprKind::Text(Cow::Borrowed(body)),
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// A list of expressions with a custom separator and optional wrappers.
    pub fn list_with(
        exprs: Vec<Expr>,
        sep: impl Into<Cow<'static, str>>,
        open: Option<Expr>,
        close: Option<Expr>,
    ) -> Self {
        Self {
            kind: ExprKind::List {
                exprs,
                sep: sep.into(),
            },
            left: open.map(Box::new),
            right: close.map(Box::new),
        }
    }

    /// A list of raw identifiers with a custom separator and optional wrappers.
    pub fn names_with<I>(
        names: I,
        sep: impl Into<Cow<'static, str>>,
        open: Option<Expr>,
        close: Option<Expr>,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            kind: ExprKind::Names {
                names: names.into_iter().map(Into::into).collect(),
                sep: sep.into(),
            },
            left: open.map(Box::new),
            right: close.map(Box::new),
        }
    }

    /// Wrap a statement so its placeholders are numbered independently.
    pub fn scope(inner: Expr) -> Self {
        Self::from_kind(ExprKind::Scope(Box::new(inner)))
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn left(&self) -> Option<&Expr> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Expr> {
        self.right.as_deref()
    }

    pub fn set_left(&mut self, left: Option<Expr>) {
        self.left = left.map(Box::new);
    }

    pub fn set_right(&mut self, right: Option<Expr>) {
        self.right = right.map(Box::new);
    }

    /// Set the left neighbor (consuming version of [`Expr::set_left`]).
    pub fn with_left(mut self, left: Expr) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    /// Set the right neighbor (consuming version of [`Expr::set_right`]).
    pub fn with_right(mut self, right: Expr) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    /// Render this expression on its own, numbering placeholders from `$1`.
    ///
    /// Unlike [`Builder::to_sql`](crate::Builder::to_sql) the text is not
    /// trimmed, so the exact contribution of every token is visible.
    pub fn build(&self) -> (String, ParamList) {
        let mut tree = Tree::new();
        let root = tree.insert(self.clone());

        let mut sql = String::new();
        let mut counter = Counter::new();
        walk::walk(&tree, root, &mut Renderer::new(&mut sql, &mut counter));

        let mut params = ParamList::with_capacity(counter.get() as usize);
        for param in walk::collect(&tree, root) {
            params.push_param(param.clone());
        }
        (sql, params)
    }
}

/// An identifier or any other verbatim fragment.
pub fn name(s: impl Into<Cow<'static, str>>) -> Expr {
    Expr::text(s)
}

/// A bound value.
pub fn arg<T: ToSql + Send + Sync + 'static>(value: T) -> Expr {
    Expr::from_kind(ExprKind::Arg(Param::new(value)))
}

/// A pre-wrapped bound value.
pub fn param(param: Param) -> Expr {
    Expr::from_kind(ExprKind::Arg(param))
}

/// `left IS right`
pub fn is(left: Expr, right: Expr) -> Expr {
    Expr::op(" IS ", Some(left), Some(right))
}

/// ` NOT NULL `, usually the right side of [`is`].
pub fn not_null() -> Expr {
    Expr::text(" NOT NULL ")
}

/// `left = right`
pub fn equal(left: Expr, right: Expr) -> Expr {
    Expr::op(" = ", Some(left), Some(right))
}

/// `left @> right`
pub fn contains(left: Expr, right: Expr) -> Expr {
    Expr::op(" @> ", Some(left), Some(right))
}

/// `left <@ right`
pub fn is_contained_by(left: Expr, right: Expr) -> Expr {
    Expr::op(" <@ ", Some(left), Some(right))
}

/// `left ? right` (jsonb key existence)
pub fn has_key(left: Expr, right: Expr) -> Expr {
    Expr::op(" ? ", Some(left), Some(right))
}

/// `left IN right`
///
/// The right side is rendered as-is; pass a [`list`] of args for an IN-list.
pub fn in_(left: Expr, right: Expr) -> Expr {
    Expr::op(" IN ", Some(left), Some(right))
}

/// `left AS alias`
pub fn as_(left: Expr, alias: impl Into<Cow<'static, str>>) -> Expr {
    Expr::op(" AS ", Some(left), Some(Expr::text(alias)))
}

/// ` (e1 AND e2 ...) `
pub fn and(exprs: Vec<Expr>) -> Expr {
    Expr::list_with(
        exprs,
        " AND ",
        Some(Expr::text(" (")),
        Some(Expr::text(") ")),
    )
}

/// ` (e1 OR e2 ...) `
pub fn or(exprs: Vec<Expr>) -> Expr {
    Expr::list_with(
        exprs,
        " OR ",
        Some(Expr::text(" (")),
        Some(Expr::text(") ")),
    )
}

/// `e1, e2, ...` with no wrappers.
pub fn list(exprs: Vec<Expr>) -> Expr {
    Expr::list_with(exprs, ", ", None, None)
}

/// `n1, n2, ...` with no wrappers.
pub fn names<I>(names: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Expr::names_with(names, ", ", None, None)
}
