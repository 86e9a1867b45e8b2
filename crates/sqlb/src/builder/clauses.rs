//! Clause methods. Each one builds a labeled subtree and splices it.

use super::Builder;
use crate::expr::{self, Expr};
use crate::param::Param;
use tokio_postgres::types::ToSql;

impl Builder {
    // ==================== Statement start ====================

    /// Start a `SELECT target` statement, discarding any previous tree.
    ///
    /// The render cache is left alone; call [`Builder::reset`] before rendering
    /// a rebuilt statement.
    pub fn select(&mut self, target: Expr) -> &mut Self {
        self.begin();
        self.clause(" SELECT ", target)
    }

    /// Start an `INSERT` statement, discarding any previous tree.
    pub fn insert(&mut self) -> &mut Self {
        self.begin();
        self.splice(Expr::text(" INSERT "))
    }

    // ==================== INSERT ====================

    /// Add `INTO table`.
    pub fn into_(&mut self, table: impl Into<String>) -> &mut Self {
        self.clause(" INTO ", expr::name(table.into()))
    }

    /// Add a parenthesized column list.
    pub fn columns<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.splice(Expr::names_with(
            cols,
            ", ",
            Some(Expr::text(" (")),
            Some(Expr::text(") ")),
        ))
    }

    /// Add `VALUES($n, ...)`, one placeholder per value.
    pub fn values<T, I>(&mut self, values: I) -> &mut Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        self.values_params(values.into_iter().map(Param::new))
    }

    /// Add `VALUES($n, ...)` from pre-wrapped params (mixed value types).
    pub fn values_params<I>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = Param>,
    {
        let exprs = params.into_iter().map(expr::param).collect();
        self.splice(Expr::list_with(
            exprs,
            ", ",
            Some(Expr::text(" VALUES(")),
            Some(Expr::text(") ")),
        ))
    }

    // ==================== SELECT ====================

    /// Add `FROM source`.
    pub fn from(&mut self, source: Expr) -> &mut Self {
        self.clause(" FROM ", source)
    }

    /// Add `WHERE condition`.
    pub fn where_(&mut self, condition: Expr) -> &mut Self {
        self.clause(" WHERE ", condition)
    }

    /// Add `GROUP BY names`.
    pub fn group_by<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.clause(" GROUP BY ", expr::names(names))
    }

    /// Add `HAVING condition`.
    pub fn having(&mut self, condition: Expr) -> &mut Self {
        self.clause(" HAVING ", condition)
    }

    /// Add `ORDER BY names`.
    pub fn order_by<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.clause(" ORDER BY ", expr::names(names))
    }

    /// Add `LIMIT $n`.
    pub fn limit(&mut self, n: i64) -> &mut Self {
        self.clause(" LIMIT ", expr::arg(n))
    }

    /// Add `OFFSET $n`.
    pub fn offset(&mut self, n: i64) -> &mut Self {
        self.clause(" OFFSET ", expr::arg(n))
    }

    /// Add a `DISTINCT` marker at the cursor.
    pub fn distinct(&mut self) -> &mut Self {
        self.splice(Expr::text(" DISTINCT "))
    }
}
