//! Statement builder.
//!
//! A [`Builder`] owns one statement tree, an append cursor, the placeholder
//! counter and a render cache. Every clause method builds a small labeled
//! subtree and splices it after the cursor, so clause order in the output is
//! exactly call order.
//!
//! ## Rendering contract
//!
//! - [`Builder::to_sql`] renders once and caches the trimmed text. Later
//!   calls return the cache without touching the counter, even if clauses were
//!   appended in between.
//! - [`Builder::reset`] clears the cache and zeroes the counter. The tree is
//!   kept; the next `to_sql` renders it again from `$1`.
//! - [`Builder::args`] walks the tree in the same order as rendering, so
//!   `args()[i]` binds to `$(i + 1)`. It never reads the cache.
//! - A subquery nested through [`Builder::expr`] restarts at `$1`. Its values
//!   still appear in `args()` in traversal order, so a statement containing
//!   one does not bind positionally.
//!
//! # Example
//!
//! ```ignore
//! use sqlb::{Builder, arg, equal, name};
//!
//! let mut b = Builder::new();
//! b.select(name("*")).from(name("users")).where_(equal(name("id"), arg(7i64)));
//!
//! let (sql, params) = b.build();
//! let rows = client.query(sql, &params).await?;
//! ```

mod clauses;

use crate::config::BuilderConfig;
use crate::counter::Counter;
use crate::error::SqlbResult;
use crate::expr::Expr;
use crate::param::ParamList;
use crate::pool::Scratch;
use crate::tree::{NodeId, Tree};
use crate::walk::{self, Renderer};
use std::fmt;
use std::io;
use tokio_postgres::types::ToSql;

/// State of the render cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenderCache {
    /// Nothing rendered since construction or the last reset.
    #[default]
    NotRendered,
    /// Trimmed text of the last render pass.
    Rendered(String),
}

/// Expression-tree SQL statement builder.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    tree: Tree,
    root: Option<NodeId>,
    /// Where the next clause attaches.
    cursor: Option<NodeId>,
    counter: Counter,
    cache: RenderCache,
    config: BuilderConfig,
}

impl Builder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with custom rendering options.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Discard the current tree before a new statement is started.
    pub(crate) fn begin(&mut self) {
        self.tree.clear();
        self.root = None;
        self.cursor = None;
    }

    /// Link `head` after the cursor and move the cursor to `tail`.
    ///
    /// With no root yet, `head` becomes the root.
    pub(crate) fn attach(&mut self, head: NodeId, tail: NodeId) -> &mut Self {
        match self.cursor {
            Some(cursor) => self.tree.set_right(cursor, head),
            None => self.root = Some(head),
        }
        self.cursor = Some(tail);
        self
    }

    /// `keyword` followed by `body`, spliced as one clause.
    pub(crate) fn clause(&mut self, keyword: &'static str, body: Expr) -> &mut Self {
        let head = self.tree.alloc_text(keyword);
        let body = self.tree.insert(body);
        self.tree.set_right(head, body);
        let tail = self.tree.tail(body);
        self.attach(head, tail)
    }

    /// Splice an arbitrary subtree after the cursor.
    ///
    /// The cursor moves to the end of the subtree's right-neighbor chain, so a
    /// following clause lands after any closing wrapper.
    pub fn splice(&mut self, expr: Expr) -> &mut Self {
        let head = self.tree.insert(expr);
        let tail = self.tree.tail(head);
        self.attach(head, tail)
    }

    /// Render the statement with `$1, $2, ...` placeholders.
    ///
    /// The first call renders and caches; see the module docs for the cache
    /// contract. An empty builder renders as `""`.
    pub fn to_sql(&mut self) -> &str {
        if self.cache == RenderCache::NotRendered {
            let text = self.render();
            self.cache = RenderCache::Rendered(text);
        }
        match &self.cache {
            RenderCache::Rendered(text) => text,
            RenderCache::NotRendered => "",
        }
    }

    fn render(&mut self) -> String {
        let Some(root) = self.root else {
            return String::new();
        };

        let mut scratch = if self.config.use_pool {
            Scratch::acquire()
        } else {
            Scratch::unpooled(self.config.scratch_capacity)
        };
        walk::walk(
            &self.tree,
            root,
            &mut Renderer::new(&mut scratch, &mut self.counter),
        );
        let text = scratch.trim().to_string();

        #[cfg(feature = "tracing")]
        crate::trace::rendered(&self.config, &text, self.counter.get());

        text
    }

    /// The cached text, if a render happened since the last reset.
    pub fn cached_sql(&self) -> Option<&str> {
        match &self.cache {
            RenderCache::Rendered(text) => Some(text),
            RenderCache::NotRendered => None,
        }
    }

    pub fn render_cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Placeholders handed out by the last render pass.
    pub fn placeholder_count(&self) -> u32 {
        self.counter.get()
    }

    /// Clear the render cache and restart placeholder numbering.
    ///
    /// The statement tree is kept.
    pub fn reset(&mut self) {
        self.cache = RenderCache::NotRendered;
        self.counter.reset();

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "sqlb.sql", "render cache reset");
    }

    /// Bound values in placeholder order.
    pub fn args(&self) -> ParamList {
        let Some(root) = self.root else {
            return ParamList::new();
        };
        let mut params = ParamList::with_capacity(self.counter.get() as usize);
        for param in walk::collect(&self.tree, root) {
            params.push_param(param.clone());
        }
        params
    }

    /// Render (or reuse the cache) and collect arguments in one borrow.
    ///
    /// The refs line up with `$1, $2, ...` only when the statement holds no
    /// nested [`Builder::expr`] scope.
    ///
    /// ```ignore
    /// let (sql, params) = b.build();
    /// client.query(sql, &params).await?;
    /// ```
    pub fn build(&mut self) -> (&str, Vec<&(dyn ToSql + Sync)>) {
        self.to_sql();
        let this = &*self;
        (this.cached_sql().unwrap_or_default(), this.params_ref())
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        match self.root {
            Some(root) => walk::collect(&self.tree, root)
                .into_iter()
                .map(|p| p.as_sql())
                .collect(),
            None => Vec::new(),
        }
    }

    /// The whole statement as an expression, for nesting in another builder.
    ///
    /// The result is a scope: its placeholders are numbered from `$1`
    /// independently of the enclosing statement. The enclosing builder's
    /// `args()` lists the scope's values inline, so they no longer match the
    /// outer placeholder numbers one to one.
    pub fn expr(&self) -> Expr {
        match self.root {
            Some(root) => Expr::scope(self.tree.to_expr(root)),
            None => Expr::scope(Expr::text("")),
        }
    }

    /// Human-readable statement and argument listing.
    ///
    /// ```text
    /// query: SELECT * FROM user WHERE id = $1
    /// arg: 1     42
    /// ```
    pub fn dump(&mut self) -> String {
        let mut out = format!("query: {} \n", self.to_sql());
        for (i, arg) in self.args().iter().enumerate() {
            out.push_str(&format!("arg: {:<5} {:?} \n", i + 1, arg));
        }
        out
    }

    /// Render (or reuse the cache) and write the text to an `io::Write` sink.
    pub fn write_to<W: io::Write>(&mut self, mut writer: W) -> SqlbResult<()> {
        writer.write_all(self.to_sql().as_bytes())?;
        Ok(())
    }

    /// Render (or reuse the cache) and write the text to a `fmt::Write` sink.
    pub fn write_fmt_to<W: fmt::Write + ?Sized>(&mut self, writer: &mut W) -> SqlbResult<()> {
        writer.write_str(self.to_sql())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
