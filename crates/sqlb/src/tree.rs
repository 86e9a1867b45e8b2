//! Node arena backing a [`Builder`](crate::Builder).
//!
//! Expressions are owned values while they are being composed; splicing one
//! into a builder flattens it into this arena so the builder can keep stable
//! handles to its root and to the append cursor.

use crate::expr::{Expr, ExprKind};
use crate::param::Param;
use std::borrow::Cow;

/// Stable handle of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Text(Cow<'static, str>),
    Arg(Param),
    List {
        items: Vec<NodeId>,
        sep: Cow<'static, str>,
    },
    Names {
        names: Vec<String>,
        sep: Cow<'static, str>,
    },
    Scope(NodeId),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drop every node. Handles issued before this call are invalid afterwards.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn alloc_text(&mut self, body: &'static str) -> NodeId {
        self.push(Node {
            kind: NodeKind::Text(Cow::Borrowed(body)),
            left: None,
            right: None,
        })
    }

    pub(crate) fn set_right(&mut self, id: NodeId, right: NodeId) {
        self.nodes[id.0].right = Some(right);
    }

    /// Move an expression into the arena, children first, and return the
    /// handle of its top node.
    pub(crate) fn insert(&mut self, expr: Expr) -> NodeId {
        let Expr { kind, left, right } = expr;
        let left = left.map(|e| self.insert(*e));
        let kind = match kind {
            ExprKind::Text(body) => NodeKind::Text(body),
            ExprKind::Arg(param) => NodeKind::Arg(param),
            ExprKind::List { exprs, sep } => NodeKind::List {
                items: exprs.into_iter().map(|e| self.insert(e)).collect(),
                sep,
            },
            ExprKind::Names { names, sep } => NodeKind::Names { names, sep },
            ExprKind::Scope(inner) => NodeKind::Scope(self.insert(*inner)),
        };
        let right = right.map(|e| self.insert(*e));
        self.push(Node { kind, left, right })
    }

    /// Last node of the right-neighbor chain starting at `id`.
    ///
    /// This is where the next clause attaches: for a wrapped list it is the
    /// closing wrapper, for a keyword with a body it is the end of the body.
    pub(crate) fn tail(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while let Some(next) = self.node(cur).right {
            cur = next;
        }
        cur
    }

    /// Rebuild an owned expression from the subtree rooted at `id`.
    pub(crate) fn to_expr(&self, id: NodeId) -> Expr {
        let node = self.node(id);
        let kind = match &node.kind {
            NodeKind::Text(body) => ExprKind::Text(body.clone()),
            NodeKind::Arg(param) => ExprKind::Arg(param.clone()),
            NodeKind::List { items, sep } => ExprKind::List {
                exprs: items.iter().map(|&item| self.to_expr(item)).collect(),
                sep: sep.clone(),
            },
            NodeKind::Names { names, sep } => ExprKind::Names {
                names: names.clone(),
                sep: sep.clone(),
            },
            NodeKind::Scope(inner) => ExprKind::Scope(Box::new(self.to_expr(*inner))),
        };
        Expr {
            kind,
            left: node.left.map(|l| Box::new(self.to_expr(l))),
            right: node.right.map(|r| Box::new(self.to_expr(r))),
        }
    }
}
