//! Canonical-order traversal shared by rendering and argument collection.
//!
//! Both passes go through [`walk`], so the i-th placeholder emitted by the
//! [`Renderer`] is always the i-th parameter returned by [`collect`].

use crate::counter::Counter;
use crate::param::Param;
use crate::tree::{NodeId, NodeKind, Tree};

pub(crate) trait Visitor<'t> {
    fn text(&mut self, text: &'t str);
    fn placeholder(&mut self, param: &'t Param);
    fn enter_scope(&mut self) {}
    fn exit_scope(&mut self) {}
}

/// Visit `left`, then the body, then `right` of every node.
///
/// Lists emit their separator between elements; a scope is bracketed by
/// `enter_scope` / `exit_scope`.
pub(crate) fn walk<'t, V: Visitor<'t>>(tree: &'t Tree, id: NodeId, visitor: &mut V) {
    let node = tree.node(id);
    if let Some(left) = node.left {
        walk(tree, left, visitor);
    }
    match &node.kind {
        NodeKind::Text(body) => visitor.text(body),
        NodeKind::Arg(param) => visitor.placeholder(param),
        NodeKind::List { items, sep } => {
            for (i, &item) in items.iter().enumerate() {
                if i > 0 {
                    visitor.text(sep);
                }
                walk(tree, item, visitor);
            }
        }
        NodeKind::Names { names, sep } => {
            for (i, name) in names.iter().enumerate() {
                if i > 0 {
                    visitor.text(sep);
                }
                visitor.text(name);
            }
        }
        NodeKind::Scope(inner) => {
            visitor.enter_scope();
            walk(tree, *inner, visitor);
            visitor.exit_scope();
        }
    }
    if let Some(right) = node.right {
        walk(tree, right, visitor);
    }
}

/// Writes SQL text, numbering placeholders from the statement counter.
pub(crate) struct Renderer<'a> {
    out: &'a mut String,
    counter: &'a mut Counter,
    scopes: Vec<Counter>,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(out: &'a mut String, counter: &'a mut Counter) -> Self {
        Self {
            out,
            counter,
            scopes: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Counter {
        match self.scopes.last_mut() {
            Some(scoped) => scoped,
            None => &mut *self.counter,
        }
    }
}

impl<'t> Visitor<'t> for Renderer<'_> {
    fn text(&mut self, text: &'t str) {
        self.out.push_str(text);
    }

    fn placeholder(&mut self, _param: &'t Param) {
        let n = self.current().next();
        self.out.push('$');
        push_u32(self.out, n);
    }

    fn enter_scope(&mut self) {
        self.scopes.push(Counter::new());
    }

    fn exit_scope(&mut self) {
        self.scopes.pop();
    }
}

// Write a u32 as decimal digits into `out` without going through fmt.
#[inline]
fn push_u32(out: &mut String, mut n: u32) {
    if n < 10 {
        out.push((b'0' + n as u8) as char);
        return;
    }
    let mut buf = [0u8; 10];
    let mut pos = buf.len();
    while n > 0 {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
    }
    for &digit in &buf[pos..] {
        out.push(digit as char);
    }
}

struct Collector<'t> {
    params: Vec<&'t Param>,
}

impl<'t> Visitor<'t> for Collector<'t> {
    fn text(&mut self, _text: &'t str) {}

    fn placeholder(&mut self, param: &'t Param) {
        self.params.push(param);
    }
}

/// Bound values below `id`, in placeholder order.
pub(crate) fn collect(tree: &Tree, id: NodeId) -> Vec<&Param> {
    let mut collector = Collector { params: Vec::new() };
    walk(tree, id, &mut collector);
    collector.params
}
