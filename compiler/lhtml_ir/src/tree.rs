//! Flat node arena.
//!
//! [`NodeTree`] owns every node of one parsed document together with the
//! source text the nodes were read from. Links between nodes are
//! [`NodeId`]s into the same arena.

use crate::node_id::to_u32;
use crate::{NodeFlags, NodeId, NodeKind, Span};

/// One node of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub flags: NodeFlags,
    /// Whole node in the source.
    pub span: Span,
    /// Content between the opening and closing tag. Empty for leaves.
    pub body: Span,
    pub parent: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            flags: NodeFlags::empty(),
            span: Span::DUMMY,
            body: Span::DUMMY,
            parent: None,
            prev: None,
            next: None,
            children: Vec::new(),
        }
    }

    /// Whether all of `flags` are set.
    #[inline]
    pub fn has(&self, flags: NodeFlags) -> bool {
        self.flags.contains(flags)
    }
}

/// Arena of nodes for one document.
///
/// Node `0` is always the [`NodeKind::Document`] root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeTree {
    nodes: Vec<Node>,
    source: String,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    /// Create a tree holding only the document root.
    pub fn new() -> Self {
        Self::with_source(String::new())
    }

    /// Create a root-only tree over existing source text.
    pub fn with_source(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut root = Node::new(NodeKind::Document);
        let end = to_u32(source.len(), "source bytes");
        root.span = Span::new(0, end);
        root.body = root.span;
        NodeTree {
            nodes: vec![root],
            source,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is `false` in practice.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get a node.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this tree.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    #[inline]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.get(id).flags
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    #[inline]
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).prev
    }

    #[inline]
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).next
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Source text between the node's opening and closing tag.
    pub fn content(&self, id: NodeId) -> &str {
        self.get(id).body.slice(&self.source)
    }

    /// Iterate over the strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Iterate over every node id in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId::new(to_u32(i, "nodes")))
    }

    /// Replace a node's flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        self.nodes[id.index()].flags = flags;
    }

    /// Set additional flags on a node.
    pub fn insert_flags(&mut self, id: NodeId, flags: NodeFlags) {
        self.nodes[id.index()].flags.insert(flags);
    }

    /// Clear flags on a node.
    pub fn remove_flags(&mut self, id: NodeId, flags: NodeFlags) {
        self.nodes[id.index()].flags.remove(flags);
    }

    /// Allocate `kind` as the last child of `parent`, linking siblings.
    pub fn append_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId::new(to_u32(self.nodes.len(), "nodes"));
        let mut node = Node::new(kind);
        node.parent = Some(parent);
        node.prev = self.last_child(parent);
        if let Some(prev) = node.prev {
            self.nodes[prev.index()].next = Some(id);
        }
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn source_mut(&mut self) -> &mut String {
        &mut self.source
    }
}

/// Iterator over a node's ancestors. See [`NodeTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a NodeTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}
