//! Tree construction.
//!
//! [`NodeTreeBuilder`] assembles a [`NodeTree`] in document order and writes
//! the matching source text as it goes, so every node carries a real
//! [`Span`]. Whitespace-only text outside `<pre>`-like elements does not
//! become a node: it is recorded as boundary flags on the neighbours instead.
//! [`NodeTreeBuilder::finish`] then derives whitespace sensitivity from the
//! default CSS display of each node.

use thiserror::Error;

use crate::node_id::to_u32;
use crate::{
    Attr, ClosingKind, CssDisplay, Element, LiquidDrop, NodeFlags, NodeId, NodeKind, NodeTree,
    Span, WhiteSpace,
};

/// Errors from unbalanced tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// `close_element` was called with only the document open.
    #[error("no open element to close")]
    NoOpenElement,

    /// `close_element` named a different element than the open one.
    #[error("closing tag `</{found}>` does not match open element `<{expected}>`")]
    MismatchedClose { expected: String, found: String },

    /// `finish` was called with elements still open.
    #[error("element `<{name}>` was never closed")]
    Unclosed { name: String },
}

/// Whitespace seen between two nodes that has not been attributed yet.
#[derive(Copy, Clone, Debug, Default)]
struct Gap {
    line_breaks: usize,
}

struct Frame {
    id: NodeId,
    pending: Option<Gap>,
    /// Text inside keeps its whitespace verbatim.
    keeps_whitespace: bool,
}

/// Builds a [`NodeTree`] and its source text in document order.
///
/// ```
/// use lhtml_ir::{Attr, NodeTreeBuilder};
///
/// let mut b = NodeTreeBuilder::new();
/// b.open_element("div", vec![Attr::new("class", "a")]);
/// b.text("hello");
/// b.close_element("div").unwrap();
/// let tree = b.finish().unwrap();
/// assert_eq!(tree.source(), "<div class=\"a\">hello</div>");
/// ```
pub struct NodeTreeBuilder {
    tree: NodeTree,
    stack: Vec<Frame>,
}

impl Default for NodeTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTreeBuilder {
    pub fn new() -> Self {
        let tree = NodeTree::new();
        let root = Frame {
            id: tree.root(),
            pending: None,
            keeps_whitespace: false,
        };
        NodeTreeBuilder {
            tree,
            stack: vec![root],
        }
    }

    /// Open an ordinary element. Subsequent nodes become its children.
    pub fn open_element(&mut self, name: &str, attrs: Vec<Attr>) -> NodeId {
        let start = self.offset();
        let tag = opening_tag_source(name, &attrs, "");
        self.write(&tag);
        let id = self.push(NodeKind::Element(Element {
            name: name.to_string(),
            attrs,
            closing: ClosingKind::Normal,
        }));
        let body_start = self.offset();
        let node = self.tree.node_mut(id);
        node.span.start = start;
        node.body = Span::new(body_start, body_start);
        self.stack.push(Frame {
            id,
            pending: None,
            keeps_whitespace: WhiteSpace::for_tag(&name.to_ascii_lowercase()).is_pre(),
        });
        id
    }

    /// Close the innermost open element, which must be named `name`.
    pub fn close_element(&mut self, name: &str) -> Result<NodeId, TreeError> {
        if self.stack.len() < 2 {
            return Err(TreeError::NoOpenElement);
        }
        let open_name = self
            .tree
            .kind(self.current().id)
            .name()
            .unwrap_or_default()
            .to_string();
        if !open_name.eq_ignore_ascii_case(name) {
            return Err(TreeError::MismatchedClose {
                expected: open_name,
                found: name.to_string(),
            });
        }
        let Some(frame) = self.stack.pop() else {
            return Err(TreeError::NoOpenElement);
        };
        self.settle_trailing_gap(&frame);

        let body_end = self.offset();
        self.write(&format!("</{open_name}>"));
        let end = self.offset();
        let node = self.tree.node_mut(frame.id);
        node.body.end = body_end;
        node.span.end = end;
        Ok(frame.id)
    }

    /// Add a void element such as `<br>`.
    pub fn void_element(&mut self, name: &str, attrs: Vec<Attr>) -> NodeId {
        self.leaf_element(name, attrs, ClosingKind::Void)
    }

    /// Add a self-closing element such as `<img />`.
    pub fn self_closing_element(&mut self, name: &str, attrs: Vec<Attr>) -> NodeId {
        self.leaf_element(name, attrs, ClosingKind::SelfClosing)
    }

    /// Add an element whose content is kept unparsed, such as `<script>`.
    pub fn raw_element(&mut self, name: &str, attrs: Vec<Attr>, content: &str) -> NodeId {
        let start = self.offset();
        self.write(&opening_tag_source(name, &attrs, ""));
        let body_start = self.offset();
        self.write(content);
        let body_end = self.offset();
        self.write(&format!("</{name}>"));
        let end = self.offset();
        let id = self.push(NodeKind::RawElement(Element {
            name: name.to_string(),
            attrs,
            closing: ClosingKind::Normal,
        }));
        let node = self.tree.node_mut(id);
        node.span = Span::new(start, end);
        node.body = Span::new(body_start, body_end);
        id
    }

    /// Add text.
    ///
    /// Outside `<pre>`-like elements, surrounding whitespace becomes boundary
    /// flags and whitespace-only text yields no node (`None`).
    pub fn text(&mut self, value: &str) -> Option<NodeId> {
        if self.current().keeps_whitespace {
            let span = self.write(value);
            let id = self.push(NodeKind::Text {
                value: value.to_string(),
            });
            self.tree.node_mut(id).span = span;
            return Some(id);
        }

        let after_leading = value.trim_start_matches(is_html_whitespace);
        let leading = &value[..value.len() - after_leading.len()];
        let inner = after_leading.trim_end_matches(is_html_whitespace);
        let trailing = &after_leading[inner.len()..];

        if !leading.is_empty() {
            self.write(leading);
            self.add_gap(leading);
        }
        if inner.is_empty() {
            return None;
        }
        let span = self.write(inner);
        let id = self.push(NodeKind::Text {
            value: inner.to_string(),
        });
        self.tree.node_mut(id).span = span;
        if !trailing.is_empty() {
            self.write(trailing);
            self.add_gap(trailing);
        }
        Some(id)
    }

    /// Add `<!--body-->`.
    pub fn comment(&mut self, body: &str) -> NodeId {
        let span = self.write(&format!("<!--{body}-->"));
        let id = self.push(NodeKind::Comment {
            body: body.to_string(),
        });
        let node = self.tree.node_mut(id);
        node.span = span;
        node.body = Span::new(span.start + 4, span.end - 3);
        id
    }

    /// Add `{{ markup }}`.
    pub fn liquid_drop(&mut self, markup: &str) -> NodeId {
        self.liquid_drop_trimmed(markup, false, false)
    }

    /// Add `{{ markup }}` with explicit `-` trim markers.
    pub fn liquid_drop_trimmed(&mut self, markup: &str, trim_start: bool, trim_end: bool) -> NodeId {
        let open = if trim_start { "{{-" } else { "{{" };
        let close = if trim_end { "-}}" } else { "}}" };
        let span = self.write(&format!("{open} {markup} {close}"));
        let id = self.push(NodeKind::LiquidDrop(LiquidDrop {
            markup: markup.to_string(),
            trim_start,
            trim_end,
        }));
        self.tree.node_mut(id).span = span;
        id
    }

    /// Finish the tree and compute whitespace sensitivity for every node.
    pub fn finish(mut self) -> Result<NodeTree, TreeError> {
        if self.stack.len() > 1 {
            let name = self
                .tree
                .kind(self.current().id)
                .name()
                .unwrap_or_default()
                .to_string();
            return Err(TreeError::Unclosed { name });
        }
        if let Some(root) = self.stack.pop() {
            self.settle_trailing_gap(&root);
        }
        let end = self.offset();
        let root = self.tree.root();
        let node = self.tree.node_mut(root);
        node.span = Span::new(0, end);
        node.body = node.span;

        annotate_whitespace(&mut self.tree);
        Ok(self.tree)
    }

    fn leaf_element(&mut self, name: &str, attrs: Vec<Attr>, closing: ClosingKind) -> NodeId {
        let end_marker = if closing == ClosingKind::SelfClosing { " /" } else { "" };
        let span = self.write(&opening_tag_source(name, &attrs, end_marker));
        let id = self.push(NodeKind::Element(Element {
            name: name.to_string(),
            attrs,
            closing,
        }));
        self.tree.node_mut(id).span = span;
        id
    }

    #[inline]
    fn current(&self) -> &Frame {
        // The root frame is only popped by `finish`, which consumes the builder.
        &self.stack[self.stack.len() - 1]
    }

    fn offset(&self) -> u32 {
        to_u32(self.tree.source().len(), "source bytes")
    }

    fn write(&mut self, text: &str) -> Span {
        let start = self.offset();
        self.tree.source_mut().push_str(text);
        Span::new(start, self.offset())
    }

    fn add_gap(&mut self, whitespace: &str) {
        let line_breaks = whitespace.matches('\n').count();
        let last = self.stack.len() - 1;
        let gap = self.stack[last].pending.get_or_insert_with(Gap::default);
        gap.line_breaks += line_breaks;
    }

    /// Allocate a child of the current frame and attribute any pending gap.
    fn push(&mut self, kind: NodeKind) -> NodeId {
        let last = self.stack.len() - 1;
        let parent = self.stack[last].id;
        let pending = self.stack[last].pending.take();
        let id = self.tree.append_child(parent, kind);

        if let Some(gap) = pending {
            let mut leading = NodeFlags::HAS_LEADING_WHITESPACE;
            if gap.line_breaks > 0 {
                leading |= NodeFlags::HAS_LEADING_LINE_BREAK;
            }
            self.tree.insert_flags(id, leading);
            if let Some(prev) = self.tree.prev(id) {
                self.tree.insert_flags(prev, trailing_flags(gap));
            }
        }
        id
    }

    /// Attribute whitespace left before a closing tag.
    fn settle_trailing_gap(&mut self, frame: &Frame) {
        let Some(gap) = frame.pending else {
            return;
        };
        match self.tree.last_child(frame.id) {
            Some(last) => self.tree.insert_flags(last, trailing_flags(gap)),
            None => self
                .tree
                .insert_flags(frame.id, NodeFlags::HAS_DANGLING_WHITESPACE),
        }
    }
}

fn trailing_flags(gap: Gap) -> NodeFlags {
    let mut flags = NodeFlags::HAS_TRAILING_WHITESPACE;
    if gap.line_breaks > 0 {
        flags |= NodeFlags::HAS_TRAILING_LINE_BREAK;
    }
    if gap.line_breaks > 1 {
        flags |= NodeFlags::HAS_TRAILING_BLANK_LINE;
    }
    flags
}

fn opening_tag_source(name: &str, attrs: &[Attr], end_marker: &str) -> String {
    let mut out = format!("<{name}");
    for attr in attrs {
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
    out.push_str(end_marker);
    out.push('>');
    out
}

#[inline]
fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Derive sensitivity flags from default CSS display and white-space.
///
/// Runs once, after all nodes exist. Parents are allocated before their
/// children, so a single pass in id order sees every parent first.
fn annotate_whitespace(tree: &mut NodeTree) {
    let ids: Vec<NodeId> = tree.ids().collect();

    for &id in &ids {
        let kind = tree.kind(id);
        let mut flags = NodeFlags::empty();
        if kind.element().is_some() {
            let is_raw = matches!(kind, NodeKind::RawElement(_));
            let white_space = WhiteSpace::of(kind);
            if is_raw || white_space.is_pre() {
                flags |= NodeFlags::WHITESPACE_SENSITIVE;
            }
            if white_space.is_pre() {
                flags |= NodeFlags::INDENTATION_SENSITIVE;
            }
            if !is_raw && CssDisplay::of(kind).keeps_dangling_whitespace() {
                flags |= NodeFlags::DANGLING_WHITESPACE_SENSITIVE;
            }
        }
        tree.insert_flags(id, flags);
    }

    for &parent in &ids {
        let children = tree.children(parent).to_vec();
        let leading: Vec<bool> = children
            .iter()
            .map(|&c| is_leading_whitespace_sensitive(tree, c))
            .collect();
        let trailing: Vec<bool> = children
            .iter()
            .map(|&c| is_trailing_whitespace_sensitive(tree, c))
            .collect();

        let mut prev_trailing = false;
        for (i, &child) in children.iter().enumerate() {
            let is_leading = if i == 0 {
                leading[i]
            } else {
                prev_trailing && leading[i]
            };
            let is_trailing = if i + 1 == children.len() {
                trailing[i]
            } else {
                leading[i + 1] && trailing[i]
            };
            if is_leading {
                tree.insert_flags(child, NodeFlags::LEADING_WHITESPACE_SENSITIVE);
            }
            if is_trailing {
                tree.insert_flags(child, NodeFlags::TRAILING_WHITESPACE_SENSITIVE);
            }
            prev_trailing = is_trailing;
        }
    }
}

fn is_text_like(kind: &NodeKind) -> bool {
    kind.is_text() || kind.is_comment()
}

fn is_leading_whitespace_sensitive(tree: &NodeTree, id: NodeId) -> bool {
    let kind = tree.kind(id);
    let prev = tree.prev(id);
    if is_text_like(kind) && prev.is_some_and(|p| is_text_like(tree.kind(p))) {
        return true;
    }
    let Some(parent) = tree.parent(id) else {
        return true;
    };
    let parent_kind = tree.kind(parent);
    let parent_display = CssDisplay::of(parent_kind);
    if parent_display == CssDisplay::None || WhiteSpace::of(parent_kind).is_pre() {
        return true;
    }
    match prev {
        None if parent_kind.is_document()
            || !parent_display.keeps_first_child_leading_whitespace() =>
        {
            return false;
        }
        Some(prev) if CssDisplay::of(tree.kind(prev)).is_block_like() => return false,
        _ => {}
    }
    !CssDisplay::of(kind).is_block_like()
}

fn is_trailing_whitespace_sensitive(tree: &NodeTree, id: NodeId) -> bool {
    let kind = tree.kind(id);
    let next = tree.next(id);
    if is_text_like(kind) && next.is_some_and(|n| is_text_like(tree.kind(n))) {
        return true;
    }
    let Some(parent) = tree.parent(id) else {
        return true;
    };
    let parent_kind = tree.kind(parent);
    let parent_display = CssDisplay::of(parent_kind);
    if parent_display == CssDisplay::None || WhiteSpace::of(parent_kind).is_pre() {
        return true;
    }
    match next {
        None if parent_kind.is_document()
            || !parent_display.keeps_last_child_trailing_whitespace() =>
        {
            return false;
        }
        Some(next) if CssDisplay::of(tree.kind(next)).is_block_like() => return false,
        _ => {}
    }
    !CssDisplay::of(kind).is_block_like()
}
