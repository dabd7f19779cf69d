//! Structural predicates over the node tree.
//!
//! Every function here is total and pure: it reads the pre-computed flags
//! and kinds of the tree and never fails. An unusual flag combination just
//! answers `false`.

use lhtml_ir::{CssDisplay, NodeFlags, NodeId, NodeKind, NodeTree, WhiteSpace};

use crate::context::FormatConfig;

/// Text and comments: nodes whose boundaries are printed as plain text.
#[inline]
pub fn is_text_like(tree: &NodeTree, id: NodeId) -> bool {
    let kind = tree.kind(id);
    kind.is_text() || kind.is_comment()
}

/// Elements whose default `white-space` keeps source whitespace.
pub fn is_pre_like(tree: &NodeTree, id: NodeId) -> bool {
    WhiteSpace::of(tree.kind(id)).is_pre()
}

/// Follow last children down to a leaf. Void elements count as leaves.
pub fn last_descendant(tree: &NodeTree, id: NodeId) -> NodeId {
    let mut current = id;
    while !has_no_close_marker(tree, current) {
        let Some(last) = tree.last_child(current) else {
            break;
        };
        current = last;
    }
    current
}

/// Whether the element has no separate closing tag (void or self-closing).
pub fn has_no_close_marker(tree: &NodeTree, id: NodeId) -> bool {
    tree.kind(id)
        .element()
        .is_some_and(lhtml_ir::Element::has_no_close_marker)
}

/// Whether the element's content must be printed exactly as in the source.
///
/// True for elements listed in [`FormatConfig::preserve_tags`], and for
/// `<pre>`-like elements holding anything other than text and Liquid drops.
pub fn should_preserve_content(tree: &NodeTree, id: NodeId, config: &FormatConfig) -> bool {
    let Some(element) = tree.kind(id).element() else {
        return false;
    };
    if config.preserves(&element.name) {
        return true;
    }
    is_pre_like(tree, id)
        && tree.children(id).iter().any(|&child| {
            !matches!(
                tree.kind(child),
                NodeKind::Text { .. } | NodeKind::LiquidDrop(_)
            )
        })
}

/// Children always go on their own lines.
pub fn force_break_children(tree: &NodeTree, id: NodeId) -> bool {
    let kind = tree.kind(id);
    if kind.element().is_none() || tree.children(id).is_empty() {
        return false;
    }
    if ["html", "head", "ul", "ol", "select"]
        .iter()
        .any(|name| kind.is_element_named(name))
    {
        return true;
    }
    CssDisplay::of(kind) == CssDisplay::Table
}

/// The element's content breaks onto its own lines regardless of width.
pub fn force_break_content(tree: &NodeTree, id: NodeId) -> bool {
    if force_break_children(tree, id) {
        return true;
    }
    let kind = tree.kind(id);
    let children = tree.children(id);
    if kind.element().is_some() && !children.is_empty() {
        if ["body", "script", "style"]
            .iter()
            .any(|name| kind.is_element_named(name))
        {
            return true;
        }
        if children.iter().any(|&child| has_non_text_child(tree, child)) {
            return true;
        }
    }
    match children {
        [only] if !tree.kind(*only).is_text() => {
            let flags = tree.flags(*only);
            flags.contains(NodeFlags::HAS_LEADING_LINE_BREAK)
                && (!flags.contains(NodeFlags::TRAILING_WHITESPACE_SENSITIVE)
                    || flags.contains(NodeFlags::HAS_TRAILING_LINE_BREAK))
        }
        _ => false,
    }
}

fn has_non_text_child(tree: &NodeTree, id: NodeId) -> bool {
    tree.children(id)
        .iter()
        .any(|&child| !tree.kind(child).is_text())
}

/// Number of nodes from `id` upwards whose parent exists and is not the
/// document root.
pub fn count_parents(tree: &NodeTree, id: NodeId) -> usize {
    std::iter::once(id)
        .chain(tree.ancestors(id))
        .filter(|&node| {
            tree.parent(node)
                .is_some_and(|parent| !tree.kind(parent).is_document())
        })
        .count()
}

/// Whether `value` ends with a line break followed by exactly one level of
/// indentation per enclosing element of `id`.
///
/// Only the last `tab_width * depth + 1` bytes are examined.
pub fn ends_in_properly_indented_empty_line(
    tree: &NodeTree,
    id: NodeId,
    value: &str,
    tab_width: usize,
) -> bool {
    let Some(tail) = tab_width
        .checked_mul(count_parents(tree, id))
        .and_then(|indent| indent.checked_add(1))
    else {
        return false;
    };
    let bytes = value.as_bytes();
    let Some(newline_at) = bytes.len().checked_sub(tail) else {
        return false;
    };
    bytes[newline_at] == b'\n'
        && bytes[newline_at + 1..]
            .iter()
            .all(|&b| b == b' ' || b == b'\t')
}
