//! Tag boundary printing.
//!
//! Whitespace-sensitive boundaries cannot take a line break, so when one has
//! to break the neighbouring tag marker moves across the break instead:
//!
//! ```text
//! <span
//!   ><b>bold</b
//!   >text</span
//! >
//! ```
//!
//! A node that *borrows* a marker prints it (in its prefix or suffix) and the
//! lender skips it. Each `needs_to_borrow_*` predicate is asked from the
//! borrower's side, so both neighbours agree on who prints the marker.
//!
//! Only elements lend markers. Liquid drops neither lend nor borrow; they
//! strip the whitespace a break introduces with `-` trim markers instead.

use lhtml_ir::{ClosingKind, NodeFlags, NodeId, NodeKind, NodeTree};

use crate::doc::Doc;
use crate::predicates::{has_no_close_marker, is_pre_like, is_text_like, last_descendant};

#[inline]
fn is_element(tree: &NodeTree, id: NodeId) -> bool {
    tree.kind(id).element().is_some()
}

#[inline]
fn is_drop(tree: &NodeTree, id: NodeId) -> bool {
    matches!(tree.kind(id), NodeKind::LiquidDrop(_))
}

fn is_self_closing(tree: &NodeTree, id: NodeId) -> bool {
    tree.kind(id)
        .element()
        .is_some_and(|el| el.closing == ClosingKind::SelfClosing)
}

// === Borrowing predicates ===

/// `node` prints the `>` that ends its previous sibling's closing tag.
///
/// ```text
/// <p></p
/// >123
/// ^
/// ```
pub fn needs_to_borrow_prev_closing_tag_end_marker(tree: &NodeTree, node: NodeId) -> bool {
    let Some(prev) = tree.prev(node) else {
        return false;
    };
    let flags = tree.flags(node);
    !is_drop(tree, node)
        && is_element(tree, prev)
        && flags.contains(NodeFlags::LEADING_WHITESPACE_SENSITIVE)
        && !flags.contains(NodeFlags::HAS_LEADING_WHITESPACE)
}

/// `node` prints the `>` that ends its last child's closing tag.
///
/// ```text
/// <p
///   ><a></a
///   ></p
///   ^
/// >
/// ```
pub fn needs_to_borrow_last_child_closing_tag_end_marker(tree: &NodeTree, node: NodeId) -> bool {
    let Some(last) = tree.last_child(node) else {
        return false;
    };
    let flags = tree.flags(last);
    is_element(tree, node)
        && is_element(tree, last)
        && flags.contains(NodeFlags::TRAILING_WHITESPACE_SENSITIVE)
        && !flags.contains(NodeFlags::HAS_TRAILING_WHITESPACE)
        && !is_text_like(tree, last_descendant(tree, last))
        && !is_pre_like(tree, node)
}

/// `node` prints the `</name` that starts its parent's closing tag.
///
/// ```text
/// <p>
///   123</p
///      ^^^
/// >
/// ```
pub fn needs_to_borrow_parent_closing_tag_start_marker(tree: &NodeTree, node: NodeId) -> bool {
    let flags = tree.flags(node);
    tree.next(node).is_none()
        && tree.parent(node).is_some_and(|parent| is_element(tree, parent))
        && !flags.contains(NodeFlags::HAS_TRAILING_WHITESPACE)
        && flags.contains(NodeFlags::TRAILING_WHITESPACE_SENSITIVE)
        && is_text_like(tree, last_descendant(tree, node))
}

/// `node` prints the `<name` that starts its next sibling's opening tag.
///
/// ```text
/// 123<p
///    ^^
/// >
/// ```
pub fn needs_to_borrow_next_opening_tag_start_marker(tree: &NodeTree, node: NodeId) -> bool {
    let Some(next) = tree.next(node) else {
        return false;
    };
    let flags = tree.flags(node);
    is_element(tree, next)
        && is_text_like(tree, node)
        && flags.contains(NodeFlags::TRAILING_WHITESPACE_SENSITIVE)
        && !flags.contains(NodeFlags::HAS_TRAILING_WHITESPACE)
}

/// `node` prints the `>` that ends its parent's opening tag.
///
/// ```text
/// <p
///   >123
///   ^
/// ```
pub fn needs_to_borrow_parent_opening_tag_end_marker(tree: &NodeTree, node: NodeId) -> bool {
    let flags = tree.flags(node);
    tree.prev(node).is_none()
        && !is_drop(tree, node)
        && tree.parent(node).is_some_and(|parent| is_element(tree, parent))
        && flags.contains(NodeFlags::LEADING_WHITESPACE_SENSITIVE)
        && !flags.contains(NodeFlags::HAS_LEADING_WHITESPACE)
}

// === Markers ===

pub fn print_opening_tag_start_marker(tree: &NodeTree, node: NodeId) -> String {
    tree.kind(node)
        .element()
        .map_or_else(String::new, |el| format!("<{}", el.name))
}

pub fn print_opening_tag_end_marker(tree: &NodeTree, node: NodeId) -> &'static str {
    if is_element(tree, node) && !has_no_close_marker(tree, node) {
        ">"
    } else {
        ""
    }
}

pub fn print_closing_tag_start_marker(tree: &NodeTree, node: NodeId) -> String {
    match tree.kind(node).element() {
        Some(el) if el.closing == ClosingKind::Normal => format!("</{}", el.name),
        _ => String::new(),
    }
}

pub fn print_closing_tag_end_marker(tree: &NodeTree, node: NodeId) -> &'static str {
    match tree.kind(node).element().map(|el| el.closing) {
        Some(ClosingKind::SelfClosing) => "/>",
        Some(ClosingKind::Normal | ClosingKind::Void) => ">",
        None => "",
    }
}

// === Prefix and suffix ===

/// Marker borrowed from the parent's opening tag or the previous sibling's
/// closing tag, printed in front of `node`.
pub fn print_opening_tag_prefix(tree: &NodeTree, node: NodeId) -> Doc {
    if needs_to_borrow_parent_opening_tag_end_marker(tree, node) {
        if let Some(parent) = tree.parent(node) {
            return Doc::text(print_opening_tag_end_marker(tree, parent));
        }
    }
    if needs_to_borrow_prev_closing_tag_end_marker(tree, node) {
        if let Some(prev) = tree.prev(node) {
            return Doc::text(print_closing_tag_end_marker(tree, prev));
        }
    }
    Doc::nil()
}

/// Marker borrowed from the parent's closing tag or the next sibling's
/// opening tag, printed after `node`.
pub fn print_closing_tag_suffix(tree: &NodeTree, node: NodeId) -> Doc {
    if needs_to_borrow_parent_closing_tag_start_marker(tree, node) {
        if let Some(parent) = tree.parent(node) {
            return Doc::text(print_closing_tag_start_marker(tree, parent));
        }
    }
    if needs_to_borrow_next_opening_tag_start_marker(tree, node) {
        if let Some(next) = tree.next(node) {
            return Doc::text(print_opening_tag_start_marker(tree, next));
        }
    }
    Doc::nil()
}

/// Marker borrowed from the last child, printed before the closing tag.
fn print_closing_tag_prefix(tree: &NodeTree, node: NodeId) -> Doc {
    if needs_to_borrow_last_child_closing_tag_end_marker(tree, node) {
        if let Some(last) = tree.last_child(node) {
            return Doc::text(print_closing_tag_end_marker(tree, last));
        }
    }
    Doc::nil()
}

// === Opening tag ===

/// Prefix, `<name`, attributes and `>`, each omitted when borrowed.
pub fn print_opening_tag(tree: &NodeTree, node: NodeId) -> Doc {
    Doc::concat(vec![
        print_opening_tag_prefix(tree, node),
        print_opening_tag_body(tree, node),
    ])
}

/// [`print_opening_tag`] without the prefix.
///
/// Void and self-closing elements stop after the attributes; their final
/// marker comes from [`print_closing_tag`].
pub fn print_opening_tag_body(tree: &NodeTree, node: NodeId) -> Doc {
    let start = match tree.prev(node) {
        Some(prev) if needs_to_borrow_next_opening_tag_start_marker(tree, prev) => Doc::nil(),
        _ => Doc::text(print_opening_tag_start_marker(tree, node)),
    };
    let end = if has_no_close_marker(tree, node) || first_child_borrows_opening_end(tree, node) {
        Doc::nil()
    } else {
        Doc::text(print_opening_tag_end_marker(tree, node))
    };
    Doc::concat(vec![start, print_attributes(tree, node), end])
}

fn first_child_borrows_opening_end(tree: &NodeTree, node: NodeId) -> bool {
    !has_no_close_marker(tree, node)
        && tree
            .first_child(node)
            .is_some_and(|first| needs_to_borrow_parent_opening_tag_end_marker(tree, first))
}

/// Attributes, indented and separated by `line`.
///
/// The trailing line before the end marker collapses to nothing (`>`) or a
/// space (`/>`) when the group stays flat. It is dropped when the end marker
/// itself was borrowed, since the borrower's line already separates them.
fn print_attributes(tree: &NodeTree, node: NodeId) -> Doc {
    let Some(element) = tree.kind(node).element() else {
        return Doc::nil();
    };
    let self_closing = is_self_closing(tree, node);
    if element.attrs.is_empty() {
        return if self_closing { Doc::text(" ") } else { Doc::nil() };
    }

    let attrs = element.attrs.iter().map(|attr| match &attr.value {
        Some(value) => Doc::text(format!("{}=\"{}\"", attr.name, value)),
        None => Doc::text(attr.name.clone()),
    });
    let mut indented = vec![Doc::line()];
    indented.extend(Doc::join(&Doc::line(), attrs));

    let end_borrowed = first_child_borrows_opening_end(tree, node)
        || (has_no_close_marker(tree, node)
            && tree.parent(node).is_some_and(|parent| {
                needs_to_borrow_last_child_closing_tag_end_marker(tree, parent)
            }));
    let tail = match (end_borrowed, self_closing) {
        (true, true) => Doc::text(" "),
        (true, false) => Doc::nil(),
        (false, true) => Doc::line(),
        (false, false) => Doc::softline(),
    };
    Doc::concat(vec![Doc::concat(indented).indent(), tail])
}

// === Closing tag ===

/// Closing prefix, `</name` and the final `>`, each omitted when borrowed.
///
/// The closing suffix is printed separately by [`print_closing_tag_suffix`].
pub fn print_closing_tag(tree: &NodeTree, node: NodeId) -> Doc {
    let start = if has_no_close_marker(tree, node) {
        Doc::nil()
    } else {
        let last_borrows = tree
            .last_child(node)
            .is_some_and(|last| needs_to_borrow_parent_closing_tag_start_marker(tree, last));
        if last_borrows {
            Doc::nil()
        } else {
            Doc::concat(vec![
                print_closing_tag_prefix(tree, node),
                Doc::text(print_closing_tag_start_marker(tree, node)),
            ])
        }
    };

    let end_borrowed = match tree.next(node) {
        Some(next) => needs_to_borrow_prev_closing_tag_end_marker(tree, next),
        None => tree
            .parent(node)
            .is_some_and(|parent| needs_to_borrow_last_child_closing_tag_end_marker(tree, parent)),
    };
    let end = if end_borrowed {
        Doc::nil()
    } else {
        Doc::text(print_closing_tag_end_marker(tree, node))
    };
    Doc::concat(vec![start, end])
}

/// Source between the tags of `node`, widened or narrowed by the markers
/// its children borrow so the verbatim text lines up with the printed tags.
pub fn get_node_content(tree: &NodeTree, node: NodeId) -> &str {
    let body = tree.get(node).body;
    let mut start = body.start as usize;
    let mut end = body.end as usize;

    if first_child_borrows_opening_end(tree, node) {
        start = start.saturating_sub(print_opening_tag_end_marker(tree, node).len());
    }
    let last_borrows_start = tree
        .last_child(node)
        .is_some_and(|last| needs_to_borrow_parent_closing_tag_start_marker(tree, last));
    if last_borrows_start {
        end += print_closing_tag_start_marker(tree, node).len();
    } else if needs_to_borrow_last_child_closing_tag_end_marker(tree, node) {
        if let Some(last) = tree.last_child(node) {
            end = end.saturating_sub(print_closing_tag_end_marker(tree, last).len());
        }
    }
    tree.source().get(start..end).unwrap_or_default()
}
