//! Element layout.
//!
//! Every element takes exactly one of four layouts, decided up front by
//! [`ElementLayout::classify`]:
//!
//! | Layout | When | Shape |
//! |--------|------|-------|
//! | `Void` | no closing tag | opening tag, final marker |
//! | `Verbatim` | raw or preserved content | tags around the source text |
//! | `Empty` | no children | tags around dangling whitespace |
//! | `General` | otherwise | tags around indented children |
//!
//! The general layout wraps the opening tag in an attribute group and the
//! whole element in an element group. Children receive the element group's
//! id so they can react to it breaking.

use lhtml_ir::{NodeId, NodeKind, NodeTree};

use super::tag::{
    get_node_content, needs_to_borrow_last_child_closing_tag_end_marker,
    needs_to_borrow_prev_closing_tag_end_marker, print_closing_tag, print_closing_tag_suffix,
    print_opening_tag, print_opening_tag_body, print_opening_tag_prefix,
};
use super::{PrintArgs, Printer};
use crate::context::FormatConfig;
use crate::doc::{Doc, GroupId};
use crate::predicates::{
    ends_in_properly_indented_empty_line, force_break_content, has_no_close_marker,
    should_preserve_content,
};

/// The layout an element is printed with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementLayout {
    /// Void or self-closing: children are never consulted.
    Void,
    /// Raw or preserved: the content is copied from the source.
    Verbatim,
    /// No children.
    Empty,
    /// Children laid out between the tags.
    General { first: NodeId, last: NodeId },
}

impl ElementLayout {
    /// Pick the layout for `id`. The first matching rule wins.
    pub fn classify(tree: &NodeTree, id: NodeId, config: &FormatConfig) -> Self {
        if has_no_close_marker(tree, id) {
            return ElementLayout::Void;
        }
        if should_preserve_content(tree, id, config)
            || matches!(tree.kind(id), NodeKind::RawElement(_))
        {
            return ElementLayout::Verbatim;
        }
        match (tree.first_child(id), tree.last_child(id)) {
            (Some(first), Some(last)) => ElementLayout::General { first, last },
            _ => ElementLayout::Empty,
        }
    }
}

/// Line between the opening tag and the first child.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LeadingLine {
    /// Significant whitespace: a space when flat.
    Line,
    /// Pre-formatted text follows: break to column zero.
    DedentedSoftline,
    Softline,
}

impl LeadingLine {
    fn of(tree: &NodeTree, id: NodeId, first: NodeId) -> Self {
        if tree.flags(first).has_sensitive_leading_whitespace() {
            LeadingLine::Line
        } else if tree.kind(first).is_text() && tree.flags(id).is_pre_formatted() {
            LeadingLine::DedentedSoftline
        } else {
            LeadingLine::Softline
        }
    }

    fn to_doc(self) -> Doc {
        match self {
            LeadingLine::Line => Doc::line(),
            LeadingLine::DedentedSoftline => Doc::softline().dedent_to_root(),
            LeadingLine::Softline => Doc::softline(),
        }
    }
}

/// Line between the last child and the closing tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TrailingLine {
    /// A neighbour prints the closing marker; keep the significant space.
    BorrowedSpace,
    /// A neighbour prints the closing marker and owns the boundary.
    Borrowed,
    /// Significant whitespace: a space when flat.
    Line,
    /// The content already ends on a correctly indented empty line.
    IndentedEmptyLine,
    Softline,
}

impl TrailingLine {
    fn of(tree: &NodeTree, id: NodeId, last: NodeId, tab_width: usize) -> Self {
        let needs_to_borrow = match tree.next(id) {
            Some(next) => needs_to_borrow_prev_closing_tag_end_marker(tree, next),
            None => tree
                .parent(id)
                .is_some_and(|parent| needs_to_borrow_last_child_closing_tag_end_marker(tree, parent)),
        };
        let sensitive = tree.flags(last).has_sensitive_trailing_whitespace();
        if needs_to_borrow {
            return if sensitive {
                TrailingLine::BorrowedSpace
            } else {
                TrailingLine::Borrowed
            };
        }
        if sensitive {
            return TrailingLine::Line;
        }
        let already_indented = match tree.kind(last) {
            NodeKind::Comment { body } => {
                ends_in_properly_indented_empty_line(tree, id, body, tab_width)
            }
            NodeKind::Text { value } if tree.flags(id).is_pre_formatted() => {
                ends_in_properly_indented_empty_line(tree, id, value, tab_width)
            }
            _ => false,
        };
        if already_indented {
            TrailingLine::IndentedEmptyLine
        } else {
            TrailingLine::Softline
        }
    }

    fn to_doc(self) -> Doc {
        match self {
            TrailingLine::BorrowedSpace => Doc::text(" "),
            TrailingLine::Borrowed | TrailingLine::IndentedEmptyLine => Doc::nil(),
            TrailingLine::Line => Doc::line(),
            TrailingLine::Softline => Doc::softline(),
        }
    }
}

impl Printer<'_> {
    #[tracing::instrument(level = "trace", skip(self))]
    pub(super) fn print_element(&mut self, id: NodeId) -> Doc {
        let tree = self.ctx.tree();
        let config = self.ctx.config();
        let layout = ElementLayout::classify(tree, id, config);
        tracing::debug!(?layout, name = ?tree.kind(id).name(), "element layout");

        match layout {
            ElementLayout::Void => Doc::concat(vec![
                print_opening_tag(tree, id).group(),
                print_closing_tag(tree, id),
                print_closing_tag_suffix(tree, id),
            ]),
            ElementLayout::Verbatim => Doc::concat(vec![
                print_opening_tag_prefix(tree, id),
                print_opening_tag_body(tree, id).group(),
                Doc::replace_end_of_line(get_node_content(tree, id)),
                print_closing_tag(tree, id),
                print_closing_tag_suffix(tree, id),
            ]),
            ElementLayout::Empty => {
                let groups = self.mint_tag_groups();
                let slot = if tree.flags(id).has_sensitive_dangling_whitespace() {
                    Doc::line()
                } else {
                    Doc::nil()
                };
                print_tag(tree, id, slot, groups)
            }
            ElementLayout::General { first, last } => {
                let groups = self.mint_tag_groups();
                let leading = LeadingLine::of(tree, id, first);
                let trailing = TrailingLine::of(tree, id, last, config.tab_width);
                let force_break = force_break_content(tree, id);
                tracing::trace!(?leading, ?trailing, force_break, "element lines");

                let children = self.print_children(id, PrintArgs::both(groups.element));
                let slot = Doc::concat(vec![
                    if force_break {
                        Doc::break_parent()
                    } else {
                        Doc::nil()
                    },
                    Doc::concat(vec![leading.to_doc(), children]).indent(),
                    trailing.to_doc(),
                ]);
                print_tag(tree, id, slot, groups)
            }
        }
    }

    fn mint_tag_groups(&mut self) -> TagGroups {
        TagGroups {
            attrs: self.ctx.mint_group_id(),
            element: self.ctx.mint_group_id(),
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct TagGroups {
    attrs: GroupId,
    element: GroupId,
}

/// `group([group(opening tag), slot, closing tag])`.
fn print_tag(tree: &NodeTree, id: NodeId, slot: Doc, groups: TagGroups) -> Doc {
    Doc::concat(vec![
        print_opening_tag(tree, id).group_with_id(groups.attrs),
        slot,
        print_closing_tag(tree, id),
        print_closing_tag_suffix(tree, id),
    ])
    .group_with_id(groups.element)
}
