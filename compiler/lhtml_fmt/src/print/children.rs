//! Children layout.
//!
//! Each child is printed in its own group. The line separating two siblings
//! is decided by [`BetweenLine::of`] and attached to whichever side keeps the
//! layout stable: text-like siblings carry it directly, element siblings wrap
//! it in their group so it breaks together with the element.

use lhtml_ir::{NodeFlags, NodeId, NodeTree};

use super::tag::{
    needs_to_borrow_next_opening_tag_start_marker, needs_to_borrow_parent_closing_tag_start_marker,
    needs_to_borrow_prev_closing_tag_end_marker,
};
use super::{PrintArgs, Printer};
use crate::doc::{Doc, GroupId};
use crate::predicates::{force_break_children, has_no_close_marker, is_text_like};

/// Separator between two adjacent siblings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BetweenLine {
    None,
    Hard,
    Line,
    Soft,
}

impl BetweenLine {
    fn of(tree: &NodeTree, prev: NodeId, next: NodeId) -> Self {
        if is_text_like(tree, prev) && is_text_like(tree, next) {
            let prev_flags = tree.flags(prev);
            if prev_flags.contains(NodeFlags::TRAILING_WHITESPACE_SENSITIVE) {
                if !prev_flags.contains(NodeFlags::HAS_TRAILING_WHITESPACE) {
                    return BetweenLine::None;
                }
                return if prefer_hardline_as_leading_spaces(tree, next) {
                    BetweenLine::Hard
                } else {
                    BetweenLine::Line
                };
            }
            return if prefer_hardline_as_leading_spaces(tree, next) {
                BetweenLine::Hard
            } else {
                BetweenLine::Soft
            };
        }

        let next_tag_is_substantial = tree.kind(next).element().is_some_and(|el| {
            !tree.children(next).is_empty() || has_no_close_marker(tree, next) || !el.attrs.is_empty()
        });
        if (needs_to_borrow_next_opening_tag_start_marker(tree, prev) && next_tag_is_substantial)
            || (has_no_close_marker(tree, prev)
                && needs_to_borrow_prev_closing_tag_end_marker(tree, next))
        {
            return BetweenLine::None;
        }

        let next_flags = tree.flags(next);
        if !next_flags.contains(NodeFlags::LEADING_WHITESPACE_SENSITIVE)
            || prefer_hardline_as_leading_spaces(tree, next)
            || borrows_across_nested_closing_tags(tree, prev, next)
        {
            BetweenLine::Hard
        } else if next_flags.contains(NodeFlags::HAS_LEADING_WHITESPACE) {
            BetweenLine::Line
        } else {
            BetweenLine::Soft
        }
    }

    fn to_doc(self) -> Doc {
        match self {
            BetweenLine::None => Doc::nil(),
            BetweenLine::Hard => Doc::hardline(),
            BetweenLine::Line => Doc::line(),
            BetweenLine::Soft => Doc::softline(),
        }
    }
}

/// `next` borrows the end of `prev`, whose last child and grandchild both
/// borrow their parents' closing markers: the chain only reads well when
/// `next` starts a new line.
fn borrows_across_nested_closing_tags(tree: &NodeTree, prev: NodeId, next: NodeId) -> bool {
    needs_to_borrow_prev_closing_tag_end_marker(tree, next)
        && tree.last_child(prev).is_some_and(|last| {
            needs_to_borrow_parent_closing_tag_start_marker(tree, last)
                && tree.last_child(last).is_some_and(|inner| {
                    needs_to_borrow_parent_closing_tag_start_marker(tree, inner)
                })
        })
}

fn prefer_hardline_as_surrounding_spaces(tree: &NodeTree, id: NodeId) -> bool {
    let kind = tree.kind(id);
    kind.is_comment() || kind.is_element_named("script") || kind.is_element_named("select")
}

fn has_surrounding_line_break(tree: &NodeTree, id: NodeId) -> bool {
    tree.flags(id)
        .contains(NodeFlags::HAS_LEADING_LINE_BREAK | NodeFlags::HAS_TRAILING_LINE_BREAK)
}

fn prefer_hardline_as_leading_spaces(tree: &NodeTree, id: NodeId) -> bool {
    prefer_hardline_as_surrounding_spaces(tree, id)
        || tree
            .prev(id)
            .is_some_and(|prev| prefer_hardline_as_trailing_spaces(tree, prev))
        || has_surrounding_line_break(tree, id)
}

fn prefer_hardline_as_trailing_spaces(tree: &NodeTree, id: NodeId) -> bool {
    prefer_hardline_as_surrounding_spaces(tree, id)
        || tree.kind(id).is_element_named("br")
        || has_surrounding_line_break(tree, id)
}

/// A blank line followed `id` in the source and should be kept.
fn force_next_empty_line(tree: &NodeTree, id: NodeId) -> bool {
    tree.next(id).is_some() && tree.flags(id).contains(NodeFlags::HAS_TRAILING_BLANK_LINE)
}

impl Printer<'_> {
    /// Print the children of `id`, separated according to their whitespace.
    ///
    /// `args` names the groups holding the lines before the first child and
    /// after the last child.
    pub(super) fn print_children(&mut self, id: NodeId, args: PrintArgs) -> Doc {
        let tree = self.ctx.tree();
        if force_break_children(tree, id) {
            return self.print_children_broken(id, args);
        }

        let children = tree.children(id);
        let mut parts = Vec::with_capacity(children.len());
        let mut prev_group_id: Option<GroupId> = None;

        for &child in children {
            let prev = tree.prev(child);
            let next = tree.next(child);

            if is_text_like(tree, child) {
                let printed = self.print_node(child, PrintArgs::default());
                match prev.filter(|&p| is_text_like(tree, p)) {
                    Some(prev) => match BetweenLine::of(tree, prev, child) {
                        BetweenLine::None => parts.push(printed),
                        _ if force_next_empty_line(tree, prev) => parts.push(Doc::concat(vec![
                            Doc::hardline(),
                            Doc::hardline(),
                            printed,
                        ])),
                        between => parts.push(Doc::concat(vec![between.to_doc(), printed])),
                    },
                    None => parts.push(printed),
                }
                prev_group_id = Some(self.ctx.mint_group_id());
                continue;
            }

            let mut prev_parts = Vec::new();
            let mut leading_parts = Vec::new();
            let mut trailing_parts = Vec::new();
            let mut next_parts = Vec::new();

            if let Some(prev) = prev {
                match BetweenLine::of(tree, prev, child) {
                    BetweenLine::None => {}
                    _ if force_next_empty_line(tree, prev) => {
                        prev_parts.extend([Doc::hardline(), Doc::hardline()]);
                    }
                    BetweenLine::Hard => prev_parts.push(Doc::hardline()),
                    between if is_text_like(tree, prev) => leading_parts.push(between.to_doc()),
                    _ => leading_parts.push(Doc::if_break(
                        Doc::nil(),
                        Doc::softline(),
                        prev_group_id,
                    )),
                }
            }
            if let Some(next) = next {
                let next_is_text_like = is_text_like(tree, next);
                match BetweenLine::of(tree, child, next) {
                    BetweenLine::None => {}
                    _ if force_next_empty_line(tree, child) => {
                        if next_is_text_like {
                            next_parts.extend([Doc::hardline(), Doc::hardline()]);
                        }
                    }
                    BetweenLine::Hard => {
                        if next_is_text_like {
                            next_parts.push(Doc::hardline());
                        }
                    }
                    between => trailing_parts.push(between.to_doc()),
                }
            }

            let leading_group_id = self.ctx.mint_group_id();
            let group_id = self.ctx.mint_group_id();
            let child_args = PrintArgs {
                leading_space_group_id: if prev.is_some() {
                    Some(leading_group_id)
                } else {
                    args.leading_space_group_id
                },
                trailing_space_group_id: if next.is_some() {
                    Some(group_id)
                } else {
                    args.trailing_space_group_id
                },
            };

            let mut inner = vec![self.print_node(child, child_args)];
            inner.extend(trailing_parts);
            leading_parts.push(Doc::concat(inner).group_with_id(group_id));

            parts.extend(prev_parts);
            parts.push(Doc::concat(leading_parts).group_with_id(leading_group_id));
            parts.extend(next_parts);
            prev_group_id = Some(group_id);
        }

        Doc::concat(parts)
    }

    /// Every child on its own line, keeping blank lines from the source.
    fn print_children_broken(&mut self, id: NodeId, args: PrintArgs) -> Doc {
        let tree = self.ctx.tree();
        let mut parts = vec![Doc::break_parent()];

        for &child in tree.children(id) {
            let leading = tree
                .prev(child)
                .map_or(BetweenLine::None, |prev| BetweenLine::of(tree, prev, child));
            let trailing = tree
                .next(child)
                .map_or(BetweenLine::None, |next| BetweenLine::of(tree, child, next));

            if let Some(prev) = tree.prev(child) {
                if leading != BetweenLine::None {
                    parts.push(leading.to_doc());
                    if force_next_empty_line(tree, prev) {
                        parts.push(Doc::hardline());
                    }
                }
            }

            let child_args = PrintArgs {
                leading_space_group_id: if tree.prev(child).is_none() || leading != BetweenLine::None {
                    args.leading_space_group_id
                } else {
                    None
                },
                trailing_space_group_id: if tree.next(child).is_none() || trailing != BetweenLine::None {
                    args.trailing_space_group_id
                } else {
                    None
                },
            };
            parts.push(self.print_node(child, child_args));
        }

        Doc::concat(parts)
    }
}

#[cfg(test)]
mod tests;
