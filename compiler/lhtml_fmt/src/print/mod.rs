//! Node printers.
//!
//! [`Printer`] walks the tree once, turning each node into a [`Doc`]. Elements
//! go through the layout engine in [`element`]; their children through
//! [`children`]; tag markers and the borrowing rules live in [`tag`].

mod children;
mod element;
pub mod tag;

pub use element::ElementLayout;

use lhtml_ir::{LiquidDrop, NodeFlags, NodeId, NodeKind, NodeTree};

use crate::context::{ConfigError, FormatConfig, FormatContext};
use crate::doc::{render, Doc, GroupId};
use tag::{print_closing_tag_suffix, print_opening_tag_prefix};

/// Group handles a parent passes down to a child.
///
/// A child whose boundary whitespace is significant can ask whether the
/// group holding the line next to it broke, and strip the whitespace the
/// break introduced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrintArgs {
    /// Group holding the line before the child.
    pub leading_space_group_id: Option<GroupId>,
    /// Group holding the line after the child.
    pub trailing_space_group_id: Option<GroupId>,
}

impl PrintArgs {
    /// Both sides governed by the same group.
    pub fn both(group_id: GroupId) -> Self {
        PrintArgs {
            leading_space_group_id: Some(group_id),
            trailing_space_group_id: Some(group_id),
        }
    }
}

/// Recursive printer for one formatting run.
pub struct Printer<'a> {
    ctx: FormatContext<'a>,
}

impl<'a> Printer<'a> {
    pub fn new(tree: &'a NodeTree, config: &'a FormatConfig) -> Self {
        Printer {
            ctx: FormatContext::new(tree, config),
        }
    }

    /// Print one node and, through it, its subtree.
    pub fn print_node(&mut self, id: NodeId, args: PrintArgs) -> Doc {
        let tree = self.ctx.tree();
        match tree.kind(id) {
            NodeKind::Document => self.print_document(id),
            NodeKind::Element(_) | NodeKind::RawElement(_) => self.print_element(id),
            NodeKind::Text { value } => print_text(tree, id, value),
            NodeKind::Comment { body } => print_comment(tree, id, body),
            NodeKind::LiquidDrop(drop) => print_liquid_drop(tree, id, drop, args),
        }
    }

    fn print_document(&mut self, id: NodeId) -> Doc {
        if self.ctx.tree().children(id).is_empty() {
            return Doc::nil();
        }
        let children = self.print_children(id, PrintArgs::default());
        Doc::concat(vec![children.group(), Doc::hardline()])
    }
}

/// Build the layout document for a whole tree.
pub fn print_doc(tree: &NodeTree, config: &FormatConfig) -> Doc {
    Printer::new(tree, config).print_node(tree.root(), PrintArgs::default())
}

/// Format a whole tree to text.
///
/// # Errors
/// Returns [`ConfigError`] when `config` fails validation.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = tree.len(), width = config.print_width))]
pub fn format_document(tree: &NodeTree, config: &FormatConfig) -> Result<String, ConfigError> {
    config.validate()?;
    let doc = print_doc(tree, config);
    let output = render(&doc, config);
    tracing::debug!(bytes = output.len(), "formatted document");
    Ok(output)
}

fn print_text(tree: &NodeTree, id: NodeId, value: &str) -> Doc {
    let prefix = print_opening_tag_prefix(tree, id);
    let suffix = print_closing_tag_suffix(tree, id);
    let parent_flags = tree.parent(id).map(|p| tree.flags(p)).unwrap_or_default();

    if parent_flags.contains(NodeFlags::WHITESPACE_SENSITIVE) {
        let body = if parent_flags.contains(NodeFlags::INDENTATION_SENSITIVE) {
            Doc::replace_end_of_line(value)
        } else {
            Doc::replace_end_of_line_with(&dedent(value), &Doc::hardline())
        };
        return Doc::concat(vec![prefix, body, suffix]);
    }

    let mut words: Vec<Doc> = value
        .split(is_html_whitespace)
        .filter(|word| !word.is_empty())
        .map(Doc::text)
        .collect();
    if words.is_empty() {
        return Doc::concat(vec![prefix, suffix]);
    }
    if let Some(first) = words.first_mut() {
        *first = Doc::concat(vec![prefix, std::mem::take(first)]);
    }
    if let Some(last) = words.last_mut() {
        *last = Doc::concat(vec![std::mem::take(last), suffix]);
    }
    Doc::fill(Doc::join(&Doc::line(), words))
}

fn print_comment(tree: &NodeTree, id: NodeId, body: &str) -> Doc {
    Doc::concat(vec![
        print_opening_tag_prefix(tree, id),
        Doc::text("<!--"),
        Doc::replace_end_of_line(body),
        Doc::text("-->"),
        print_closing_tag_suffix(tree, id),
    ])
}

/// `{{ markup }}` with `-` trim markers.
///
/// Where the drop touches a neighbour without whitespace, a `-` appears only
/// if the group holding the line next to it breaks, stripping the newline
/// the break introduced.
fn print_liquid_drop(tree: &NodeTree, id: NodeId, drop: &LiquidDrop, args: PrintArgs) -> Doc {
    let flags = tree.flags(id);
    let strip_leading = flags.contains(NodeFlags::LEADING_WHITESPACE_SENSITIVE)
        && !flags.contains(NodeFlags::HAS_LEADING_WHITESPACE);
    let strip_trailing = flags.contains(NodeFlags::TRAILING_WHITESPACE_SENSITIVE)
        && !flags.contains(NodeFlags::HAS_TRAILING_WHITESPACE);

    Doc::concat(vec![
        Doc::text("{{"),
        trim_marker(drop.trim_start, strip_leading, args.leading_space_group_id),
        Doc::text(" "),
        Doc::text(drop.markup.trim()),
        Doc::text(" "),
        trim_marker(drop.trim_end, strip_trailing, args.trailing_space_group_id),
        Doc::text("}}"),
    ])
    .group()
}

fn trim_marker(written: bool, strip_on_break: bool, group_id: Option<GroupId>) -> Doc {
    if written {
        return Doc::text("-");
    }
    match group_id {
        Some(id) if strip_on_break => Doc::if_break(Doc::text("-"), Doc::nil(), Some(id)),
        _ => Doc::nil(),
    }
}

#[inline]
fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Drop blank leading lines and trailing whitespace, then remove the
/// indentation common to every non-blank line.
fn dedent(value: &str) -> String {
    let trimmed = value.trim_end();
    let start = trimmed
        .char_indices()
        .take_while(|&(_, c)| is_html_whitespace(c))
        .filter(|&(_, c)| c == '\n')
        .last()
        .map_or(0, |(i, _)| i + 1);
    let body = &trimmed[start..];

    let min_indent = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    body.lines()
        .map(|line| line.get(min_indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests;
