//! Layout Documents
//!
//! A [`Doc`] describes output without committing to line breaks. Groups
//! print flat when they fit the remaining width and broken otherwise; lines
//! inside a group follow the group's decision. [`render`] turns a `Doc` into
//! text.
//!
//! # Combinators
//!
//! | Builder | Flat | Broken |
//! |---------|------|--------|
//! | [`Doc::line`] | `" "` | newline + indent |
//! | [`Doc::softline`] | nothing | newline + indent |
//! | [`Doc::hardline`] | always breaks | newline + indent |
//! | [`Doc::literal_line`] | always breaks | newline, no indent |
//!
//! [`GroupId`]s correlate a group with [`Doc::if_break`] docs elsewhere in
//! the tree, so a descendant can react to whether an ancestor broke.

mod render;

pub use render::render;

/// Correlation id for a group.
///
/// Compared by equality only. Minted by [`GroupIdGen`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u32);

/// Monotonic [`GroupId`] source for one formatting run.
#[derive(Debug, Default)]
pub struct GroupIdGen {
    next: u32,
}

impl GroupIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self) -> GroupId {
        let id = GroupId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Line flavours. See the table in the module docs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    Soft,
    Normal,
    Hard,
    Literal,
}

impl LineKind {
    /// Hard and literal lines break regardless of the enclosing group.
    #[inline]
    pub fn is_hard(self) -> bool {
        matches!(self, LineKind::Hard | LineKind::Literal)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group {
    pub contents: Box<Doc>,
    pub id: Option<GroupId>,
    /// Set when the group must break, either explicitly or because it
    /// contains a hard break.
    pub should_break: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IfBreak {
    pub break_contents: Box<Doc>,
    pub flat_contents: Box<Doc>,
    /// Group whose decision selects the branch; the enclosing group when `None`.
    pub group_id: Option<GroupId>,
}

/// Layout document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Doc {
    #[default]
    Nil,
    Text(String),
    Concat(Vec<Doc>),
    Group(Group),
    Indent(Box<Doc>),
    /// Contents use column zero as their indentation.
    DedentToRoot(Box<Doc>),
    Line(LineKind),
    /// Forces every enclosing group to break.
    BreakParent,
    IfBreak(IfBreak),
    /// Alternating content and separator docs, packed greedily.
    Fill(Vec<Doc>),
}

impl Doc {
    #[inline]
    pub fn nil() -> Doc {
        Doc::Nil
    }

    pub fn text(text: impl Into<String>) -> Doc {
        Doc::Text(text.into())
    }

    pub fn concat(parts: Vec<Doc>) -> Doc {
        Doc::Concat(parts)
    }

    #[inline]
    pub fn line() -> Doc {
        Doc::Line(LineKind::Normal)
    }

    #[inline]
    pub fn softline() -> Doc {
        Doc::Line(LineKind::Soft)
    }

    pub fn hardline() -> Doc {
        Doc::Concat(vec![Doc::Line(LineKind::Hard), Doc::BreakParent])
    }

    pub fn literal_line() -> Doc {
        Doc::Concat(vec![Doc::Line(LineKind::Literal), Doc::BreakParent])
    }

    #[inline]
    pub fn break_parent() -> Doc {
        Doc::BreakParent
    }

    /// `break_contents` when the group broke, `flat_contents` otherwise.
    pub fn if_break(break_contents: Doc, flat_contents: Doc, group_id: Option<GroupId>) -> Doc {
        Doc::IfBreak(IfBreak {
            break_contents: Box::new(break_contents),
            flat_contents: Box::new(flat_contents),
            group_id,
        })
    }

    /// Pack `parts` (content, separator, content, ...) onto as few lines as fit.
    pub fn fill(parts: Vec<Doc>) -> Doc {
        Doc::Fill(parts)
    }

    /// Interleave `separator` between `docs`.
    pub fn join(separator: &Doc, docs: impl IntoIterator<Item = Doc>) -> Vec<Doc> {
        let mut out = Vec::new();
        for (i, doc) in docs.into_iter().enumerate() {
            if i > 0 {
                out.push(separator.clone());
            }
            out.push(doc);
        }
        out
    }

    /// Split `text` on line terminators and join the pieces with literal lines.
    ///
    /// `\r\n` and lone `\r` count as terminators. The pieces are emitted
    /// without re-indentation.
    pub fn replace_end_of_line(text: &str) -> Doc {
        Self::replace_end_of_line_with(text, &Doc::literal_line())
    }

    /// Like [`Doc::replace_end_of_line`], joining with `separator`.
    pub fn replace_end_of_line_with(text: &str, separator: &Doc) -> Doc {
        let normalized = if text.contains('\r') {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text.to_string()
        };
        Doc::Concat(Doc::join(
            separator,
            normalized.split('\n').map(Doc::text),
        ))
    }

    /// Wrap in a group.
    #[must_use]
    pub fn group(self) -> Doc {
        Doc::Group(Group {
            contents: Box::new(self),
            id: None,
            should_break: false,
        })
    }

    /// Wrap in a group that other docs can refer to by `id`.
    #[must_use]
    pub fn group_with_id(self, id: GroupId) -> Doc {
        Doc::Group(Group {
            contents: Box::new(self),
            id: Some(id),
            should_break: false,
        })
    }

    /// Increase indentation by one level for lines inside.
    #[must_use]
    pub fn indent(self) -> Doc {
        Doc::Indent(Box::new(self))
    }

    /// Reset indentation to column zero for lines inside.
    #[must_use]
    pub fn dedent_to_root(self) -> Doc {
        Doc::DedentToRoot(Box::new(self))
    }
}
