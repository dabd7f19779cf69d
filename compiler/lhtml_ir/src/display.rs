//! Default CSS `display` and `white-space` values per tag.
//!
//! Whitespace sensitivity is derived from how a browser would render an
//! element by default: whitespace next to a block box is insignificant,
//! whitespace next to an inline box is not.

use crate::NodeKind;

/// Default `display` of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CssDisplay {
    Inline,
    InlineBlock,
    Block,
    ListItem,
    /// `table` and every `table-*` value except `table-cell`.
    Table,
    TableCell,
    None,
}

impl CssDisplay {
    /// Default display for a node kind.
    pub fn of(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Element(el) | NodeKind::RawElement(el) => {
                Self::for_tag(&el.name.to_ascii_lowercase())
            }
            NodeKind::Comment { .. } => CssDisplay::Block,
            NodeKind::Document => CssDisplay::Block,
            NodeKind::Text { .. } | NodeKind::LiquidDrop(_) => CssDisplay::Inline,
        }
    }

    /// Default display for a lowercase tag name.
    pub fn for_tag(name: &str) -> Self {
        match name {
            "html" | "body" | "address" | "blockquote" | "center" | "div" | "figure"
            | "figcaption" | "footer" | "form" | "header" | "hr" | "legend" | "listing"
            | "main" | "p" | "plaintext" | "pre" | "xmp" | "search" | "article" | "aside"
            | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "hgroup" | "nav" | "section" | "dir"
            | "dd" | "dl" | "dt" | "menu" | "ol" | "ul" | "fieldset" | "details" | "summary"
            | "dialog" | "option" | "optgroup" | "source" | "track" | "script" | "param" => {
                CssDisplay::Block
            }
            "li" => CssDisplay::ListItem,
            "table" | "caption" | "colgroup" | "col" | "thead" | "tbody" | "tfoot" | "tr" => {
                CssDisplay::Table
            }
            "td" | "th" => CssDisplay::TableCell,
            "button" | "meter" | "progress" | "object" | "video" | "audio" | "select"
            | "textarea" | "input" | "img" => CssDisplay::InlineBlock,
            "head" | "link" | "meta" | "style" | "title" | "base" | "basefont" | "datalist"
            | "noembed" | "noframes" | "rp" | "area" => CssDisplay::None,
            _ => CssDisplay::Inline,
        }
    }

    /// Block-level boxes swallow whitespace on both sides.
    #[inline]
    pub fn is_block_like(self) -> bool {
        matches!(
            self,
            CssDisplay::Block | CssDisplay::ListItem | CssDisplay::Table | CssDisplay::TableCell
        )
    }

    /// Whitespace before a first child is kept inside a box of this display.
    #[inline]
    pub fn keeps_first_child_leading_whitespace(self) -> bool {
        !self.is_block_like() && self != CssDisplay::InlineBlock
    }

    /// Whitespace after a last child is kept inside a box of this display.
    #[inline]
    pub fn keeps_last_child_trailing_whitespace(self) -> bool {
        self.keeps_first_child_leading_whitespace()
    }

    /// Whitespace between open and close tag of an empty box is kept.
    #[inline]
    pub fn keeps_dangling_whitespace(self) -> bool {
        self.keeps_first_child_leading_whitespace()
    }
}

/// Default `white-space` of an element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WhiteSpace {
    #[default]
    Normal,
    NoWrap,
    Pre,
    PreWrap,
}

impl WhiteSpace {
    /// Default white-space for a lowercase tag name.
    pub fn for_tag(name: &str) -> Self {
        match name {
            "pre" | "listing" | "xmp" => WhiteSpace::Pre,
            "textarea" | "plaintext" => WhiteSpace::PreWrap,
            "nobr" => WhiteSpace::NoWrap,
            _ => WhiteSpace::Normal,
        }
    }

    /// Default white-space for a node kind. Non-elements are `normal`.
    pub fn of(kind: &NodeKind) -> Self {
        kind.name()
            .map_or(WhiteSpace::Normal, |name| {
                Self::for_tag(&name.to_ascii_lowercase())
            })
    }

    /// `pre` and `pre-wrap` keep source whitespace and indentation.
    #[inline]
    pub fn is_pre(self) -> bool {
        matches!(self, WhiteSpace::Pre | WhiteSpace::PreWrap)
    }
}
