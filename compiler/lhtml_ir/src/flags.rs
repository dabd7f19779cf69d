//! Pre-computed whitespace metadata flags.
//!
//! `NodeFlags` are computed once when the tree is finished, enabling O(1)
//! queries about boundary whitespace without looking at source text.
//!
//! Flags come in three groups:
//! - **Presence flags**: whitespace existed in the source at a boundary.
//! - **Sensitivity flags**: a renderer must not add or drop whitespace there.
//! - **Content flags**: how the node's own content treats whitespace.

use bitflags::bitflags;

bitflags! {
    /// Whitespace facts about a node's boundaries and content.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct NodeFlags: u16 {
        // === Presence Flags (bits 0-5) ===

        /// Whitespace precedes the node in the source.
        const HAS_LEADING_WHITESPACE = 1 << 0;
        /// Whitespace follows the node in the source.
        const HAS_TRAILING_WHITESPACE = 1 << 1;
        /// Whitespace sits between the open and close tags of a childless node.
        const HAS_DANGLING_WHITESPACE = 1 << 2;
        /// The whitespace before the node contains a line break.
        const HAS_LEADING_LINE_BREAK = 1 << 3;
        /// The whitespace after the node contains a line break.
        const HAS_TRAILING_LINE_BREAK = 1 << 4;
        /// The whitespace after the node contains an empty line.
        const HAS_TRAILING_BLANK_LINE = 1 << 5;

        // === Sensitivity Flags (bits 8-10) ===

        /// Whitespace before the node is meaningful.
        const LEADING_WHITESPACE_SENSITIVE = 1 << 8;
        /// Whitespace after the node is meaningful.
        const TRAILING_WHITESPACE_SENSITIVE = 1 << 9;
        /// Dangling whitespace of a childless node is meaningful.
        const DANGLING_WHITESPACE_SENSITIVE = 1 << 10;

        // === Content Flags (bits 12-13) ===

        /// Whitespace between the node's children carries meaning.
        const WHITESPACE_SENSITIVE = 1 << 12;
        /// The indentation column of the node's content is significant.
        const INDENTATION_SENSITIVE = 1 << 13;
    }
}

impl NodeFlags {
    /// Leading whitespace is present and must be kept.
    #[inline]
    pub const fn has_sensitive_leading_whitespace(self) -> bool {
        self.contains(Self::HAS_LEADING_WHITESPACE.union(Self::LEADING_WHITESPACE_SENSITIVE))
    }

    /// Trailing whitespace is present and must be kept.
    #[inline]
    pub const fn has_sensitive_trailing_whitespace(self) -> bool {
        self.contains(Self::HAS_TRAILING_WHITESPACE.union(Self::TRAILING_WHITESPACE_SENSITIVE))
    }

    /// Dangling whitespace is present and must be kept.
    #[inline]
    pub const fn has_sensitive_dangling_whitespace(self) -> bool {
        self.contains(Self::HAS_DANGLING_WHITESPACE.union(Self::DANGLING_WHITESPACE_SENSITIVE))
    }

    /// Content is both whitespace- and indentation-sensitive (`<pre>`-like).
    #[inline]
    pub const fn is_pre_formatted(self) -> bool {
        self.contains(Self::WHITESPACE_SENSITIVE.union(Self::INDENTATION_SENSITIVE))
    }
}

#[cfg(test)]
mod tests;
