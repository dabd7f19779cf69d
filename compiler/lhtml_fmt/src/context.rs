//! Formatting Context
//!
//! [`FormatConfig`] holds the options that shape output. [`FormatContext`]
//! is the per-run state threaded through every print function: the tree
//! being printed, the config, and the generator for group correlation ids.

use lhtml_ir::NodeTree;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::doc::{GroupId, GroupIdGen};

/// Default maximum line width before breaking.
pub const DEFAULT_PRINT_WIDTH: usize = 80;

/// Default spaces per indentation level.
pub const DEFAULT_TAB_WIDTH: usize = 2;

/// Line terminator written for every line break.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
    Cr,
}

impl LineEnding {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("print width must be greater than zero")]
    ZeroPrintWidth,

    #[error("tab width {tab_width} leaves no room within print width {print_width}")]
    TabWidthTooLarge { tab_width: usize, print_width: usize },
}

/// Configuration for the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Column budget a group must fit in to print flat.
    pub print_width: usize,

    /// Spaces per indentation level.
    pub tab_width: usize,

    pub end_of_line: LineEnding,

    /// Lowercase names of elements whose content is printed verbatim.
    pub preserve_tags: FxHashSet<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            print_width: DEFAULT_PRINT_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            end_of_line: LineEnding::Lf,
            preserve_tags: FxHashSet::default(),
        }
    }
}

impl FormatConfig {
    /// Create a config with the specified print width.
    pub fn with_print_width(print_width: usize) -> Self {
        Self {
            print_width,
            ..Default::default()
        }
    }

    /// Create a config with the specified tab width.
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            tab_width,
            ..Default::default()
        }
    }

    /// Use `end_of_line` for every line break.
    #[must_use]
    pub fn end_of_line(mut self, end_of_line: LineEnding) -> Self {
        self.end_of_line = end_of_line;
        self
    }

    /// Print the content of `<name>` elements verbatim.
    #[must_use]
    pub fn preserve_tag(mut self, name: &str) -> Self {
        self.preserve_tags.insert(name.to_ascii_lowercase());
        self
    }

    /// Whether the content of `<name>` is configured as opaque.
    pub fn preserves(&self, name: &str) -> bool {
        self.preserve_tags.contains(&name.to_ascii_lowercase())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.print_width == 0 {
            return Err(ConfigError::ZeroPrintWidth);
        }
        if self.tab_width >= self.print_width {
            return Err(ConfigError::TabWidthTooLarge {
                tab_width: self.tab_width,
                print_width: self.print_width,
            });
        }
        Ok(())
    }
}

/// State shared by the print functions during one formatting run.
pub struct FormatContext<'a> {
    tree: &'a NodeTree,
    config: &'a FormatConfig,
    group_ids: GroupIdGen,
}

impl<'a> FormatContext<'a> {
    pub fn new(tree: &'a NodeTree, config: &'a FormatConfig) -> Self {
        Self {
            tree,
            config,
            group_ids: GroupIdGen::new(),
        }
    }

    /// The tree being printed.
    ///
    /// The returned reference is not tied to the borrow of `self`, so it can be
    /// held across calls that need `&mut self`.
    #[inline]
    pub fn tree(&self) -> &'a NodeTree {
        self.tree
    }

    #[inline]
    pub fn config(&self) -> &'a FormatConfig {
        self.config
    }

    /// Mint a fresh correlation id for a group.
    #[inline]
    pub fn mint_group_id(&mut self) -> GroupId {
        self.group_ids.mint()
    }
}
