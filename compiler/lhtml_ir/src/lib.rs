//! Liquid HTML IR - Node Arena
//!
//! This crate contains the tree the formatter lays out:
//! - [`NodeId`] indices into a flat [`NodeTree`] arena
//! - [`NodeKind`] for the closed set of node shapes
//! - [`NodeFlags`] for the pre-computed whitespace metadata
//! - [`NodeTreeBuilder`] for constructing trees together with their source text
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: parent, sibling and child links are `NodeId`s, never
//!   references, so back-pointers cannot form ownership cycles.
//! - **Compute Once**: whitespace sensitivity is decided when the tree is finished
//!   and is read-only afterwards. The formatter never mutates nodes.

mod builder;
mod display;
mod flags;
mod kind;
mod node_id;
mod span;
mod tree;

pub use builder::{NodeTreeBuilder, TreeError};
pub use display::{CssDisplay, WhiteSpace};
pub use flags::NodeFlags;
pub use kind::{Attr, ClosingKind, Element, LiquidDrop, NodeKind};
pub use node_id::NodeId;
pub use span::Span;
pub use tree::{Ancestors, Node, NodeTree};
