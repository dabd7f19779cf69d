//! Liquid HTML Formatter - Element Layout
//!
//! Turns a [`lhtml_ir::NodeTree`] into a layout [`Doc`] and renders it.
//!
//! # Architecture
//!
//! Formatting runs in two passes:
//!
//! 1. **Print Pass**: [`Printer`] walks the tree once and builds a [`Doc`].
//!    Each element picks an [`ElementLayout`]; tag markers move across
//!    whitespace-sensitive boundaries according to the rules in [`print::tag`].
//! 2. **Render Pass**: [`render`] fits groups into the configured width,
//!    printing each flat when it fits and broken otherwise.
//!
//! # Modules
//!
//! - [`context`]: Configuration and per-run state
//! - [`doc`]: The layout document algebra and its renderer
//! - [`emitter`]: Output abstraction
//! - [`predicates`]: Structural questions about the tree
//! - [`print`]: Node printers and the element layout engine

pub mod context;
pub mod doc;
pub mod emitter;
pub mod predicates;
pub mod print;

pub use context::{
    ConfigError, FormatConfig, FormatContext, LineEnding, DEFAULT_PRINT_WIDTH, DEFAULT_TAB_WIDTH,
};
pub use doc::{render, Doc, GroupId};
pub use emitter::{Emitter, StringEmitter};
pub use print::{format_document, print_doc, ElementLayout, PrintArgs, Printer};
