//! Output Emitter
//!
//! Abstraction for output production while a document is rendered.
//! Supports string building for in-memory formatting.

use crate::context::LineEnding;

/// Trait for emitting rendered output.
///
/// The renderer writes to an emitter as it walks the document. Different
/// implementations can target strings or other destinations.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a line terminator.
    fn emit_newline(&mut self);

    /// Emit indentation as the given number of spaces.
    fn emit_indent(&mut self, spaces: usize);

    /// Drop spaces and tabs at the end of the current line.
    ///
    /// Returns the number of characters removed.
    fn trim_trailing_whitespace(&mut self) -> usize;
}

/// String-based emitter for in-memory formatting.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
    line_ending: LineEnding,
}

impl StringEmitter {
    /// Create a new string emitter writing `\n` line breaks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an emitter writing the given line terminator.
    pub fn with_line_ending(line_ending: LineEnding) -> Self {
        Self {
            buffer: String::new(),
            line_ending,
        }
    }

    /// Get the formatted output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push_str(self.line_ending.as_str());
    }

    fn emit_indent(&mut self, spaces: usize) {
        for _ in 0..spaces {
            self.buffer.push(' ');
        }
    }

    fn trim_trailing_whitespace(&mut self) -> usize {
        let trimmed_len = self.buffer.trim_end_matches([' ', '\t']).len();
        let removed = self.buffer.len() - trimmed_len;
        self.buffer.truncate(trimmed_len);
        removed
    }
}

#[cfg(test)]
mod tests;
