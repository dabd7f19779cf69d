use super::*;

#[test]
fn string_emitter_basic() {
    let mut emitter = StringEmitter::new();
    emitter.emit("<div>");
    emitter.emit("hello");
    emitter.emit("</div>");
    assert_eq!(emitter.output(), "<div>hello</div>");
}

#[test]
fn string_emitter_newline() {
    let mut emitter = StringEmitter::new();
    emitter.emit("line1");
    emitter.emit_newline();
    emitter.emit("line2");
    assert_eq!(emitter.output(), "line1\nline2");
}

#[test]
fn string_emitter_crlf() {
    let mut emitter = StringEmitter::with_line_ending(LineEnding::Crlf);
    emitter.emit("a");
    emitter.emit_newline();
    emitter.emit("b");
    assert_eq!(emitter.output(), "a\r\nb");
}

#[test]
fn string_emitter_indentation() {
    let mut emitter = StringEmitter::new();
    emitter.emit("<ul>");
    emitter.emit_newline();
    emitter.emit_indent(2);
    emitter.emit("<li>");
    emitter.emit_newline();
    emitter.emit_indent(4);
    emitter.emit("item");
    assert_eq!(emitter.output(), "<ul>\n  <li>\n    item");
}

#[test]
fn string_emitter_trim_trailing_whitespace() {
    let mut emitter = StringEmitter::new();
    emitter.emit("content \t ");
    assert_eq!(emitter.trim_trailing_whitespace(), 3);
    assert_eq!(emitter.trim_trailing_whitespace(), 0);
    assert_eq!(emitter.output(), "content");
}

#[test]
fn string_emitter_trim_stops_at_newline() {
    let mut emitter = StringEmitter::new();
    emitter.emit("a");
    emitter.emit_newline();
    emitter.emit_indent(4);
    emitter.trim_trailing_whitespace();
    assert_eq!(emitter.output(), "a\n");
}
