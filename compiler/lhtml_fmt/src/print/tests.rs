#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use lhtml_ir::{Attr, NodeTreeBuilder};
use pretty_assertions::assert_eq;

use super::*;

fn fmt(tree: &NodeTree, width: usize) -> String {
    format_document(tree, &FormatConfig::with_print_width(width)).unwrap()
}

fn element(name: &str, text: &str) -> NodeTree {
    let mut b = NodeTreeBuilder::new();
    b.open_element(name, vec![]);
    b.text(text);
    b.close_element(name).unwrap();
    b.finish().unwrap()
}

#[test]
fn empty_document_prints_nothing() {
    let tree = NodeTreeBuilder::new().finish().unwrap();
    assert_eq!(fmt(&tree, 80), "");
}

#[test]
fn inline_text_stays_on_one_line() {
    assert_eq!(fmt(&element("div", "hello world"), 80), "<div>hello world</div>\n");
}

#[test]
fn body_always_breaks() {
    assert_eq!(
        fmt(&element("body", "hello world"), 80),
        "<body>\n  hello world\n</body>\n"
    );
}

#[test]
fn text_fills_available_width() {
    assert_eq!(
        fmt(&element("div", "aaa bbb ccc"), 12),
        "<div>\n  aaa bbb\n  ccc\n</div>\n"
    );
}

#[test]
fn text_collapses_inner_whitespace() {
    assert_eq!(
        fmt(&element("div", "a \n\t b"), 80),
        "<div>a b</div>\n"
    );
}

#[test]
fn comments_keep_their_body() {
    let mut b = NodeTreeBuilder::new();
    b.comment(" a\n b ");
    b.open_element("div", vec![]);
    b.comment(" hi ");
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(fmt(&tree, 80), "<!-- a\n b -->\n<div><!-- hi --></div>\n");
}

#[test]
fn liquid_drop_markup_is_trimmed() {
    let mut b = NodeTreeBuilder::new();
    b.liquid_drop("  product.title  ");
    let tree = b.finish().unwrap();
    assert_eq!(fmt(&tree, 80), "{{ product.title }}\n");
}

#[test]
fn liquid_drop_keeps_written_trim_markers() {
    let mut b = NodeTreeBuilder::new();
    b.liquid_drop_trimmed("x", true, false);
    let tree = b.finish().unwrap();
    assert_eq!(fmt(&tree, 80), "{{- x }}\n");
}

#[test]
fn liquid_drop_strips_whitespace_introduced_by_breaks() {
    // <span>{{ x }}</span>
    let mut b = NodeTreeBuilder::new();
    b.open_element("span", vec![]);
    b.liquid_drop("x");
    b.close_element("span").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(fmt(&tree, 80), "<span>{{ x }}</span>\n");
    assert_eq!(fmt(&tree, 10), "<span>\n  {{- x -}}\n</span>\n");
}

#[test]
fn liquid_drop_with_whitespace_gets_no_markers() {
    // <span> {{ x }} </span>
    let mut b = NodeTreeBuilder::new();
    b.open_element("span", vec![]);
    b.text(" ");
    b.liquid_drop("x");
    b.text(" ");
    b.close_element("span").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(fmt(&tree, 80), "<span> {{ x }} </span>\n");
    assert_eq!(fmt(&tree, 10), "<span>\n  {{ x }}\n</span>\n");
}

#[test]
fn classify_layouts() {
    let mut b = NodeTreeBuilder::new();
    let br = b.void_element("br", vec![]);
    let img = b.self_closing_element("img", vec![]);
    let script = b.raw_element("script", vec![], "x");
    let textarea = b.open_element("textarea", vec![]);
    b.close_element("textarea").unwrap();
    let empty = b.open_element("div", vec![]);
    b.close_element("div").unwrap();
    let full = b.open_element("div", vec![]);
    let text = b.text("x").unwrap();
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    let config = FormatConfig::default();
    assert_eq!(ElementLayout::classify(&tree, br, &config), ElementLayout::Void);
    assert_eq!(ElementLayout::classify(&tree, img, &config), ElementLayout::Void);
    assert_eq!(ElementLayout::classify(&tree, script, &config), ElementLayout::Verbatim);
    assert_eq!(ElementLayout::classify(&tree, textarea, &config), ElementLayout::Empty);
    assert_eq!(ElementLayout::classify(&tree, empty, &config), ElementLayout::Empty);
    assert_eq!(
        ElementLayout::classify(&tree, full, &config),
        ElementLayout::General {
            first: text,
            last: text
        }
    );

    let preserving = FormatConfig::default().preserve_tag("DIV");
    assert_eq!(
        ElementLayout::classify(&tree, full, &preserving),
        ElementLayout::Verbatim
    );
}

#[test]
fn raw_content_is_copied() {
    let mut b = NodeTreeBuilder::new();
    b.raw_element("script", vec![], "  <b>x</b>\n");
    let tree = b.finish().unwrap();
    assert_eq!(fmt(&tree, 80), "<script>  <b>x</b>\n</script>\n");
}

#[test]
fn preserved_tags_are_copied() {
    let mut b = NodeTreeBuilder::new();
    b.open_element("div", vec![Attr::new("id", "keep")]);
    b.text("  ");
    b.open_element("b", vec![]);
    b.text("x");
    b.close_element("b").unwrap();
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    let config = FormatConfig::default().preserve_tag("div");
    assert_eq!(
        format_document(&tree, &config).unwrap(),
        "<div id=\"keep\">  <b>x</b></div>\n"
    );
}

#[test]
fn empty_elements_keep_significant_whitespace() {
    let mut b = NodeTreeBuilder::new();
    b.open_element("span", vec![]);
    b.text(" ");
    b.close_element("span").unwrap();
    b.text("\n");
    b.open_element("div", vec![]);
    b.text(" ");
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(fmt(&tree, 80), "<span> </span>\n<div></div>\n");
}

#[test]
fn void_elements_print_no_closing_tag() {
    let mut b = NodeTreeBuilder::new();
    b.void_element("br", vec![]);
    b.text("\n");
    b.self_closing_element("img", vec![Attr::new("src", "a.png")]);
    let tree = b.finish().unwrap();

    assert_eq!(fmt(&tree, 80), "<br>\n<img src=\"a.png\" />\n");
}

#[test]
fn long_attribute_lists_break() {
    let mut b = NodeTreeBuilder::new();
    b.open_element(
        "div",
        vec![Attr::new("class", "container"), Attr::new("id", "main")],
    );
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(
        fmt(&tree, 20),
        "<div\n  class=\"container\"\n  id=\"main\"\n></div>\n"
    );
}

#[test]
fn pre_content_keeps_its_lines() {
    let mut b = NodeTreeBuilder::new();
    b.open_element("pre", vec![]);
    b.text("  a\n    b");
    b.close_element("pre").unwrap();
    let tree = b.finish().unwrap();

    let out = fmt(&tree, 80);
    assert!(out.contains("  a\n    b"), "{out:?}");
}

#[test]
fn dedent_removes_common_indentation() {
    assert_eq!(dedent("\n    a\n      b\n  "), "a\n  b");
    assert_eq!(dedent("a\n  b"), "a\n  b");
    assert_eq!(dedent(""), "");
}

#[test]
fn invalid_config_is_rejected() {
    let tree = element("div", "x");
    assert_eq!(
        format_document(&tree, &FormatConfig::with_print_width(0)),
        Err(ConfigError::ZeroPrintWidth)
    );
}

#[test]
fn printing_is_deterministic() {
    let tree = element("div", "one two three");
    let config = FormatConfig::default();
    assert_eq!(print_doc(&tree, &config), print_doc(&tree, &config));
}
