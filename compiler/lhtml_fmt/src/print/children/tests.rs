#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use lhtml_ir::NodeTreeBuilder;
use pretty_assertions::assert_eq;

use super::*;
use crate::context::FormatConfig;
use crate::print::format_document;

fn fmt(tree: &NodeTree, width: usize) -> String {
    format_document(tree, &FormatConfig::with_print_width(width)).unwrap()
}

#[test]
fn blocks_are_separated_by_hardlines() {
    let mut b = NodeTreeBuilder::new();
    b.open_element("div", vec![]);
    let p1 = b.open_element("p", vec![]);
    b.text("a");
    b.close_element("p").unwrap();
    let p2 = b.open_element("p", vec![]);
    b.text("b");
    b.close_element("p").unwrap();
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(BetweenLine::of(&tree, p1, p2), BetweenLine::Hard);
    assert_eq!(fmt(&tree, 80), "<div>\n  <p>a</p>\n  <p>b</p>\n</div>\n");
}

#[test]
fn inline_siblings_follow_source_whitespace() {
    // <div><span>a</span> <span>b</span><span>c</span></div>
    let mut b = NodeTreeBuilder::new();
    b.open_element("div", vec![]);
    let a = b.open_element("span", vec![]);
    b.text("a");
    b.close_element("span").unwrap();
    b.text(" ");
    let bb = b.open_element("span", vec![]);
    b.text("b");
    b.close_element("span").unwrap();
    let c = b.open_element("span", vec![]);
    b.text("c");
    b.close_element("span").unwrap();
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(BetweenLine::of(&tree, a, bb), BetweenLine::Line);
    assert_eq!(BetweenLine::of(&tree, bb, c), BetweenLine::Soft);
}

#[test]
fn void_element_lends_its_end_to_following_text() {
    // <span><br>x</span>
    let mut b = NodeTreeBuilder::new();
    b.open_element("span", vec![]);
    let br = b.void_element("br", vec![]);
    let x = b.text("x").unwrap();
    b.close_element("span").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(BetweenLine::of(&tree, br, x), BetweenLine::None);
}

#[test]
fn text_and_comment_siblings() {
    // <div>a<!--c--></div> and <div>a <!--c--></div>
    let mut b = NodeTreeBuilder::new();
    b.open_element("div", vec![]);
    let tight = b.text("a").unwrap();
    let tight_comment = b.comment("c");
    b.close_element("div").unwrap();
    b.open_element("div", vec![]);
    let spaced = b.text("a ").unwrap();
    let spaced_comment = b.comment("c");
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(BetweenLine::of(&tree, tight, tight_comment), BetweenLine::None);
    assert_eq!(BetweenLine::of(&tree, spaced, spaced_comment), BetweenLine::Hard);
}

#[test]
fn inline_siblings_wrap_when_too_wide() {
    let mut b = NodeTreeBuilder::new();
    b.open_element("div", vec![]);
    b.open_element("span", vec![]);
    b.text("a");
    b.close_element("span").unwrap();
    b.text(" ");
    b.open_element("span", vec![]);
    b.text("b");
    b.close_element("span").unwrap();
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(fmt(&tree, 80), "<div><span>a</span> <span>b</span></div>\n");
    assert_eq!(
        fmt(&tree, 20),
        "<div>\n  <span>a</span>\n  <span>b</span>\n</div>\n"
    );
}

#[test]
fn list_children_always_break() {
    let mut b = NodeTreeBuilder::new();
    b.open_element("ul", vec![]);
    b.open_element("li", vec![]);
    b.text("a");
    b.close_element("li").unwrap();
    b.open_element("li", vec![]);
    b.text("b");
    b.close_element("li").unwrap();
    b.close_element("ul").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(fmt(&tree, 80), "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n");
}

#[test]
fn blank_lines_between_children_are_kept() {
    let mut b = NodeTreeBuilder::new();
    b.open_element("ul", vec![]);
    b.open_element("li", vec![]);
    b.text("a");
    b.close_element("li").unwrap();
    b.text("\n\n\n");
    b.open_element("li", vec![]);
    b.text("b");
    b.close_element("li").unwrap();
    b.close_element("ul").unwrap();
    b.text("\n\n");
    b.open_element("div", vec![]);
    b.open_element("p", vec![]);
    b.text("c");
    b.close_element("p").unwrap();
    b.text("\n\n");
    b.open_element("p", vec![]);
    b.text("d");
    b.close_element("p").unwrap();
    b.close_element("div").unwrap();
    let tree = b.finish().unwrap();

    assert_eq!(
        fmt(&tree, 80),
        "<ul>\n  <li>a</li>\n\n  <li>b</li>\n</ul>\n\n<div>\n  <p>c</p>\n\n  <p>d</p>\n</div>\n"
    );
}

#[test]
fn single_blank_line_is_not_forced() {
    let mut b = NodeTreeBuilder::new();
    let p = b.open_element("p", vec![]);
    b.text("a");
    b.close_element("p").unwrap();
    b.text("\n");
    b.open_element("p", vec![]);
    b.text("b");
    b.close_element("p").unwrap();
    let tree = b.finish().unwrap();

    assert!(!force_next_empty_line(&tree, p));
    assert_eq!(fmt(&tree, 80), "<p>a</p>\n<p>b</p>\n");
}

#[test]
fn hardline_preferences() {
    let mut b = NodeTreeBuilder::new();
    let comment = b.comment("x");
    let script = b.raw_element("script", vec![], "");
    let br = b.void_element("br", vec![]);
    let span = b.open_element("span", vec![]);
    b.close_element("span").unwrap();
    let tree = b.finish().unwrap();

    assert!(prefer_hardline_as_surrounding_spaces(&tree, comment));
    assert!(prefer_hardline_as_surrounding_spaces(&tree, script));
    assert!(!prefer_hardline_as_surrounding_spaces(&tree, br));
    assert!(prefer_hardline_as_trailing_spaces(&tree, br));
    assert!(prefer_hardline_as_leading_spaces(&tree, span));
}
