//! Property-based tests for the element layout engine.
//!
//! Random trees of inline and block elements, text, comments and Liquid
//! drops are formatted at random widths to check that:
//! 1. Output is deterministic
//! 2. Only whitespace (and `-` trim markers) is ever added or removed
//! 3. Children attached to void elements never reach the output

#![allow(clippy::unwrap_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use lhtml_fmt::{format_document, print_doc, FormatConfig};
use lhtml_ir::{NodeKind, NodeTree, NodeTreeBuilder};
use proptest::prelude::*;

const ELEMENT_NAMES: &[&str] = &["div", "span", "p", "b", "i", "ul", "li", "table", "td", "button"];
const VOID_NAMES: &[&str] = &["br", "img", "input", "hr"];

#[derive(Debug, Clone)]
enum Item {
    Text(String),
    /// Whitespace-only text: a newline when `true`, a space otherwise.
    Space(bool),
    Comment(String),
    Drop(String),
    Void(&'static str),
    Element(&'static str, Vec<Item>),
}

fn leaf_strategy() -> impl Strategy<Value = Item> {
    prop_oneof![
        3 => "[a-z]{1,6}( [a-z]{1,6}){0,3}".prop_map(Item::Text),
        2 => any::<bool>().prop_map(Item::Space),
        1 => "[a-z]{1,5}".prop_map(Item::Comment),
        1 => "[a-z]{1,5}".prop_map(Item::Drop),
        1 => prop::sample::select(VOID_NAMES).prop_map(Item::Void),
    ]
}

fn item_strategy() -> impl Strategy<Value = Item> {
    leaf_strategy().prop_recursive(4, 40, 4, |inner| {
        (
            prop::sample::select(ELEMENT_NAMES),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(name, children)| Item::Element(name, children))
    })
}

fn document_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item_strategy(), 0..4)
}

fn add(b: &mut NodeTreeBuilder, item: &Item) {
    match item {
        Item::Text(text) => {
            b.text(text);
        }
        Item::Space(newline) => {
            b.text(if *newline { "\n" } else { " " });
        }
        Item::Comment(body) => {
            b.comment(body);
        }
        Item::Drop(markup) => {
            b.liquid_drop(markup);
        }
        Item::Void(name) => {
            b.void_element(name, vec![]);
        }
        Item::Element(name, children) => {
            b.open_element(name, vec![]);
            for child in children {
                add(b, child);
            }
            b.close_element(name).unwrap();
        }
    }
}

fn build(items: &[Item]) -> NodeTree {
    let mut b = NodeTreeBuilder::new();
    for item in items {
        add(&mut b, item);
    }
    b.finish().unwrap()
}

fn significant(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_whitespace() && c != '-')
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn printing_is_deterministic(items in document_strategy(), width in 10usize..100) {
        let tree = build(&items);
        let config = FormatConfig::with_print_width(width);
        prop_assert_eq!(print_doc(&tree, &config), print_doc(&tree, &config));
        prop_assert_eq!(
            format_document(&tree, &config).unwrap(),
            format_document(&tree, &config).unwrap()
        );
    }

    #[test]
    fn only_whitespace_changes(items in document_strategy(), width in 4usize..100) {
        let tree = build(&items);
        let out = format_document(&tree, &FormatConfig::with_print_width(width)).unwrap();
        prop_assert_eq!(significant(&out), significant(tree.source()));
    }

    #[test]
    fn void_children_never_print(items in document_strategy(), width in 10usize..100) {
        let tree = build(&items);
        let config = FormatConfig::with_print_width(width);
        let expected = format_document(&tree, &config).unwrap();

        let voids: Vec<_> = tree
            .ids()
            .filter(|&id| tree.kind(id).element().is_some_and(|el| el.has_no_close_marker()))
            .collect();
        let mut extended = tree.clone();
        for id in voids {
            extended.append_child(id, NodeKind::Text { value: "hidden".to_string() });
        }
        prop_assert_eq!(format_document(&extended, &config).unwrap(), expected);
    }
}
