//! Integration tests for the parsing module.
//!
//! Uses snapshot testing with the canonical JSON form of the tree.
//! Fixtures (.md) and snapshots (.snap) are co-located in `fixtures/`.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::model::{Doc, ListItem, Node, Text, bold, encode_doc, link};
use crate::parsing::parse_markdown;

// Fixture-based tests

#[test]
fn fixture_mixed_document() {
    assert_fixture("mixed_document");
}

#[test]
fn fixture_fences() {
    assert_fixture("fences");
}

#[test]
fn fixture_lists_and_quotes() {
    assert_fixture("lists_and_quotes");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let doc = parse_markdown(&md);
    invariants::check(&doc);

    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_json_snapshot!(name, encode_doc(&doc));
    });
}

// Scenario tests

#[test]
fn heading_then_inline_paragraph() {
    let doc = parse_markdown("# Title\n\nSome **bold** and [a link](https://x.test) text.");
    assert_eq!(
        doc,
        Doc::with_children(vec![
            Node::heading(2, vec![Text::plain("Title").into()]),
            Node::Paragraph(vec![
                Text::plain("Some ").into(),
                bold("bold").into(),
                Text::plain(" and ").into(),
                link("a link", "https://x.test").into(),
                Text::plain(" text.").into(),
            ]),
        ])
    );
}

#[test]
fn fenced_code_with_language() {
    let doc = parse_markdown("```py\nprint(1)\n```");
    assert_eq!(
        doc.children,
        vec![Node::CodeBlock {
            language: "py".into(),
            children: vec![Text::plain("print(1)").into()],
        }]
    );
}

#[test]
fn numbered_list_starts_at_one() {
    let doc = parse_markdown("1. a\n2. b\n");
    assert_eq!(
        doc.children,
        vec![Node::OrderedList {
            start_order: 1,
            items: vec![ListItem::plain("a"), ListItem::plain("b")],
        }]
    );
}

#[test]
fn first_number_sets_start_order() {
    let doc = parse_markdown("3. c\n7. d");
    assert!(matches!(
        doc.children[0],
        Node::OrderedList { start_order: 3, ref items } if items.len() == 2
    ));
}

#[test]
fn unterminated_fence_consumes_to_end() {
    let doc = parse_markdown("```\n# not a heading\n- nor a list\n");
    assert_eq!(
        doc.children,
        vec![Node::CodeBlock {
            language: String::new(),
            children: vec![Text::plain("# not a heading\n- nor a list\n").into()],
        }]
    );
}

#[test]
fn each_line_is_its_own_paragraph() {
    let doc = parse_markdown("one\ntwo");
    assert_eq!(doc.len(), 2);
}

#[test]
fn list_ends_at_non_matching_line() {
    let doc = parse_markdown("- a\n- b\nafter");
    assert_eq!(
        doc.children,
        vec![
            Node::BulletList(vec![ListItem::plain("a"), ListItem::plain("b")]),
            Node::Paragraph(vec![Text::plain("after").into()]),
        ]
    );
}

#[test]
fn bullet_then_numbered_are_separate_lists() {
    let doc = parse_markdown("- a\n1. b");
    assert!(matches!(doc.children[0], Node::BulletList(_)));
    assert!(matches!(doc.children[1], Node::OrderedList { .. }));
}

#[test]
fn crlf_line_endings() {
    let doc = parse_markdown("## Title\r\n\r\n```\r\nx\r\n```\r\n");
    assert_eq!(
        doc.children,
        vec![
            Node::heading(2, vec![Text::plain("Title").into()]),
            Node::CodeBlock {
                language: String::new(),
                children: vec![Text::plain("x").into()],
            },
        ]
    );
}

#[rstest]
#[case("")]
#[case("\n\n\n")]
#[case("   \n\t\n")]
fn blank_input_is_empty(#[case] input: &str) {
    assert!(parse_markdown(input).is_empty());
}

#[rstest]
#[case("#")]
#[case("##### five")]
#[case("```")]
#[case("```\n```")]
#[case("> ")]
#[case("- ")]
#[case("1.")]
#[case("![]()")]
#[case("**")]
#[case("[")]
#[case("*_[**](_*")]
#[case("\u{feff}# bom")]
#[case("> a\n> b\n>\n- c\n\n\n1. d\n---\n```rust\n")]
fn never_panics_and_stays_well_formed(#[case] input: &str) {
    let doc = parse_markdown(input);
    invariants::check(&doc);
}
