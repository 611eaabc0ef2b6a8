// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end extraction scenarios on small page trees.

use folio_core::{Component, Element, Node, Props, Style};
use folio_extract::{extract_fragments, extract_text, Role};
use pretty_assertions::assert_eq;

#[test]
fn explicit_name_heading() {
    let page: Node = Element::new("h1")
        .role("name")
        .style(Style::new().font_size(72).font_weight("bold"))
        .children("Jane Doe")
        .into();

    let fragments = extract_fragments(&page);
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].role, Role::Name);
    assert_eq!(fragments[0].importance, 10);
    assert_eq!(extract_text(&page), "NAME: Jane Doe");
}

#[test]
fn extract_class_concatenates_children() {
    let page: Node = Element::new("div")
        .class("extract")
        .children(vec![
            Node::from("Reached"),
            Node::from(" "),
            Node::from("via"),
            Node::from(" "),
            Node::from("concatenation"),
        ])
        .into();

    let fragments = extract_fragments(&page);
    assert_eq!(fragments[0].text, "Reached via concatenation");
    assert_eq!(fragments[0].role, Role::Content);
    assert_eq!(fragments[0].importance, 5);
    assert!(fragments[0].is_top_level);
    assert_eq!(extract_text(&page), "Reached via concatenation");
}

#[test]
fn siblings_on_one_visual_line_read_left_to_right() {
    let page: Node = Element::new("div")
        .child(
            Element::new("p")
                .class("extract")
                .style(Style::new().with("left", 50).with("top", 100))
                .children("second"),
        )
        .child(
            Element::new("p")
                .class("extract")
                .style(Style::new().with("left", 10).with("top", 140))
                .children("first"),
        )
        .into();

    assert_eq!(extract_text(&page), "first\n\nsecond");
}

#[test]
fn nested_markers_produce_one_fragment() {
    let page: Node = Element::new("section")
        .role("education-section")
        .child(Element::new("h3").children("Education"))
        .child(Element::new("p").role("date").children("2021 - 2025"))
        .into();

    let fragments = extract_fragments(&page);
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text, "Education 2021 - 2025");
    assert_eq!(extract_text(&page), "=== EDUCATION 2021 - 2025 ===");
}

#[test]
fn unmarked_page_has_empty_text_layer() {
    let page: Node = Element::new("div")
        .child(Element::new("h1").children("Portfolio"))
        .child(Element::new("p").children("Nothing is marked here"))
        .into();

    assert!(extract_fragments(&page).is_empty());
    assert_eq!(extract_text(&page), "");
}

fn section(props: &Props) -> Node {
    Element::new("div")
        .child(
            Element::new("h2")
                .class("extract")
                .style(Style::new().font_weight("700"))
                .children(props.attr_str("title").unwrap_or_default().to_owned()),
        )
        .child(props.children.as_ref().clone())
        .into()
}

fn section_node(title: &str, children: Node) -> Node {
    let mut props = Props::default();
    props.attrs.insert("title".into(), title.into());
    props.children = Box::new(children);
    Component::new("Section", section, props).into()
}

#[test]
fn resume_page_reads_top_to_bottom() {
    let page: Node = Element::new("div")
        .child(
            Element::new("h1")
                .role("document-title")
                .style(Style::new().font_size("576px").font_weight("bold"))
                .children("Portfolio"),
        )
        .child(
            Element::new("p")
                .role("name")
                .style(Style::new().font_size("256px"))
                .children("Your Name"),
        )
        .child(section_node(
            "Contact",
            vec![
                Node::from(Element::new("span").class("extract").children("jane@example.com")),
                Node::from(Element::new("span").class("extract").children("+90 532 595 5586")),
                Node::from(Element::new("span").class("extract").children("github.com/jane")),
            ]
            .into(),
        ))
        .child(Element::new("p").role("date").children(2025_i64))
        .into();

    let expected = "\
PORTFOLIO

NAME: Your Name


--- CONTACT ---
EMAIL: jane@example.com
PHONE: +90 532 595 5586
LINK: github.com/jane
DATE: 2025";
    assert_eq!(extract_text(&page), expected);
}
