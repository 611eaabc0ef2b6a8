// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction predicate and fragment collector.
//
// An element is an extraction root when it carries a non-empty `data-role` or
// a class name containing `extract`. Roots are terminal: their text is
// captured as one fragment and nothing below them is visited, whatever
// markers it carries.

use folio_core::node::{Node, Props, StyleValue};
use folio_core::Element;
use tracing::trace;

use crate::fragment::{Fragment, Position, Role};
use crate::importance;
use crate::role;
use crate::walker::{self, Descend, Visitor, WalkContext};

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_FONT_WEIGHT: &str = "normal";
/// Tag recorded when the source tag is blank.
pub const DEFAULT_TAG: &str = "div";

/// Whether an element is an extraction root.
pub fn should_extract(props: &Props) -> bool {
    props.explicit_role().is_some() || props.has_extract_class()
}

/// Gathers fragments while a tree is walked.
#[derive(Debug, Default)]
pub struct Collector {
    fragments: Vec<Fragment>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `root` from `ctx` and return every fragment found, in traversal
    /// order.
    pub fn collect(root: &Node, ctx: WalkContext) -> Vec<Fragment> {
        let mut collector = Self::new();
        walker::walk(root, ctx, &mut collector);
        collector.into_fragments()
    }

    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }

    fn capture(&mut self, element: &Element, position: Position, ctx: &WalkContext) {
        let props = &element.props;
        let text = walker::text_content(&props.children);
        if text.is_empty() {
            trace!(tag = %element.tag, "extraction root has no text");
            return;
        }

        let font_size = props
            .style
            .font_size
            .as_ref()
            .and_then(StyleValue::as_number)
            .unwrap_or(DEFAULT_FONT_SIZE);
        let font_weight = props
            .style
            .font_weight
            .as_ref()
            .map(|weight| weight.as_text().trim().to_owned())
            .filter(|weight| !weight.is_empty())
            .unwrap_or_else(|| DEFAULT_FONT_WEIGHT.to_owned());
        let element_tag = if element.tag.trim().is_empty() {
            DEFAULT_TAG.to_owned()
        } else {
            element.tag.clone()
        };

        let importance = importance::score(font_size, &font_weight, &element_tag);
        let role = match props.explicit_role() {
            Some(explicit) => Role::from_explicit(explicit),
            None => role::infer(&element_tag, &text, font_size),
        };

        trace!(tag = %element_tag, %role, importance, "captured fragment");
        self.fragments.push(Fragment {
            text,
            element_tag,
            position,
            font_size,
            font_weight,
            is_top_level: !ctx.inside_extract,
            role,
            importance,
        });
    }
}

impl Visitor for Collector {
    fn visit_element(&mut self, element: &Element, ctx: &WalkContext) -> Descend {
        let style = &element.props.style;
        let position = ctx.position.offset(
            declared_length(style.left.as_ref()).unwrap_or(0.0),
            declared_length(style.top.as_ref()).unwrap_or(0.0),
        );

        if should_extract(&element.props) {
            if !ctx.inside_extract {
                self.capture(element, position, ctx);
            }
            return Descend::Stop;
        }

        Descend::Into(WalkContext {
            position,
            width: declared_length(style.width.as_ref()).unwrap_or(ctx.width),
            height: declared_length(style.height.as_ref()).unwrap_or(ctx.height),
            inside_extract: ctx.inside_extract,
        })
    }
}

/// Absolute length of a style value; percentages carry no absolute extent.
fn declared_length(value: Option<&StyleValue>) -> Option<f64> {
    value
        .filter(|value| !value.is_percent())
        .and_then(StyleValue::as_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Component, Style};

    fn collect(root: impl Into<Node>) -> Vec<Fragment> {
        Collector::collect(&root.into(), WalkContext::root())
    }

    #[test]
    fn explicit_role_skips_inference() {
        let fragments = collect(
            Element::new("h1")
                .role("name")
                .style(Style::new().font_size(72).font_weight("bold"))
                .children("Jane Doe"),
        );
        assert_eq!(fragments.len(), 1);
        let fragment = &fragments[0];
        assert_eq!(fragment.text, "Jane Doe");
        assert_eq!(fragment.role, Role::Name);
        assert_eq!(fragment.importance, 10);
        assert_eq!(fragment.font_weight, "bold");
        assert_eq!(fragment.position, Position::ORIGIN);
        assert!(fragment.is_top_level);
    }

    #[test]
    fn extract_class_uses_defaults() {
        let fragments = collect(Element::new("div").class("extract").children(vec![
            Node::from("Reached"),
            Node::from(" "),
            Node::from("via"),
            Node::from(" "),
            Node::from("concatenation"),
        ]));
        assert_eq!(fragments.len(), 1);
        let fragment = &fragments[0];
        assert_eq!(fragment.text, "Reached via concatenation");
        assert_eq!(fragment.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(fragment.font_weight, DEFAULT_FONT_WEIGHT);
        assert_eq!(fragment.role, Role::Content);
        assert_eq!(fragment.importance, 5);
    }

    #[test]
    fn nested_markers_are_ignored() {
        let fragments = collect(
            Element::new("div")
                .role("experience-section")
                .child(Element::new("h3").role("name").children("BirCloud"))
                .child(Element::new("p").class("extract").children("Frontend intern")),
        );
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "BirCloud Frontend intern");
        assert_eq!(fragments[0].role, Role::ExperienceSection);
    }

    #[test]
    fn collected_fragments_are_top_level() {
        let fragments = collect(
            Element::new("section").child(
                Element::new("div")
                    .class("extract")
                    .child(Element::new("p").role("name").children("Ada Lovelace")),
            ),
        );
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].is_top_level);
    }

    #[test]
    fn empty_root_is_terminal() {
        let fragments = collect(
            Element::new("div")
                .role("content")
                .child(Element::new("img"))
                .child(Element::new("p").role("name").children("hidden")),
        );
        // The inner marker never becomes a fragment either.
        assert!(fragments.is_empty());
    }

    #[test]
    fn unmarked_nodes_yield_nothing() {
        let fragments = collect(
            Element::new("div")
                .child(Element::new("h1").children("Plain heading"))
                .child("stray text"),
        );
        assert!(fragments.is_empty());
    }

    #[test]
    fn unparseable_font_size_falls_back() {
        let fragments = collect(
            Element::new("p")
                .class("extract")
                .style(Style::new().font_size("large").font_weight(""))
                .children("Body"),
        );
        assert_eq!(fragments[0].font_size, DEFAULT_FONT_SIZE);
        assert_eq!(fragments[0].font_weight, DEFAULT_FONT_WEIGHT);
    }

    #[test]
    fn numeric_weight_is_normalised_to_text() {
        let fragments = collect(
            Element::new("span")
                .class("extract")
                .style(Style::new().font_size("50px").font_weight(600))
                .children("Rust"),
        );
        assert_eq!(fragments[0].font_weight, "600");
        assert_eq!(fragments[0].font_size, 50.0);
    }

    #[test]
    fn declared_offsets_accumulate_down_the_tree() {
        let fragments = collect(
            Element::new("div")
                .style(Style::new().with("top", 100).with("width", "100%"))
                .child(
                    Element::new("p")
                        .class("extract")
                        .style(Style::new().with("left", "40px").with("top", 20))
                        .children("Offset"),
                ),
        );
        assert_eq!(fragments[0].position, Position::new(40.0, 120.0));
    }

    #[test]
    fn children_inherit_declared_extent() {
        let root = Element::new("div").style(Style::new().with("width", 500).with("height", "100%"));
        let mut collector = Collector::new();
        let ctx = WalkContext::root();
        match collector.visit_element(&root, &ctx) {
            Descend::Into(child) => {
                assert_eq!(child.width, 500.0);
                assert_eq!(child.height, 0.0);
            }
            Descend::Stop => panic!("unmarked element must descend"),
        }
    }

    fn card(props: &Props) -> Node {
        let mut element = Element::new("div")
            .child(Element::new("h3").children(props.attr_str("title").unwrap_or_default().to_owned()))
            .child(Element::new("p").children(props.attr_str("description").unwrap_or_default().to_owned()));
        element.props.data_role = props.data_role.clone();
        element.into()
    }

    #[test]
    fn component_roots_are_resolved_before_the_predicate() {
        let mut props = Props::default();
        props.data_role = Some("experience-section".into());
        props.attrs.insert("title".into(), "Gazete Keyfi".into());
        props.attrs.insert("description".into(), "SEO work".into());
        let fragments = collect(Component::new("Card", card, props));

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].element_tag, "div");
        assert_eq!(fragments[0].text, "Gazete Keyfi SEO work");
    }
}
