// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Component registry and the built-in résumé components.
//
// Page files reference components by name; the loader looks the name up here
// and stores the render function in the tree, so components are expanded
// lazily by whoever walks the page (renderer or extractor).

use std::collections::BTreeMap;

use folio_core::{Element, Node, Props, RenderFn, Style};

/// Name → render function table consulted by the page loader.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, RenderFn>,
}

impl ComponentRegistry {
    /// A registry with no components.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `Section`, `SkillBar` and `ExperienceCard`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("Section", section);
        registry.register("SkillBar", skill_bar);
        registry.register("ExperienceCard", experience_card);
        registry
    }

    /// Register (or replace) a component.
    pub fn register(&mut self, name: impl Into<String>, render: RenderFn) {
        self.components.insert(name.into(), render);
    }

    pub fn get(&self, name: &str) -> Option<RenderFn> {
        self.components.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}

/// Copy the extraction markers of a component's props onto `element`.
fn forward_markers(mut element: Element, props: &Props) -> Element {
    element.props.data_role = props.data_role.clone();
    element.props.class_name = props.class_name.clone();
    element
}

fn column() -> Style {
    Style::new().with("display", "flex").with("flexDirection", "column")
}

// -- Built-ins ----------------------------------------------------------------

/// Titled section: an uppercase `h2` followed by a rule, then the children.
fn section(props: &Props) -> Node {
    let title = props.attr_str("title").unwrap_or_default().to_owned();
    let heading = Element::new("h2")
        .style(
            Style::new()
                .font_size("67px")
                .font_weight("700")
                .with("color", "#1a202c")
                .with("fontFamily", "Oswald")
                .with("margin", "0")
                .with("textTransform", "uppercase"),
        )
        .children(title);

    Element::new("div")
        .style(column().with("marginBottom", "50px"))
        .child(
            Element::new("div")
                .style(
                    Style::new()
                        .with("display", "flex")
                        .with("alignItems", "center")
                        .with("marginBottom", "35px"),
                )
                .child(forward_markers(heading, props))
                .child(Element::new("div").style(
                    Style::new()
                        .with("flex", 1)
                        .with("height", "6px")
                        .with("backgroundColor", "#e2e8f0")
                        .with("marginLeft", "50px"),
                )),
        )
        .child((*props.children).clone())
        .into()
}

/// Skill label with its percentage above a proportionally filled bar.
fn skill_bar(props: &Props) -> Node {
    let skill = props.attr_str("skill").unwrap_or_default().to_owned();
    let percentage = props.attr_f64("percentage").unwrap_or(0.0).clamp(0.0, 100.0);
    let color = props.attr_str("color").unwrap_or("#3182ce").to_owned();

    let root = Element::new("div")
        .style(column().with("marginBottom", "30px"))
        .child(
            Element::new("div")
                .style(
                    Style::new()
                        .with("display", "flex")
                        .with("justifyContent", "space-between")
                        .with("marginBottom", "15px"),
                )
                .child(
                    Element::new("span")
                        .style(Style::new().font_size("50px").font_weight("600").with("color", "#2d3748"))
                        .children(skill),
                )
                .child(
                    Element::new("span")
                        .style(Style::new().font_size("46px").font_weight("600").with("color", "#718096"))
                        .children(format!("{percentage}%")),
                ),
        )
        .child(
            Element::new("div")
                .style(
                    Style::new()
                        .with("display", "flex")
                        .with("width", "100%")
                        .with("height", "25px")
                        .with("backgroundColor", "#e2e8f0"),
                )
                .child(Element::new("div").style(
                    Style::new()
                        .with("width", format!("{percentage}%"))
                        .with("height", "100%")
                        .with("backgroundColor", color),
                )),
        );
    forward_markers(root, props).into()
}

/// Experience entry: title with optional date range, a type badge, and a
/// description paragraph.
fn experience_card(props: &Props) -> Node {
    let title = props.attr_str("title").unwrap_or_default().to_owned();
    let kind = props.attr_str("type").unwrap_or_default().to_owned();
    let description = props.attr_str("description").unwrap_or_default().to_owned();
    let color = props.attr_str("color").unwrap_or("#3182ce");

    let mut heading = Element::new("div").style(column()).child(
        Element::new("h3")
            .style(
                Style::new()
                    .font_size("54px")
                    .font_weight("700")
                    .with("color", "#2d3748")
                    .with("margin", "0")
                    .with("fontFamily", "Oswald"),
            )
            .children(title),
    );
    if let Some(dates) = date_range(props.attr_str("from"), props.attr_str("to")) {
        heading = heading.child(
            Element::new("span")
                .style(
                    Style::new()
                        .font_size("38px")
                        .font_weight("500")
                        .with("color", "#718096")
                        .with("marginTop", "8px"),
                )
                .children(dates),
        );
    }

    let root = Element::new("div")
        .style(
            column()
                .with("marginBottom", "22px")
                .with("backgroundColor", "#f7fafc")
                .with("padding", "30px")
                .with("borderLeft", format!("11px solid {color}")),
        )
        .child(
            Element::new("div")
                .style(
                    Style::new()
                        .with("display", "flex")
                        .with("justifyContent", "space-between")
                        .with("alignItems", "flex-start")
                        .with("marginBottom", "15px"),
                )
                .child(heading)
                .child(
                    Element::new("span")
                        .style(
                            Style::new()
                                .font_size("40px")
                                .font_weight("600")
                                .with("color", "#718096")
                                .with("backgroundColor", "#e2e8f0")
                                .with("padding", "11px 30px"),
                        )
                        .children(kind),
                ),
        )
        .child(
            Element::new("p")
                .style(
                    Style::new()
                        .font_size("42px")
                        .with("lineHeight", "1.55")
                        .with("color", "#4a5568")
                        .with("margin", "0"),
                )
                .children(description),
        );
    forward_markers(root, props).into()
}

/// `07.2025 - 08.2025`, `07.2025`, `- 08.2025`, or nothing.
fn date_range(from: Option<&str>, to: Option<&str>) -> Option<String> {
    match (from.filter(|s| !s.is_empty()), to.filter(|s| !s.is_empty())) {
        (Some(from), Some(to)) => Some(format!("{from} - {to}")),
        (Some(from), None) => Some(from.to_owned()),
        (None, Some(to)) => Some(format!("- {to}")),
        (None, None) => None,
    }
}
