// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page loader: turns a React-element JSON document into a page tree.
//
//   {"type": "div", "props": {"style": {...}, "data-role": "name", "children": [...]}}
//   {"component": "ExperienceCard", "props": {"title": "...", "data-role": "..."}}
//
// Children may be objects, arrays, strings, numbers, or null; booleans are
// dropped like `null`.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use folio_core::error::{FolioError, Result};
use folio_core::{Component, DiscoveredPage, Element, Node, Props, Style, StyleValue};

use super::components::ComponentRegistry;

/// Builds page trees, resolving component names against a registry.
pub struct PageLoader<'r> {
    registry: &'r ComponentRegistry,
}

impl<'r> PageLoader<'r> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Read and parse a discovered page file.
    #[instrument(skip_all, fields(page = %page.id))]
    pub fn load(&self, page: &DiscoveredPage) -> Result<Node> {
        let source = page.path.display().to_string();
        let json = std::fs::read_to_string(&page.path)?;
        let node = self.parse_str(&json, &source)?;
        debug!("Page definition loaded");
        Ok(node)
    }

    /// Parse a page document. `source` names the page in error messages.
    pub fn parse_str(&self, json: &str, source: &str) -> Result<Node> {
        let value: Value = serde_json::from_str(json).map_err(|e| definition_error(source, e))?;
        self.node(&value, "$")
            .map_err(|err| err.into_folio_error(source))
    }

    fn node(&self, value: &Value, at: &str) -> std::result::Result<Node, LoadError> {
        match value {
            Value::Null | Value::Bool(_) => Ok(Node::Empty),
            Value::String(text) => Ok(Node::Text(text.clone())),
            Value::Number(n) => n
                .as_f64()
                .map(Node::Number)
                .ok_or_else(|| LoadError::invalid(at, "number out of range")),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.node(item, &format!("{at}[{i}]")))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Node::List),
            Value::Object(object) => self.object(object, at),
        }
    }

    fn object(&self, object: &Map<String, Value>, at: &str) -> std::result::Result<Node, LoadError> {
        let props = match object.get("props") {
            None | Some(Value::Null) => Props::default(),
            Some(Value::Object(props)) => self.props(props, &format!("{at}.props"))?,
            Some(_) => return Err(LoadError::invalid(at, "\"props\" must be an object")),
        };

        match (object.get("type"), object.get("component")) {
            (Some(Value::String(tag)), None) if !tag.is_empty() => {
                Ok(Element::with_props(tag.clone(), props).into())
            }
            (None, Some(Value::String(name))) => {
                let render = self
                    .registry
                    .get(name)
                    .ok_or_else(|| LoadError::UnknownComponent(name.clone()))?;
                Ok(Component::new(name.clone(), render, props).into())
            }
            (Some(_), Some(_)) => Err(LoadError::invalid(at, "both \"type\" and \"component\" given")),
            _ => Err(LoadError::invalid(
                at,
                "expected a non-empty string \"type\" or \"component\"",
            )),
        }
    }

    fn props(&self, object: &Map<String, Value>, at: &str) -> std::result::Result<Props, LoadError> {
        let mut props = Props::default();
        for (key, value) in object {
            match key.as_str() {
                "data-role" => props.data_role = optional_string(value, &format!("{at}.data-role"))?,
                "className" => props.class_name = optional_string(value, &format!("{at}.className"))?,
                "style" => props.style = style(value, &format!("{at}.style"))?,
                "children" => {
                    props.children = Box::new(self.node(value, &format!("{at}.children"))?);
                }
                _ => {
                    props.attrs.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(props)
    }
}

fn optional_string(value: &Value, at: &str) -> std::result::Result<Option<String>, LoadError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(LoadError::invalid(at, "expected a string")),
    }
}

fn style(value: &Value, at: &str) -> std::result::Result<Style, LoadError> {
    let object = match value {
        Value::Null => return Ok(Style::default()),
        Value::Object(object) => object,
        _ => return Err(LoadError::invalid(at, "expected an object")),
    };

    let mut style = Style::new();
    for (key, value) in object {
        let value = match value {
            Value::Null => continue,
            Value::Number(n) => n
                .as_f64()
                .map(StyleValue::Number)
                .ok_or_else(|| LoadError::invalid(&format!("{at}.{key}"), "number out of range"))?,
            Value::String(s) => StyleValue::Text(s.clone()),
            _ => {
                return Err(LoadError::invalid(
                    &format!("{at}.{key}"),
                    "style values must be numbers or strings",
                ));
            }
        };
        style.set(key, value);
    }
    Ok(style)
}

fn definition_error(source: &str, reason: impl std::fmt::Display) -> FolioError {
    FolioError::PageDefinition {
        page: source.to_owned(),
        reason: reason.to_string(),
    }
}

/// Loader failure before the page source is known.
enum LoadError {
    Invalid { at: String, reason: String },
    UnknownComponent(String),
}

impl LoadError {
    fn invalid(at: &str, reason: &str) -> Self {
        Self::Invalid {
            at: at.to_owned(),
            reason: reason.to_owned(),
        }
    }

    fn into_folio_error(self, source: &str) -> FolioError {
        match self {
            Self::Invalid { at, reason } => definition_error(source, format!("{at}: {reason}")),
            Self::UnknownComponent(name) => FolioError::UnknownComponent(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_extract::extract_text;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> Result<Node> {
        PageLoader::new(&ComponentRegistry::with_builtins()).parse_str(json, "test.json")
    }

    #[test]
    fn elements_and_props_are_mapped() {
        let node = parse(
            r##"{
                "type": "h1",
                "props": {
                    "data-role": "name",
                    "className": "title extract",
                    "style": { "fontSize": 72, "fontWeight": "bold", "color": "#1a202c", "left": "40px" },
                    "alt": "heading",
                    "children": "Jane Doe"
                }
            }"##,
        )
        .unwrap();

        let Node::Element(element) = node else {
            panic!("expected an element");
        };
        assert_eq!(element.tag, "h1");
        assert_eq!(element.props.explicit_role(), Some("name"));
        assert!(element.props.has_extract_class());
        assert_eq!(element.props.style.font_size, Some(StyleValue::Number(72.0)));
        assert_eq!(element.props.style.get_number("left"), Some(40.0));
        assert_eq!(element.props.style.get_text("color").as_deref(), Some("#1a202c"));
        assert_eq!(element.props.attr_str("alt"), Some("heading"));
        assert!(matches!(element.props.children.as_ref(), Node::Text(t) if t == "Jane Doe"));
    }

    #[test]
    fn children_of_every_shape_load() {
        let node = parse(
            r#"{ "type": "div", "props": { "className": "extract",
                 "children": ["Reached", " ", null, true, 42, { "type": "span", "props": { "children": ["via", " x"] } }] } }"#,
        )
        .unwrap();
        assert_eq!(extract_text(&node), "Reached 42 via x");
    }

    #[test]
    fn components_resolve_through_the_registry() {
        let node = parse(
            r#"{ "type": "div", "props": { "children": [
                 { "component": "ExperienceCard", "props": {
                     "title": "phantom-frame", "type": "Open source",
                     "description": "Rust proxy.", "data-role": "experience-section" } }
               ] } }"#,
        )
        .unwrap();
        assert_eq!(extract_text(&node), "=== PHANTOM-FRAME OPEN SOURCE RUST PROXY. ===");
    }

    #[test]
    fn unknown_components_are_rejected() {
        let err = parse(r#"{ "component": "Carousel" }"#).unwrap_err();
        assert!(matches!(err, FolioError::UnknownComponent(name) if name == "Carousel"));
    }

    #[test]
    fn malformed_documents_name_the_offending_path() {
        let cases = [
            (r#"{ "props": {} }"#, "$"),
            (r#"{ "type": "div", "props": [] }"#, "$"),
            (r#"{ "type": "div", "props": { "style": { "margin": [1, 2] } } }"#, "$.props.style.margin"),
            (r#"{ "type": "div", "props": { "children": [{ "type": 3 }] } }"#, "$.props.children[0]"),
            (r#"{ "type": "div", "props": { "data-role": 1 } }"#, "$.props.data-role"),
        ];
        for (json, path) in cases {
            match parse(json) {
                Err(FolioError::PageDefinition { page, reason }) => {
                    assert_eq!(page, "test.json");
                    assert!(reason.starts_with(&format!("{path}:")), "{json} -> {reason}");
                }
                other => panic!("{json} should fail with a definition error, got {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_json_is_a_definition_error() {
        assert!(matches!(parse("{ not json"), Err(FolioError::PageDefinition { .. })));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1-home.json");
        std::fs::write(&path, r#"{ "type": "p", "props": { "data-role": "date", "children": 2025 } }"#).unwrap();
        let page = DiscoveredPage {
            id: folio_core::PageId::new(1, "home"),
            path,
        };

        let registry = ComponentRegistry::new();
        let node = PageLoader::new(&registry).load(&page).unwrap();
        assert_eq!(extract_text(&node), "DATE: 2025");
    }
}
