// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Declarative page tree: the node model every page is built from.
//
// A page is a tree of primitive elements (`div`, `h1`, `span` …), text and
// number leaves, lists, and components. A component is a render function plus
// the props it is invoked with; consumers must call `Component::resolve`
// before looking at anything below it.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Render function of a component: props in, concrete sub-tree out.
pub type RenderFn = fn(&Props) -> Node;

/// One node of a page tree.
#[derive(Debug, Clone, Default)]
pub enum Node {
    /// Absent child (`null` in a page file).
    #[default]
    Empty,
    Text(String),
    Number(f64),
    List(Vec<Node>),
    Element(Element),
    Component(Component),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Self::List(nodes)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Component> for Node {
    fn from(component: Component) -> Self {
        Self::Component(component)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

// -- Elements -----------------------------------------------------------------

/// A primitive element: a tag name plus its props.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub props: Props,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::default(),
        }
    }

    pub fn with_props(tag: impl Into<String>, props: Props) -> Self {
        Self {
            tag: tag.into(),
            props,
        }
    }

    /// Set the explicit semantic role (`data-role`).
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.props.data_role = Some(role.into());
        self
    }

    /// Set the class name (`className`).
    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.props.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.props.style = style;
        self
    }

    /// Replace the children.
    pub fn children(mut self, children: impl Into<Node>) -> Self {
        self.props.children = Box::new(children.into());
        self
    }

    /// Append one child, promoting a single existing child to a list.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        let child = child.into();
        let existing = std::mem::take(self.props.children.as_mut());
        let merged = match existing {
            Node::Empty => child,
            Node::List(mut nodes) => {
                nodes.push(child);
                Node::List(nodes)
            }
            single => Node::List(vec![single, child]),
        };
        self.props.children = Box::new(merged);
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.attrs.insert(key.into(), value.into());
        self
    }
}

// -- Components ---------------------------------------------------------------

/// A component reference: a named render function and the props to call it
/// with.
#[derive(Clone)]
pub struct Component {
    pub name: String,
    pub render: RenderFn,
    pub props: Props,
}

impl Component {
    pub fn new(name: impl Into<String>, render: RenderFn, props: Props) -> Self {
        Self {
            name: name.into(),
            render,
            props,
        }
    }

    /// Invoke the render function to obtain the concrete sub-tree.
    pub fn resolve(&self) -> Node {
        (self.render)(&self.props)
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

// -- Props --------------------------------------------------------------------

/// Structured property bag of an element or component.
///
/// Only the properties the pipeline reads have dedicated fields; everything
/// else (`src`, `alt`, component arguments …) lives in `attrs`.
#[derive(Debug, Clone, Default)]
pub struct Props {
    /// `data-role`: explicit semantic tag.
    pub data_role: Option<String>,
    /// `className`.
    pub class_name: Option<String>,
    pub style: Style,
    pub children: Box<Node>,
    pub attrs: BTreeMap<String, serde_json::Value>,
}

impl Props {
    /// The explicit role, if present and non-empty.
    pub fn explicit_role(&self) -> Option<&str> {
        self.data_role.as_deref().filter(|role| !role.is_empty())
    }

    /// Whether the class name contains the `extract` marker.
    pub fn has_extract_class(&self) -> bool {
        self.class_name
            .as_deref()
            .is_some_and(|class| class.contains("extract"))
    }

    /// String attribute, if present and a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(serde_json::Value::as_str)
    }

    /// Numeric attribute; numeric strings are accepted.
    pub fn attr_f64(&self, key: &str) -> Option<f64> {
        match self.attrs.get(key)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => parse_leading_number(s),
            _ => None,
        }
    }
}

// -- Style --------------------------------------------------------------------

/// A single style value as authored: a bare number or a string such as
/// `"72px"`, `"100%"` or `"bold"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Numeric reading of the value. Strings are parsed by their leading
    /// number (`"72px"` → 72, `"1.5"` → 1.5); anything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => parse_leading_number(s),
        }
    }

    /// Textual reading of the value; numbers print in shortest decimal form.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Whether the value is a percentage string (`"50%"`).
    pub fn is_percent(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim_end().ends_with('%'))
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Inline style of an element.
///
/// Font metrics and box extents are typed fields because the extraction
/// engine reads them; every other property is kept under its authored
/// camelCase name for the rasterizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub font_size: Option<StyleValue>,
    pub font_weight: Option<StyleValue>,
    pub width: Option<StyleValue>,
    pub height: Option<StyleValue>,
    pub left: Option<StyleValue>,
    pub top: Option<StyleValue>,
    pub other: BTreeMap<String, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Style::set`].
    pub fn with(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn font_size(self, value: impl Into<StyleValue>) -> Self {
        self.with("fontSize", value)
    }

    pub fn font_weight(self, value: impl Into<StyleValue>) -> Self {
        self.with("fontWeight", value)
    }

    /// Set a property by its camelCase name.
    pub fn set(&mut self, key: &str, value: impl Into<StyleValue>) {
        let value = Some(value.into());
        match key {
            "fontSize" => self.font_size = value,
            "fontWeight" => self.font_weight = value,
            "width" => self.width = value,
            "height" => self.height = value,
            "left" => self.left = value,
            "top" => self.top = value,
            _ => {
                if let Some(value) = value {
                    self.other.insert(key.to_owned(), value);
                }
            }
        }
    }

    /// Look up a property by its camelCase name.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        match key {
            "fontSize" => self.font_size.as_ref(),
            "fontWeight" => self.font_weight.as_ref(),
            "width" => self.width.as_ref(),
            "height" => self.height.as_ref(),
            "left" => self.left.as_ref(),
            "top" => self.top.as_ref(),
            _ => self.other.get(key),
        }
    }

    /// String reading of a property.
    pub fn get_text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(StyleValue::as_text)
    }

    /// Numeric reading of a property (see [`StyleValue::as_number`]).
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(StyleValue::as_number)
    }
}

/// Parse the leading decimal number of a string, ignoring any unit suffix.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Returns `None` when no digits lead the string.
pub fn parse_leading_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}
