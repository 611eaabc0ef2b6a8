// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tree walker: recursive traversal over a page tree.
//
// Components are invoked before anything below them is inspected. What
// happens at a primitive element, and whether its children are visited, is
// up to the `Visitor`.

use folio_core::node::Node;
use folio_core::Element;

use crate::fragment::Position;

/// State handed from a parent element to its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkContext {
    /// Last known position, inherited by descendants.
    pub position: Position,
    /// Last declared width, in style units (0 when none was declared).
    pub width: f64,
    /// Last declared height, in style units (0 when none was declared).
    pub height: f64,
    /// An ancestor is an extraction root.
    pub inside_extract: bool,
}

impl WalkContext {
    /// Context for the root of a page.
    pub fn root() -> Self {
        Self::at(Position::ORIGIN)
    }

    pub fn at(position: Position) -> Self {
        Self {
            position,
            width: 0.0,
            height: 0.0,
            inside_extract: false,
        }
    }
}

impl Default for WalkContext {
    fn default() -> Self {
        Self::root()
    }
}

/// Decision a visitor returns for an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Descend {
    /// Visit the children with this context.
    Into(WalkContext),
    /// Do not look below this element.
    Stop,
}

/// Callback invoked for every primitive element reached by [`walk`].
pub trait Visitor {
    fn visit_element(&mut self, element: &Element, ctx: &WalkContext) -> Descend;
}

/// Walk `node`, resolving components and asking `visitor` about every
/// primitive element. Lists are walked in order; leaves are skipped.
pub fn walk<V: Visitor + ?Sized>(node: &Node, ctx: WalkContext, visitor: &mut V) {
    match node {
        Node::Empty | Node::Text(_) | Node::Number(_) => {}
        Node::List(nodes) => {
            for child in nodes {
                walk(child, ctx, visitor);
            }
        }
        Node::Component(component) => {
            let rendered = component.resolve();
            walk(&rendered, ctx, visitor);
        }
        Node::Element(element) => {
            if let Descend::Into(child_ctx) = visitor.visit_element(element, &ctx) {
                walk(&element.props.children, child_ctx, visitor);
            }
        }
    }
}

/// Flatten every text and number leaf under `node` into one string.
///
/// Leaves are joined with single spaces and whitespace runs collapse, so the
/// result is trimmed. Components are resolved on the way down; no role or
/// importance logic runs here.
pub fn text_content(node: &Node) -> String {
    let mut leaves = Vec::new();
    collect_leaves(node, &mut leaves);
    leaves
        .iter()
        .flat_map(|leaf| leaf.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_leaves(node: &Node, leaves: &mut Vec<String>) {
    match node {
        Node::Empty => {}
        Node::Text(text) => leaves.push(text.clone()),
        Node::Number(value) => leaves.push(value.to_string()),
        Node::List(nodes) => {
            for child in nodes {
                collect_leaves(child, leaves);
            }
        }
        Node::Element(element) => collect_leaves(&element.props.children, leaves),
        Node::Component(component) => collect_leaves(&component.resolve(), leaves),
    }
}
