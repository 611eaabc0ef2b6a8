// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Box layout: turns a page tree into positioned boxes.
//
// A small flexbox subset: every element is a block whose children either
// stack vertically (the default, or `flexDirection: column`) or sit in a row
// (`display: flex`). Widths are resolved top-down, heights bottom-up. Box
// sizes are border-box. Text runs are wrapped on word boundaries with real
// glyph advances when a font is available and an estimate otherwise.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use folio_core::node::{Element, Node};
use image::{DynamicImage, Rgba};
use tracing::{debug, warn};

use crate::image::ImageProcessor;
use crate::render::fonts::FontRegistry;
use crate::render::style::{
    Align, Borders, BoxStyle, Direction, Edges, Justify, Length, TextAlign, TextStyle,
};

/// Advance per character, as a fraction of the font size, when no font is
/// loaded.
const ESTIMATED_ADVANCE: f32 = 0.5;
/// Slack when testing whether a line still fits.
const FIT_EPSILON: f32 = 0.01;

/// A positioned box. `x`/`y` are relative to the parent's border-box origin.
#[derive(Debug)]
pub struct LayoutBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub margin: Edges,
    pub grow: f32,
    pub push_to_end: bool,
    pub kind: BoxKind,
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    fn new(width: f32, height: f32, kind: BoxKind) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            margin: Edges::default(),
            grow: 0.0,
            push_to_end: false,
            kind,
            children: Vec::new(),
        }
    }

    fn outer_width(&self) -> f32 {
        self.width + self.margin.horizontal()
    }

    fn outer_height(&self) -> f32 {
        self.height + self.margin.vertical()
    }
}

#[derive(Debug)]
pub enum BoxKind {
    Block {
        background: Option<Rgba<u8>>,
        borders: Borders,
    },
    Text {
        lines: Vec<TextLine>,
        style: TextStyle,
        /// Index into the [`FontRegistry`]; `None` when no font matched.
        face: Option<usize>,
    },
    Image {
        image: Option<DynamicImage>,
    },
}

/// One wrapped line; `x` and `baseline` are relative to the text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
}

/// Size constraints handed from a parent to a child.
#[derive(Debug, Clone, Copy)]
struct Constraint {
    /// Width available for the child's margin box.
    available: f32,
    /// Definite content height of the parent, for percentage heights.
    containing_height: Option<f32>,
    /// Border-box width imposed by the parent.
    width: Option<f32>,
    /// Border-box height imposed by the parent.
    height: Option<f32>,
}

impl Constraint {
    fn within(available: f32, containing_height: Option<f32>) -> Self {
        Self {
            available,
            containing_height,
            width: None,
            height: None,
        }
    }
}

/// Flattened child of an element: resolved components, merged text runs.
enum Item<'a> {
    Text(String),
    Element(Cow<'a, Element>),
}

#[derive(Clone, Copy)]
pub struct LayoutEngine<'a> {
    fonts: &'a FontRegistry,
    assets_dir: Option<&'a Path>,
    /// Extent of the canvas being laid out; image bitmaps never exceed it.
    canvas: (f32, f32),
}

impl<'a> LayoutEngine<'a> {
    pub fn new(fonts: &'a FontRegistry, assets_dir: Option<&'a Path>) -> Self {
        Self {
            fonts,
            assets_dir,
            canvas: (f32::INFINITY, f32::INFINITY),
        }
    }

    /// Lay out a page on a `width` x `height` canvas.
    pub fn layout_page(&self, page: &Node, width: f32, height: f32) -> LayoutBox {
        let engine = Self {
            canvas: (width, height),
            ..*self
        };
        let root = Element::new("body").children(page.clone());
        let constraint = Constraint {
            available: width,
            containing_height: Some(height),
            width: Some(width),
            height: Some(height),
        };
        engine.layout_element(&root, constraint, &TextStyle::default())
    }

    fn layout_element(&self, element: &Element, c: Constraint, inherited: &TextStyle) -> LayoutBox {
        let style = &element.props.style;
        let bs = BoxStyle::compute(style);
        if element.tag.eq_ignore_ascii_case("img") {
            return self.layout_image(element, &bs, c);
        }
        let ts = inherited.inherit(style);
        let insets = bs.insets();

        let width = c
            .width
            .or_else(|| bs.width.and_then(|w| w.resolve(Some(c.available))))
            .unwrap_or(c.available - bs.margin.horizontal())
            .max(0.0);
        let declared_height = c
            .height
            .or_else(|| bs.height.and_then(|h| h.resolve(c.containing_height)));
        let content_w = (width - insets.horizontal()).max(0.0);
        let content_h = declared_height.map(|h| (h - insets.vertical()).max(0.0));

        let items = items_of(element);
        let (mut children, used) = match bs.direction {
            Direction::Column => self.layout_column(&items, &bs, content_w, content_h, &ts),
            Direction::Row => self.layout_row(&items, &bs, content_w, content_h, &ts),
        };
        for child in &mut children {
            child.x += insets.left;
            child.y += insets.top;
        }

        let height = declared_height.unwrap_or(used + insets.vertical());
        LayoutBox {
            margin: bs.margin,
            grow: bs.grow,
            push_to_end: bs.push_to_end,
            children,
            ..LayoutBox::new(
                width,
                height,
                BoxKind::Block {
                    background: bs.background,
                    borders: bs.borders,
                },
            )
        }
    }

    // -- Column ---------------------------------------------------------------

    fn layout_column(
        &self,
        items: &[Item<'_>],
        bs: &BoxStyle,
        content_w: f32,
        content_h: Option<f32>,
        ts: &TextStyle,
    ) -> (Vec<LayoutBox>, f32) {
        let mut boxes: Vec<LayoutBox> = items
            .iter()
            .map(|item| self.layout_column_item(item, bs.align, content_w, content_h, ts))
            .collect();

        if let Some(total) = content_h {
            let free = total - stacked_height(&boxes, bs.gap);
            let grow_sum: f32 = boxes.iter().map(|b| b.grow).sum();
            if free > 0.0 && grow_sum > 0.0 {
                for (item, slot) in items.iter().zip(boxes.iter_mut()) {
                    let Item::Element(element) = item else { continue };
                    if slot.grow > 0.0 {
                        let constraint = Constraint {
                            available: content_w,
                            containing_height: content_h,
                            width: Some(slot.width),
                            height: Some(slot.height + free * slot.grow / grow_sum),
                        };
                        *slot = self.layout_element(element, constraint, ts);
                    }
                }
            }
        }

        let used = stacked_height(&boxes, bs.gap);
        let free = content_h.map_or(0.0, |h| (h - used).max(0.0));
        let (mut y, spacing) = main_axis_start(bs.justify, free, boxes.len());
        let push_index = boxes.iter().position(|b| b.push_to_end);

        for (index, slot) in boxes.iter_mut().enumerate() {
            if Some(index) == push_index && bs.justify == Justify::Start {
                y += free;
            }
            y += slot.margin.top;
            slot.y = y;
            slot.x = cross_offset(bs.align, content_w, slot.outer_width()) + slot.margin.left;
            y += slot.height + slot.margin.bottom + bs.gap + spacing;
        }
        (boxes, used)
    }

    fn layout_column_item(
        &self,
        item: &Item<'_>,
        align: Align,
        content_w: f32,
        content_h: Option<f32>,
        ts: &TextStyle,
    ) -> LayoutBox {
        let shrink = align != Align::Start;
        match item {
            Item::Text(text) => self.layout_text(text, content_w, ts, shrink),
            Item::Element(element) => {
                let mut constraint = Constraint::within(content_w, content_h);
                let declared = BoxStyle::compute(&element.props.style);
                if shrink && declared.width.is_none() {
                    let room = (content_w - declared.margin.horizontal()).max(0.0);
                    constraint.width = Some(self.intrinsic_width(element, ts).min(room));
                }
                self.layout_element(element, constraint, ts)
            }
        }
    }

    // -- Row ------------------------------------------------------------------

    fn layout_row(
        &self,
        items: &[Item<'_>],
        bs: &BoxStyle,
        content_w: f32,
        content_h: Option<f32>,
        ts: &TextStyle,
    ) -> (Vec<LayoutBox>, f32) {
        struct Slot {
            margin: Edges,
            fixed: Option<f32>,
            grow: f32,
            intrinsic: f32,
        }

        let slots: Vec<Slot> = items
            .iter()
            .map(|item| match item {
                Item::Text(text) => Slot {
                    margin: Edges::default(),
                    fixed: None,
                    grow: 0.0,
                    intrinsic: self.measure(text, ts),
                },
                Item::Element(element) => {
                    let child = BoxStyle::compute(&element.props.style);
                    let fixed = child.width.and_then(|w| w.resolve(Some(content_w)));
                    let intrinsic = if fixed.is_none() && child.grow == 0.0 {
                        self.intrinsic_width(element, ts)
                    } else {
                        0.0
                    };
                    Slot {
                        margin: child.margin,
                        fixed,
                        grow: child.grow,
                        intrinsic,
                    }
                }
            })
            .collect();

        let gaps = bs.gap * items.len().saturating_sub(1) as f32;
        let margins: f32 = slots.iter().map(|s| s.margin.horizontal()).sum();
        let available = content_w - gaps - margins;
        let fixed_sum: f32 = slots.iter().filter_map(|s| s.fixed).sum();
        let intrinsic_sum: f32 = slots.iter().map(|s| s.intrinsic).sum();
        let grow_sum: f32 = slots.iter().map(|s| s.grow).sum();
        let remaining = available - fixed_sum - intrinsic_sum;

        let mut boxes = Vec::with_capacity(items.len());
        for (item, slot) in items.iter().zip(&slots) {
            let width = if let Some(fixed) = slot.fixed {
                fixed
            } else if slot.grow > 0.0 {
                remaining.max(0.0) * slot.grow / grow_sum
            } else if remaining < 0.0 && intrinsic_sum > 0.0 {
                (slot.intrinsic + remaining * slot.intrinsic / intrinsic_sum).max(0.0)
            } else {
                slot.intrinsic
            };
            boxes.push(match item {
                Item::Text(text) => self.layout_text(text, width, ts, false),
                Item::Element(element) => {
                    let constraint = Constraint {
                        available: width + slot.margin.horizontal(),
                        containing_height: content_h,
                        width: Some(width),
                        height: None,
                    };
                    self.layout_element(element, constraint, ts)
                }
            });
        }

        let tallest = boxes.iter().map(LayoutBox::outer_height).fold(0.0, f32::max);
        let cross = content_h.unwrap_or(tallest);
        let used_w: f32 = boxes.iter().map(LayoutBox::outer_width).sum::<f32>() + gaps;
        let free = (content_w - used_w).max(0.0);
        let (mut x, spacing) = main_axis_start(bs.justify, free, boxes.len());

        for slot in &mut boxes {
            x += slot.margin.left;
            slot.x = x;
            slot.y = cross_offset(bs.align, cross, slot.outer_height()) + slot.margin.top;
            x += slot.width + slot.margin.right + bs.gap + spacing;
        }
        (boxes, tallest)
    }

    // -- Intrinsic sizes ------------------------------------------------------

    /// Border-box width of `element` with no line breaking.
    fn intrinsic_width(&self, element: &Element, inherited: &TextStyle) -> f32 {
        let bs = BoxStyle::compute(&element.props.style);
        if let Some(Length::Px(px)) = bs.width {
            return px;
        }
        if element.tag.eq_ignore_ascii_case("img") {
            return 0.0;
        }
        let ts = inherited.inherit(&element.props.style);
        let items = items_of(element);
        let widths = items.iter().map(|item| match item {
            Item::Text(text) => self.measure(text, &ts),
            Item::Element(child) => {
                let margin = BoxStyle::compute(&child.props.style).margin;
                self.intrinsic_width(child, &ts) + margin.horizontal()
            }
        });
        let content = match bs.direction {
            Direction::Row => {
                widths.sum::<f32>() + bs.gap * items.len().saturating_sub(1) as f32
            }
            Direction::Column => widths.fold(0.0, f32::max),
        };
        content + bs.insets().horizontal()
    }

    // -- Text -----------------------------------------------------------------

    fn measure(&self, text: &str, ts: &TextStyle) -> f32 {
        let face = self.fonts.lookup(ts.family.as_deref(), ts.weight, ts.italic);
        self.text_width(face, &transform(text, ts), ts.font_size)
    }

    fn text_width(&self, face: Option<usize>, text: &str, size: f32) -> f32 {
        match face.and_then(|index| self.fonts.face(index)) {
            Some(face) => face.text_width(text, size),
            None => ESTIMATED_ADVANCE * size * text.chars().count() as f32,
        }
    }

    /// Wrap `text` into lines no wider than `max_w`. With `shrink` the box
    /// takes the width of its widest line instead of all of `max_w`.
    fn layout_text(&self, text: &str, max_w: f32, ts: &TextStyle, shrink: bool) -> LayoutBox {
        let text = transform(text, ts);
        let face = self.fonts.lookup(ts.family.as_deref(), ts.weight, ts.italic);
        let size = ts.font_size;

        let wrapped = wrap_words(&text, max_w, |candidate| self.text_width(face, candidate, size));
        let widths: Vec<f32> = wrapped
            .iter()
            .map(|line| self.text_width(face, line, size))
            .collect();
        let widest = widths.iter().copied().fold(0.0, f32::max);
        let width = if shrink { widest.min(max_w.max(0.0)) } else { max_w.max(0.0) };

        let line_height = ts.line_height_px();
        let (ascent, descent) = face
            .and_then(|index| self.fonts.face(index))
            .map_or((0.8 * size, -0.2 * size), |face| face.v_metrics(size));
        let half_leading = (line_height - (ascent - descent)) / 2.0;

        let lines = wrapped
            .into_iter()
            .zip(widths)
            .enumerate()
            .map(|(index, (text, line_w))| TextLine {
                text,
                x: match ts.align {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => (width - line_w) / 2.0,
                    TextAlign::Right => width - line_w,
                },
                baseline: index as f32 * line_height + half_leading + ascent,
            })
            .collect::<Vec<_>>();

        let height = lines.len() as f32 * line_height;
        LayoutBox::new(
            width,
            height,
            BoxKind::Text {
                lines,
                style: ts.clone(),
                face,
            },
        )
    }

    // -- Images ---------------------------------------------------------------

    fn layout_image(&self, element: &Element, bs: &BoxStyle, c: Constraint) -> LayoutBox {
        let declared_w = c
            .width
            .or_else(|| bs.width.and_then(|w| w.resolve(Some(c.available))));
        let declared_h = c
            .height
            .or_else(|| bs.height.and_then(|h| h.resolve(c.containing_height)));

        let loaded = element
            .props
            .attr_str("src")
            .and_then(|src| self.resolve_asset(src))
            .and_then(|path| match ImageProcessor::open(&path) {
                Ok(image) => Some(image),
                Err(err) => {
                    warn!(%err, "Skipping unreadable image");
                    None
                }
            });
        let (natural_w, natural_h) = loaded
            .as_ref()
            .map_or((0.0, 0.0), |image| (image.width() as f32, image.height() as f32));

        let (width, height) = match (declared_w, declared_h) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) if natural_w > 0.0 => (w, w * natural_h / natural_w),
            (None, Some(h)) if natural_h > 0.0 => (h * natural_w / natural_h, h),
            (Some(w), None) => (w, 0.0),
            (None, Some(h)) => (0.0, h),
            (None, None) => {
                let room = c.available - bs.margin.horizontal();
                let scale = if natural_w > room && natural_w > 0.0 { room / natural_w } else { 1.0 };
                (natural_w * scale, natural_h * scale)
            }
        };

        let (canvas_w, canvas_h) = self.canvas;
        let oversized = width > canvas_w || height > canvas_h;
        if oversized && loaded.is_some() {
            warn!(width, height, canvas_w, canvas_h, "Image larger than the canvas; not drawn");
        }
        let image = loaded
            .filter(|_| width >= 1.0 && height >= 1.0 && !oversized)
            .map(|image| {
                image
                    .resize_exact(width.round() as u32, height.round() as u32)
                    .into_dynamic()
            });
        LayoutBox {
            margin: bs.margin,
            grow: bs.grow,
            push_to_end: bs.push_to_end,
            ..LayoutBox::new(width.max(0.0), height.max(0.0), BoxKind::Image { image })
        }
    }

    /// Asset path for an `img` source. Remote sources are not fetched.
    fn resolve_asset(&self, src: &str) -> Option<PathBuf> {
        if src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:") {
            debug!(src, "Remote image sources are not fetched");
            return None;
        }
        let path = self.assets_dir?.join(src.trim_start_matches('/'));
        if path.is_file() {
            Some(path)
        } else {
            debug!(path = %path.display(), "Image asset not found");
            None
        }
    }
}

// -- Helpers --------------------------------------------------------------------

fn transform<'t>(text: &'t str, ts: &TextStyle) -> Cow<'t, str> {
    if ts.uppercase {
        Cow::Owned(text.to_uppercase())
    } else {
        Cow::Borrowed(text)
    }
}

/// Children of an element with components resolved, lists flattened, and
/// adjacent text leaves merged into whitespace-collapsed runs.
fn items_of(element: &Element) -> Vec<Item<'_>> {
    let mut items = Vec::new();
    collect_items(&element.props.children, &mut items);
    items
        .into_iter()
        .filter_map(|item| match item {
            Item::Text(text) => {
                let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
                (!collapsed.is_empty()).then_some(Item::Text(collapsed))
            }
            element => Some(element),
        })
        .collect()
}

fn collect_items<'a>(node: &'a Node, out: &mut Vec<Item<'a>>) {
    match node {
        Node::Empty => {}
        Node::Text(text) => push_text(out, text),
        Node::Number(value) => push_text(out, &value.to_string()),
        Node::List(nodes) => nodes.iter().for_each(|child| collect_items(child, out)),
        Node::Element(element) => out.push(Item::Element(Cow::Borrowed(element))),
        Node::Component(component) => collect_owned(component.resolve(), out),
    }
}

fn collect_owned(node: Node, out: &mut Vec<Item<'_>>) {
    match node {
        Node::Empty => {}
        Node::Text(text) => push_text(out, &text),
        Node::Number(value) => push_text(out, &value.to_string()),
        Node::List(nodes) => nodes.into_iter().for_each(|child| collect_owned(child, out)),
        Node::Element(element) => out.push(Item::Element(Cow::Owned(element))),
        Node::Component(component) => collect_owned(component.resolve(), out),
    }
}

fn push_text(out: &mut Vec<Item<'_>>, text: &str) {
    if let Some(Item::Text(run)) = out.last_mut() {
        run.push_str(text);
    } else {
        out.push(Item::Text(text.to_owned()));
    }
}

/// Greedy word wrap. A word wider than `max_w` gets a line of its own.
fn wrap_words(text: &str, max_w: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_w + FIT_EPSILON {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn stacked_height(boxes: &[LayoutBox], gap: f32) -> f32 {
    let gaps = gap * boxes.len().saturating_sub(1) as f32;
    boxes.iter().map(LayoutBox::outer_height).sum::<f32>() + gaps
}

/// Leading offset and extra spacing between items on the main axis.
fn main_axis_start(justify: Justify, free: f32, count: usize) -> (f32, f32) {
    match justify {
        Justify::Start => (0.0, 0.0),
        Justify::Center => (free / 2.0, 0.0),
        Justify::End => (free, 0.0),
        Justify::SpaceBetween if count > 1 => (0.0, free / (count - 1) as f32),
        Justify::SpaceBetween => (0.0, 0.0),
        Justify::SpaceAround if count > 0 => {
            let share = free / count as f32;
            (share / 2.0, share)
        }
        Justify::SpaceAround => (0.0, 0.0),
    }
}

fn cross_offset(align: Align, container: f32, outer: f32) -> f32 {
    match align {
        Align::Start => 0.0,
        Align::Center => ((container - outer) / 2.0).max(0.0),
        Align::End => (container - outer).max(0.0),
    }
}
