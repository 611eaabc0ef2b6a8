// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Computed style: turns authored inline styles into the numbers the layout
// engine works with: colors, lengths, box edges, flex settings, and the
// inherited text properties.

use folio_core::node::{Style, StyleValue, parse_leading_number};
use image::Rgba;

pub const DEFAULT_FONT_SIZE: f32 = 16.0;
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

// -- Colors -------------------------------------------------------------------

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Anything else is `None`.
pub fn parse_color(input: &str) -> Option<Rgba<u8>> {
    let hex = input.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, digit) in rgb.iter_mut().zip(hex.chars()) {
                let value = digit.to_digit(16)? as u8;
                *slot = value * 17;
            }
            Some(Rgba([rgb[0], rgb[1], rgb[2], 255]))
        }
        6 | 8 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            let a = if hex.len() == 8 { channel(&hex[6..8])? } else { 255 };
            Some(Rgba([r, g, b, a]))
        }
        _ => None,
    }
}

// -- Lengths ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    pub fn parse(value: &StyleValue) -> Option<Self> {
        if value.is_percent() {
            return value.as_number().map(|n| Self::Percent(n as f32));
        }
        value.as_number().map(|n| Self::Px(n as f32))
    }

    /// Absolute length; percentages need a definite `base`.
    pub fn resolve(self, base: Option<f32>) -> Option<f32> {
        match self {
            Self::Px(px) => Some(px),
            Self::Percent(pct) => base.map(|base| base * pct / 100.0),
        }
    }
}

fn length_px(token: &str) -> f32 {
    parse_leading_number(token).map_or(0.0, |n| n as f32)
}

/// Four box edges, in CSS order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// CSS shorthand: one to four space-separated lengths. `auto` counts as
    /// zero.
    pub fn parse_shorthand(value: &str) -> Self {
        let parts: Vec<f32> = value.split_whitespace().map(length_px).collect();
        match parts.as_slice() {
            [all] => Self::uniform(*all),
            [vertical, horizontal] => Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            },
            [top, horizontal, bottom] => Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            },
            [top, right, bottom, left, ..] => Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            },
            [] => Self::default(),
        }
    }

    /// Shorthand property `name` overridden by `nameTop`, `nameRight` …
    fn from_style(style: &Style, name: &str) -> Self {
        let mut edges = style
            .get_text(name)
            .map(|value| Self::parse_shorthand(&value))
            .unwrap_or_default();
        for (side, slot) in [
            ("Top", &mut edges.top),
            ("Right", &mut edges.right),
            ("Bottom", &mut edges.bottom),
            ("Left", &mut edges.left),
        ] {
            if let Some(value) = style.get_number(&format!("{name}{side}")) {
                *slot = value as f32;
            }
        }
        edges
    }
}

/// One border side: width and color.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BorderSide {
    pub width: f32,
    pub color: Option<Rgba<u8>>,
}

impl BorderSide {
    /// Parse `"8px solid #2d3748"`; tokens may come in any order.
    pub fn parse(value: &str) -> Self {
        let mut side = Self::default();
        for token in value.split_whitespace() {
            if let Some(color) = parse_color(token) {
                side.color = Some(color);
            } else if let Some(width) = parse_leading_number(token) {
                side.width = width as f32;
            } else if token == "none" {
                side.width = 0.0;
            }
        }
        if side.color.is_none() && side.width > 0.0 {
            side.color = Some(BLACK);
        }
        side
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Borders {
    pub top: BorderSide,
    pub right: BorderSide,
    pub bottom: BorderSide,
    pub left: BorderSide,
}

impl Borders {
    fn from_style(style: &Style) -> Self {
        let all = style
            .get_text("border")
            .map(|value| BorderSide::parse(&value))
            .unwrap_or_default();
        let side = |name: &str| {
            style
                .get_text(name)
                .map_or(all, |value| BorderSide::parse(&value))
        };
        Self {
            top: side("borderTop"),
            right: side("borderRight"),
            bottom: side("borderBottom"),
            left: side("borderLeft"),
        }
    }

    pub fn widths(&self) -> Edges {
        Edges {
            top: self.top.width,
            right: self.right.width,
            bottom: self.bottom.width,
            left: self.left.width,
        }
    }
}

// -- Box style ----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Row,
    Column,
}

/// Main-axis distribution (`justifyContent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
}

/// Cross-axis placement (`alignItems`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

/// Non-inherited box properties of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub margin: Edges,
    pub padding: Edges,
    pub borders: Borders,
    pub background: Option<Rgba<u8>>,
    pub direction: Direction,
    pub justify: Justify,
    pub align: Align,
    pub gap: f32,
    pub grow: f32,
    /// `marginTop: auto` pushes the box to the end of a column.
    pub push_to_end: bool,
}

impl BoxStyle {
    pub fn compute(style: &Style) -> Self {
        let direction = match (
            style.get_text("display").as_deref(),
            style.get_text("flexDirection").as_deref(),
        ) {
            (Some("flex"), Some("column")) => Direction::Column,
            (Some("flex"), _) => Direction::Row,
            _ => Direction::Column,
        };
        let justify = match style.get_text("justifyContent").as_deref() {
            Some("center") => Justify::Center,
            Some("flex-end" | "end") => Justify::End,
            Some("space-between") => Justify::SpaceBetween,
            Some("space-around" | "space-evenly") => Justify::SpaceAround,
            _ => Justify::Start,
        };
        let align = match style.get_text("alignItems").as_deref() {
            Some("center") => Align::Center,
            Some("flex-end" | "end") => Align::End,
            _ => Align::Start,
        };
        Self {
            width: style.width.as_ref().and_then(Length::parse),
            height: style.height.as_ref().and_then(Length::parse),
            margin: Edges::from_style(style, "margin"),
            padding: Edges::from_style(style, "padding"),
            borders: Borders::from_style(style),
            background: style
                .get_text("backgroundColor")
                .and_then(|value| parse_color(&value)),
            direction,
            justify,
            align,
            gap: style.get_number("gap").unwrap_or(0.0) as f32,
            grow: style.get_number("flex").unwrap_or(0.0).max(0.0) as f32,
            push_to_end: style.get_text("marginTop").as_deref() == Some("auto"),
        }
    }

    /// Padding plus border on each side.
    pub fn insets(&self) -> Edges {
        let border = self.borders.widths();
        Edges {
            top: self.padding.top + border.top,
            right: self.padding.right + border.right,
            bottom: self.padding.bottom + border.bottom,
            left: self.padding.left + border.left,
        }
    }
}

// -- Inherited text style -----------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHeight {
    /// Multiple of the font size.
    Factor(f32),
    Px(f32),
}

/// Text properties that flow from an element to its descendants.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub weight: u16,
    pub italic: bool,
    pub family: Option<String>,
    pub color: Rgba<u8>,
    pub line_height: LineHeight,
    pub align: TextAlign,
    pub uppercase: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            weight: 400,
            italic: false,
            family: None,
            color: BLACK,
            line_height: LineHeight::Factor(DEFAULT_LINE_HEIGHT),
            align: TextAlign::Left,
            uppercase: false,
        }
    }
}

impl TextStyle {
    /// The style a child sees: this style overridden by whatever `style`
    /// declares.
    pub fn inherit(&self, style: &Style) -> Self {
        let mut next = self.clone();
        if let Some(size) = style.font_size.as_ref().and_then(StyleValue::as_number) {
            next.font_size = size as f32;
        }
        if let Some(weight) = style.font_weight.as_ref() {
            next.weight = parse_weight(&weight.as_text()).unwrap_or(next.weight);
        }
        if let Some(font_style) = style.get_text("fontStyle") {
            next.italic = font_style == "italic";
        }
        if let Some(family) = style.get_text("fontFamily") {
            let first = family.split(',').next().unwrap_or_default();
            let name = first.trim().trim_matches(|c| c == '"' || c == '\'');
            if !name.is_empty() {
                next.family = Some(name.to_owned());
            }
        }
        if let Some(color) = style.get_text("color").and_then(|value| parse_color(&value)) {
            next.color = color;
        }
        if let Some(value) = style.get("lineHeight") {
            let is_px = matches!(value, StyleValue::Text(text) if text.trim_end().ends_with("px"));
            if let Some(number) = value.as_number() {
                next.line_height = if is_px {
                    LineHeight::Px(number as f32)
                } else {
                    LineHeight::Factor(number as f32)
                };
            }
        }
        match style.get_text("textAlign").as_deref() {
            Some("center") => next.align = TextAlign::Center,
            Some("right" | "end") => next.align = TextAlign::Right,
            Some("left" | "start") => next.align = TextAlign::Left,
            _ => {}
        }
        match style.get_text("textTransform").as_deref() {
            Some("uppercase") => next.uppercase = true,
            Some("none") => next.uppercase = false,
            _ => {}
        }
        next
    }

    pub fn line_height_px(&self) -> f32 {
        match self.line_height {
            LineHeight::Factor(factor) => factor * self.font_size,
            LineHeight::Px(px) => px,
        }
    }
}

/// Numeric weight of a `fontWeight` value.
pub fn parse_weight(value: &str) -> Option<u16> {
    match value.trim() {
        "normal" => Some(400),
        "bold" => Some(700),
        "lighter" => Some(300),
        "bolder" => Some(800),
        other => parse_leading_number(other).map(|n| n.clamp(1.0, 1000.0) as u16),
    }
}
