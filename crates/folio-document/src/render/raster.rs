// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster renderer: paints laid-out boxes onto an RGBA canvas.
//
// Backgrounds and borders are filled rectangles (`imageproc`), text is
// rasterised glyph by glyph with `rusttype` coverage blended over the
// canvas, and images are composited with `image::imageops::overlay`.

use std::path::PathBuf;

use folio_core::error::{FolioError, Result};
use folio_core::{CanvasSize, Node};
use image::{DynamicImage, Rgba, RgbaImage, imageops};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use rusttype::{Scale, point};
use tracing::{debug, instrument};

use crate::render::PageRenderer;
use crate::render::fonts::{FontFace, FontRegistry};
use crate::render::layout::{BoxKind, LayoutBox, LayoutEngine};
use crate::render::style::{Borders, TextStyle};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Renders page trees to images with the bundled layout engine.
pub struct RasterRenderer {
    fonts: FontRegistry,
    background: Rgba<u8>,
    assets_dir: Option<PathBuf>,
}

impl RasterRenderer {
    pub fn new(fonts: FontRegistry) -> Self {
        Self {
            fonts,
            background: WHITE,
            assets_dir: None,
        }
    }

    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    /// Directory `img` sources are resolved against.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Box tree of `page` on `canvas`, before painting.
    pub fn layout(&self, page: &Node, canvas: &CanvasSize) -> LayoutBox {
        LayoutEngine::new(&self.fonts, self.assets_dir.as_deref()).layout_page(
            page,
            canvas.width as f32,
            canvas.height as f32,
        )
    }

    fn paint(&self, canvas: &mut RgbaImage, layout: &LayoutBox, origin_x: f32, origin_y: f32) {
        let x = origin_x + layout.x;
        let y = origin_y + layout.y;

        match &layout.kind {
            BoxKind::Block { background, borders } => {
                if let Some(color) = background {
                    fill_rect(canvas, x, y, layout.width, layout.height, *color);
                }
                paint_borders(canvas, x, y, layout.width, layout.height, borders);
            }
            BoxKind::Text { lines, style, face } => {
                if let Some(face) = face.and_then(|index| self.fonts.face(index)) {
                    for line in lines {
                        draw_text(canvas, face, style, x + line.x, y + line.baseline, &line.text);
                    }
                }
            }
            BoxKind::Image { image: Some(image) } => {
                imageops::overlay(canvas, &image.to_rgba8(), x.round() as i64, y.round() as i64);
            }
            BoxKind::Image { image: None } => {}
        }

        for child in &layout.children {
            self.paint(canvas, child, x, y);
        }
    }
}

impl PageRenderer for RasterRenderer {
    #[instrument(skip_all, fields(width = canvas.width, height = canvas.height))]
    fn render(&self, page: &Node, canvas: &CanvasSize) -> Result<DynamicImage> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(FolioError::Render(format!(
                "canvas must be non-empty, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        let root = self.layout(page, canvas);
        let mut image = RgbaImage::from_pixel(canvas.width, canvas.height, self.background);
        self.paint(&mut image, &root, 0.0, 0.0);
        debug!(content_height = root.height, "Page rasterised");
        Ok(DynamicImage::ImageRgba8(image))
    }
}

// -- Drawing primitives ---------------------------------------------------------

/// Alpha-blend `color` over `pixel` with the given coverage.
fn blend(pixel: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let alpha = (coverage * color[3] as f32 / 255.0).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    for channel in 0..3 {
        let mixed = color[channel] as f32 * alpha + pixel[channel] as f32 * (1.0 - alpha);
        pixel[channel] = mixed.round() as u8;
    }
    let out_alpha = 255.0 * alpha + pixel[3] as f32 * (1.0 - alpha);
    pixel[3] = out_alpha.round() as u8;
}

/// Fill the pixel-snapped rectangle, clipped to the canvas.
fn fill_rect(canvas: &mut RgbaImage, x: f32, y: f32, width: f32, height: f32, color: Rgba<u8>) {
    let x0 = x.round().max(0.0);
    let y0 = y.round().max(0.0);
    let x1 = (x + width).round().min(canvas.width() as f32);
    let y1 = (y + height).round().min(canvas.height() as f32);
    if x1 <= x0 || y1 <= y0 || color[3] == 0 {
        return;
    }

    if color[3] == 255 {
        let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(canvas, rect, color);
    } else {
        for py in y0 as u32..y1 as u32 {
            for px in x0 as u32..x1 as u32 {
                blend(canvas.get_pixel_mut(px, py), color, 1.0);
            }
        }
    }
}

fn paint_borders(canvas: &mut RgbaImage, x: f32, y: f32, width: f32, height: f32, borders: &Borders) {
    let sides = [
        (borders.top, x, y, width, borders.top.width),
        (borders.bottom, x, y + height - borders.bottom.width, width, borders.bottom.width),
        (borders.left, x, y, borders.left.width, height),
        (borders.right, x + width - borders.right.width, y, borders.right.width, height),
    ];
    for (side, sx, sy, sw, sh) in sides {
        if let Some(color) = side.color.filter(|_| side.width > 0.0) {
            fill_rect(canvas, sx, sy, sw, sh, color);
        }
    }
}

/// Draw one line of text with its baseline at `baseline`.
fn draw_text(canvas: &mut RgbaImage, face: &FontFace, style: &TextStyle, x: f32, baseline: f32, text: &str) {
    let (canvas_w, canvas_h) = canvas.dimensions();
    let scale = Scale::uniform(style.font_size);
    for glyph in face.font().layout(text, scale, point(x, baseline)) {
        let Some(bounds) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = bounds.min.x + gx as i32;
            let py = bounds.min.y + gy as i32;
            if px >= 0 && py >= 0 && (px as u32) < canvas_w && (py as u32) < canvas_h {
                blend(canvas.get_pixel_mut(px as u32, py as u32), style.color, coverage);
            }
        });
    }
}
