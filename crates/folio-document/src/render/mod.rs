// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render module: page trees to raster images.

pub mod fonts;
pub mod layout;
pub mod raster;
pub mod style;

use folio_core::error::Result;
use folio_core::{CanvasSize, Node};
use image::DynamicImage;

pub use fonts::{FontFace, FontRegistry};
pub use layout::{BoxKind, LayoutBox, LayoutEngine};
pub use raster::RasterRenderer;

/// Turns a page tree into a raster image of exactly `canvas` size.
pub trait PageRenderer {
    fn render(&self, page: &Node, canvas: &CanvasSize) -> Result<DynamicImage>;
}
