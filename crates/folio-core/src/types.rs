// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Folio page pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identity of a discovered page: its numeric order prefix and its name.
///
/// `1-home.json` becomes `PageId { order: 1, name: "home" }`, displayed as
/// `1-home`. The display form names every per-page artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId {
    pub order: u32,
    pub name: String,
}

impl PageId {
    pub fn new(order: u32, name: impl Into<String>) -> Self {
        Self {
            order,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.order, self.name)
    }
}

/// A page definition file found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPage {
    pub id: PageId,
    pub path: PathBuf,
}

/// Pixel dimensions of the raster canvas a page is rendered onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A4 at 300 dpi.
    pub fn a4_300dpi() -> Self {
        Self::new(2480, 3508)
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Tabloid => (279, 432),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// Dimensions in PostScript points (1/72 inch), rounded to whole points.
    pub fn dimensions_pt(&self) -> (u32, u32) {
        let (w, h) = self.dimensions_mm();
        let to_pt = |mm: u32| (mm as f64 * 72.0 / 25.4).round() as u32;
        (to_pt(w), to_pt(h))
    }
}
