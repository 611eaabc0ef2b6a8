// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-document: everything between a page tree and the finished PDF.
//
// Loads fonts, lays out and rasterises pages, encodes page images (PNG,
// WebP), and assembles them into one PDF with an invisible text layer per
// page.

pub mod image;
pub mod pdf;
pub mod render;

// Re-export the primary structs so callers can use `folio_document::PdfWriter` etc.
pub use image::processor::ImageProcessor;
pub use pdf::writer::PdfWriter;
pub use render::{FontRegistry, PageRenderer, RasterRenderer};
