// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: assembles rendered page images into one PDF using `printpdf` 0.8.
//
// Each page is a full-bleed raster image. When a text layer is supplied it is
// drawn underneath in 1pt white Helvetica: invisible on paper, but selectable
// and readable by applicant tracking systems that parse the PDF text.
//
// printpdf 0.8 uses a data-oriented API: pages are `PdfPage` structs holding
// `Vec<Op>` operation lists, serialised once via `PdfDocument::save()`.

use std::path::Path;

use folio_core::PaperSize;
use folio_core::error::{FolioError, Result};
use image::DynamicImage;
use printpdf::{
    BuiltinFont, Color, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    RawImage, RawImageData, RawImageFormat, Rgb, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

/// Font size of the hidden text layer.
pub const TEXT_LAYER_FONT_SIZE_PT: f32 = 1.0;
const TEXT_LAYER_LINE_HEIGHT_PT: f32 = 1.2;
const TEXT_LAYER_MARGIN_PT: f32 = 2.0;

/// Builds a multi-page PDF, one rendered page image per PDF page.
pub struct PdfWriter {
    paper_size: PaperSize,
    doc: PdfDocument,
    pages: Vec<PdfPage>,
}

impl PdfWriter {
    /// Create a writer for the given paper size; `title` goes into the PDF
    /// metadata.
    pub fn new(paper_size: PaperSize, title: &str) -> Self {
        Self {
            paper_size,
            doc: PdfDocument::new(title),
            pages: Vec::new(),
        }
    }

    pub fn a4(title: &str) -> Self {
        Self::new(PaperSize::A4, title)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    // -- Pages ----------------------------------------------------------------

    /// Append a page showing `image` stretched over the whole sheet.
    ///
    /// `text_layer` lines are written bottom-up from the lower margin so the
    /// block reads top to bottom; long lines are wrapped to the page width.
    #[instrument(skip_all, fields(page = self.pages.len() + 1))]
    pub fn add_page(&mut self, image: &DynamicImage, text_layer: Option<&str>) -> Result<()> {
        let (img_w, img_h) = (image.width(), image.height());
        if img_w == 0 || img_h == 0 {
            return Err(FolioError::PdfError(format!(
                "cannot place an empty {img_w}x{img_h} image"
            )));
        }

        let (page_w, page_h) = self.page_dimensions();
        let (page_w_pt, page_h_pt) = (page_w.into_pt().0, page_h.into_pt().0);

        let raw = RawImage {
            pixels: RawImageData::U8(image.to_rgb8().into_raw()),
            width: img_w as usize,
            height: img_h as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // Pick the DPI that maps the image width onto the page width, then
        // stretch vertically for any aspect mismatch.
        let dpi = img_w as f32 * 72.0 / page_w_pt;
        let native_h_pt = img_h as f32 / dpi * 72.0;
        let scale_y = page_h_pt / native_h_pt;

        let mut ops = Vec::new();
        if let Some(text) = text_layer.filter(|text| !text.trim().is_empty()) {
            ops.extend(text_layer_ops(text, page_w_pt, page_h_pt));
        }
        ops.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(1.0),
                scale_y: Some(scale_y),
                dpi: Some(dpi),
                rotate: None,
            },
        });

        debug!(img_w, img_h, dpi, scale_y, ops = ops.len(), "Page composed");
        self.pages.push(PdfPage::new(page_w, page_h, ops));
        Ok(())
    }

    // -- Output ---------------------------------------------------------------

    /// Serialise the document. A writer with no pages yields one blank page.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pages.is_empty() {
            let (page_w, page_h) = self.page_dimensions();
            self.pages.push(PdfPage::new(page_w, page_h, Vec::new()));
        }
        let page_count = self.pages.len();
        self.doc.with_pages(self.pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings");
        }
        info!(pages = page_count, bytes = bytes.len(), "PDF assembled");
        bytes
    }

    /// Serialise and write to `path`, creating parent directories.
    pub fn write_to_file(self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = self.finish();
        std::fs::write(path, &bytes)?;
        info!("Wrote PDF to {}", path.display());
        Ok(())
    }
}

/// Operations drawing `text` as white 1pt Helvetica at the bottom of a page.
fn text_layer_ops(text: &str, page_w_pt: f32, page_h_pt: f32) -> Vec<Op> {
    // Average Helvetica glyph width is roughly half the font size.
    let avg_char_width_pt = 0.5 * TEXT_LAYER_FONT_SIZE_PT;
    let usable_w_pt = page_w_pt - 2.0 * TEXT_LAYER_MARGIN_PT;
    let max_chars = ((usable_w_pt / avg_char_width_pt) as usize).max(1);

    let lines = wrap_text(text, max_chars);
    let max_lines = ((page_h_pt - 2.0 * TEXT_LAYER_MARGIN_PT) / TEXT_LAYER_LINE_HEIGHT_PT) as usize;
    if lines.len() > max_lines {
        warn!(lines = lines.len(), max_lines, "Text layer taller than the page; truncating");
    }
    let lines = &lines[..lines.len().min(max_lines)];

    let mut ops = vec![Op::SetFillColor {
        col: Color::Rgb(Rgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            icc_profile: None,
        }),
    }];
    let count = lines.len();
    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y_pt = TEXT_LAYER_MARGIN_PT + (count - 1 - index) as f32 * TEXT_LAYER_LINE_HEIGHT_PT;
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(TEXT_LAYER_MARGIN_PT),
                y: Pt(y_pt),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(TEXT_LAYER_FONT_SIZE_PT),
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(line.clone())],
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::EndTextSection);
    }
    ops
}

// -- Text wrapping helper -----------------------------------------------------

/// Wrap a multi-line string so that no line exceeds `max_width` characters.
///
/// Existing newlines are kept (blank lines included). Words longer than
/// `max_width` are force-broken on character boundaries.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if word_len > max_width {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                }
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_width).peekable();
                while let Some(chunk) = chunks.next() {
                    let piece: String = chunk.iter().collect();
                    if chunks.peek().is_some() {
                        result.push(piece);
                    } else {
                        current_len = chunk.len();
                        current = piece;
                    }
                }
            } else if current.is_empty() {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                result.push(std::mem::replace(&mut current, word.to_owned()));
                current_len = word_len;
            }
        }

        result.push(current);
    }

    result
}
