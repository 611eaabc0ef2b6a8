// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: loads, resizes, and encodes page images. Operates on
// in-memory images using the `image` crate.

use std::path::Path;

use folio_core::error::{FolioError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

/// Wraps a single in-memory image.
///
/// Transformations consume `self` and return a new processor, so calls chain:
///
/// ```ignore
/// ImageProcessor::from_dynamic(page)
///     .resize_to_width(1240)
///     .save("dist/pages/1-home.webp")?;
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            FolioError::ImageError(format!("failed to open {}: {err}", path.as_ref().display()))
        })?;
        debug!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Scale to `width` pixels wide, preserving aspect ratio.
    ///
    /// Never upscales; a width of zero or one at least as wide as the image
    /// leaves it untouched.
    #[instrument(skip(self))]
    pub fn resize_to_width(self, width: u32) -> Self {
        let (from_w, from_h) = (self.image.width(), self.image.height());
        if width == 0 || width >= from_w {
            return self;
        }
        let height = ((from_h as f64 * width as f64 / from_w as f64).round() as u32).max(1);
        info!(from_w, from_h, width, height, "Resizing image");
        Self {
            image: self.image.resize_exact(width, height, FilterType::Lanczos3),
        }
    }

    /// Resize to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        Self {
            image: self.image.resize_exact(width, height, FilterType::Lanczos3),
        }
    }

    // -- Output ---------------------------------------------------------------

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Encode as lossless WebP. The encoder takes 8-bit RGB(A) only.
    pub fn to_webp_bytes(&self) -> Result<Vec<u8>> {
        let rgba = DynamicImage::ImageRgba8(self.image.to_rgba8());
        encode_to_format(&rgba, ImageFormat::WebP)
    }

    /// Write the image to a file. The format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path).map_err(|err| {
            FolioError::ImageError(format!("unsupported output {}: {err}", path.display()))
        })?;
        let bytes = match format {
            ImageFormat::WebP => self.to_webp_bytes()?,
            other => encode_to_format(&self.image, other)?,
        };
        std::fs::write(path, &bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "Image saved");
        Ok(())
    }
}

/// Encode a `DynamicImage` into the given format.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| FolioError::ImageError(format!("{format:?} encoding failed: {err}")))?;
    Ok(buffer)
}
