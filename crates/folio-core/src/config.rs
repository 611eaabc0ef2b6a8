// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::types::{CanvasSize, PaperSize};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "folio.json";

/// Pipeline settings. Every field has a default so a partial `folio.json`
/// is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `<order>-<name>.json` page definitions.
    pub pages_dir: PathBuf,
    /// Directory of font families (one sub-directory per family).
    pub fonts_dir: PathBuf,
    /// Directory `img` sources are resolved against.
    pub assets_dir: PathBuf,
    /// Directory receiving `pages/*.webp`, `pages/*.txt` and `output.pdf`.
    pub output_dir: PathBuf,
    /// Raster canvas width in pixels.
    pub canvas_width: u32,
    /// Raster canvas height in pixels.
    pub canvas_height: u32,
    /// PDF page size.
    pub paper_size: PaperSize,
    /// Page background colour (`#rrggbb`).
    pub background: String,
    /// Title written into the PDF metadata.
    pub title: String,
    /// Draw the extracted text invisibly on each PDF page.
    pub embed_text_layer: bool,
    /// Write the extracted text as `.txt` next to each page image.
    pub write_text_artifacts: bool,
    /// Downscale saved page images to this width (PDF keeps full resolution).
    pub preview_width: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let canvas = CanvasSize::a4_300dpi();
        Self {
            pages_dir: PathBuf::from("pages"),
            fonts_dir: PathBuf::from("fonts"),
            assets_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("dist"),
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            paper_size: PaperSize::A4,
            background: "#ffffff".into(),
            title: "Portfolio".into(),
            embed_text_layer: true,
            write_text_artifacts: true,
            preview_width: None,
        }
    }
}

impl AppConfig {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Persist as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// Directory receiving per-page images and text artifacts.
    pub fn pages_output_dir(&self) -> PathBuf {
        self.output_dir.join("pages")
    }

    /// Path of the assembled PDF.
    pub fn pdf_output_path(&self) -> PathBuf {
        self.output_dir.join("output.pdf")
    }

    /// Reject settings the renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(FolioError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.preview_width == Some(0) {
            return Err(FolioError::Config("preview_width must be positive".into()));
        }
        Ok(())
    }
}
