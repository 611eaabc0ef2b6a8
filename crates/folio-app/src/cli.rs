// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface. Flags override the matching `folio.json` fields.

use std::path::PathBuf;

use clap::Parser;
use folio_core::AppConfig;
use folio_core::config::CONFIG_FILE;

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "Render résumé pages to a PDF with an embedded ATS text layer"
)]
pub struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory of `<order>-<name>.json` page definitions
    #[arg(long)]
    pub pages: Option<PathBuf>,

    /// Fonts directory (one sub-directory per family)
    #[arg(long)]
    pub fonts: Option<PathBuf>,

    /// Directory `img` sources are resolved against
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Output directory
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Downscale saved page images to this width
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub preview_width: Option<u32>,

    /// Do not draw the extracted text into the PDF
    #[arg(long)]
    pub no_text_layer: bool,

    /// Do not write per-page `.txt` files
    #[arg(long)]
    pub no_text_artifacts: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(pages) = &self.pages {
            config.pages_dir = pages.clone();
        }
        if let Some(fonts) = &self.fonts {
            config.fonts_dir = fonts.clone();
        }
        if let Some(assets) = &self.assets {
            config.assets_dir = assets.clone();
        }
        if let Some(out) = &self.out {
            config.output_dir = out.clone();
        }
        if self.preview_width.is_some() {
            config.preview_width = self.preview_width;
        }
        if self.no_text_layer {
            config.embed_text_layer = false;
        }
        if self.no_text_artifacts {
            config.write_text_artifacts = false;
        }
    }
}
