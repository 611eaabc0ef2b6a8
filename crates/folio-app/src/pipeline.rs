// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Build pipeline: discover → load → render → extract → save → PDF.
//
// Pages are processed one at a time; the PDF writer and the output
// directory belong to a single `run`.

use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use folio_core::{AppConfig, DiscoveredPage, PageId};
use folio_document::render::style::parse_color;
use folio_document::{FontRegistry, ImageProcessor, PageRenderer, PdfWriter, RasterRenderer};
use folio_extract::extract_text;
use tracing::{debug, info, instrument};

use crate::pages::{ComponentRegistry, PageLoader, discover_pages};

/// Artifacts produced for one page.
#[derive(Debug, Clone)]
pub struct PageOutput {
    pub id: PageId,
    pub image_path: PathBuf,
    pub text_path: Option<PathBuf>,
    /// The page's extracted text layer.
    pub text: String,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub pages: Vec<PageOutput>,
    pub pdf_path: PathBuf,
}

pub struct Pipeline {
    config: AppConfig,
    renderer: RasterRenderer,
    components: ComponentRegistry,
}

impl Pipeline {
    /// Validate `config` and load the fonts it names.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let fonts = FontRegistry::load_dir(&config.fonts_dir);
        Self::with_fonts(config, fonts)
    }

    /// Build a pipeline around an already-loaded font registry.
    pub fn with_fonts(config: AppConfig, fonts: FontRegistry) -> Result<Self> {
        let background = parse_color(&config.background).ok_or_else(|| {
            FolioError::Config(format!("invalid background colour {:?}", config.background))
        })?;
        let renderer = RasterRenderer::new(fonts)
            .with_background(background)
            .with_assets_dir(config.assets_dir.clone());
        Ok(Self {
            config,
            renderer,
            components: ComponentRegistry::with_builtins(),
        })
    }

    #[instrument(skip_all, fields(pages_dir = %self.config.pages_dir.display()))]
    pub fn run(&self) -> Result<BuildReport> {
        let pages = discover_pages(&self.config.pages_dir)?;
        info!("Found {} page(s)", pages.len());
        debug!(components = ?self.components.names().collect::<Vec<_>>(), "Components registered");

        let out_dir = self.config.pages_output_dir();
        std::fs::create_dir_all(&out_dir)?;

        let loader = PageLoader::new(&self.components);
        let mut writer = PdfWriter::new(self.config.paper_size, &self.config.title);
        let mut outputs = Vec::with_capacity(pages.len());
        for page in &pages {
            outputs.push(self.build_page(page, &loader, &mut writer, &out_dir)?);
        }

        let pdf_path = self.config.pdf_output_path();
        writer.write_to_file(&pdf_path)?;
        Ok(BuildReport {
            pages: outputs,
            pdf_path,
        })
    }

    fn build_page(
        &self,
        page: &DiscoveredPage,
        loader: &PageLoader<'_>,
        writer: &mut PdfWriter,
        out_dir: &Path,
    ) -> Result<PageOutput> {
        info!("Rendering page: {}", page.id);
        let tree = loader.load(page)?;
        let image = self.renderer.render(&tree, &self.config.canvas())?;

        let text = extract_text(&tree);
        debug!(page = %page.id, chars = text.len(), "Text layer extracted");
        writer.add_page(&image, self.config.embed_text_layer.then_some(text.as_str()))?;

        let mut processor = ImageProcessor::from_dynamic(image);
        if let Some(width) = self.config.preview_width {
            processor = processor.resize_to_width(width);
        }
        let image_path = out_dir.join(format!("{}.webp", page.id));
        processor.save(&image_path)?;
        info!("Saved: {}", image_path.display());

        let text_path = if self.config.write_text_artifacts {
            let path = out_dir.join(format!("{}.txt", page.id));
            std::fs::write(&path, &text)?;
            Some(path)
        } else {
            None
        };

        Ok(PageOutput {
            id: page.id.clone(),
            image_path,
            text_path,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COVER: &str = r#"{
        "type": "div",
        "props": {
            "style": { "display": "flex", "flexDirection": "column", "height": "100%", "padding": "10px" },
            "children": [
                { "type": "h1", "props": { "data-role": "document-title", "style": { "fontSize": 24 }, "children": "Portfolio" } },
                { "type": "p", "props": { "data-role": "name", "children": "Jane Doe" } },
                { "type": "p", "props": { "data-role": "date", "children": 2025 } }
            ]
        }
    }"#;

    const EXPERIENCE: &str = r#"{
        "type": "div",
        "props": { "children": [
            { "component": "Section", "props": { "title": "Experience", "data-role": "section-heading", "children": [
                { "component": "ExperienceCard", "props": {
                    "title": "BirCloud", "type": "Company", "from": "07.2025", "to": "08.2025",
                    "description": "Frontend work.", "data-role": "experience-section" } }
            ] } },
            { "type": "p", "props": { "style": { "top": 900 }, "className": "extract", "children": "jane@example.com" } }
        ] }
    }"#;

    fn workspace(pages: &[(&str, &str)]) -> (tempfile::TempDir, AppConfig) {
        let dir = tempfile::tempdir().unwrap();
        let pages_dir = dir.path().join("pages");
        std::fs::create_dir(&pages_dir).unwrap();
        for (name, json) in pages {
            std::fs::write(pages_dir.join(name), json).unwrap();
        }
        let config = AppConfig {
            pages_dir,
            fonts_dir: dir.path().join("fonts"),
            assets_dir: dir.path().join("assets"),
            output_dir: dir.path().join("dist"),
            canvas_width: 124,
            canvas_height: 175,
            ..AppConfig::default()
        };
        (dir, config)
    }

    fn run(config: AppConfig) -> Result<BuildReport> {
        Pipeline::with_fonts(config, FontRegistry::empty())?.run()
    }

    #[test]
    fn every_page_yields_image_text_and_pdf_page() {
        let (_dir, config) = workspace(&[("2-extra.json", EXPERIENCE), ("1-home.json", COVER)]);
        let report = run(config.clone()).unwrap();

        let ids: Vec<String> = report.pages.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["1-home", "2-extra"]);

        let cover = &report.pages[0];
        assert_eq!(cover.text, "PORTFOLIO\n\nNAME: Jane Doe\n\nDATE: 2025");
        assert_eq!(cover.image_path, config.pages_output_dir().join("1-home.webp"));
        let saved = ImageProcessor::open(&cover.image_path).unwrap();
        assert_eq!((saved.width(), saved.height()), (124, 175));
        assert_eq!(
            std::fs::read_to_string(cover.text_path.as_ref().unwrap()).unwrap(),
            cover.text
        );

        assert_eq!(
            report.pages[1].text,
            "--- EXPERIENCE ---\n\n=== BIRCLOUD 07.2025 - 08.2025 COMPANY FRONTEND WORK. ===\n\nEMAIL: jane@example.com"
        );

        assert_eq!(report.pdf_path, config.pdf_output_path());
        let pdf = std::fs::read(&report.pdf_path).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn bundled_sample_pages_build() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            pages_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("../../pages"),
            output_dir: dir.path().to_path_buf(),
            canvas_width: 620,
            canvas_height: 877,
            ..AppConfig::default()
        };
        let report = run(config).unwrap();

        let ids: Vec<String> = report.pages.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["1-home", "1-main", "2-extra"]);
        assert_eq!(report.pages[0].text, "PORTFOLIO\n\nNAME: Your Name\n\nDATE: 2025");
        assert!(report.pages[1].text.contains("EMAIL: you@example.com"));
        assert!(report.pages[1].text.contains("PHONE: +90 532 000 0000"));
        assert!(report.pages[2].text.contains("=== BIRCLOUD 07.2025 - 08.2025 COMPANY"));
    }

    #[test]
    fn text_artifacts_can_be_disabled() {
        let (_dir, mut config) = workspace(&[("1-home.json", COVER)]);
        config.write_text_artifacts = false;
        let report = run(config.clone()).unwrap();

        assert!(report.pages[0].text_path.is_none());
        assert!(!config.pages_output_dir().join("1-home.txt").exists());
        assert!(config.pages_output_dir().join("1-home.webp").exists());
    }

    #[test]
    fn preview_width_downscales_saved_images_only() {
        let (_dir, mut config) = workspace(&[("1-home.json", COVER)]);
        config.preview_width = Some(62);
        let report = run(config).unwrap();

        let saved = ImageProcessor::open(&report.pages[0].image_path).unwrap();
        assert_eq!(saved.width(), 62);
    }

    #[test]
    fn a_broken_page_aborts_the_run() {
        let (_dir, config) = workspace(&[
            ("1-home.json", COVER),
            ("2-bad.json", r#"{ "component": "Carousel" }"#),
        ]);
        let err = run(config.clone()).unwrap_err();
        assert!(matches!(err, FolioError::UnknownComponent(_)));
        assert!(!config.pdf_output_path().exists());
    }

    #[test]
    fn invalid_background_is_a_config_error() {
        let (_dir, mut config) = workspace(&[]);
        config.background = "tomato".into();
        assert!(matches!(
            Pipeline::with_fonts(config, FontRegistry::empty()),
            Err(FolioError::Config(_))
        ));
    }

    #[test]
    fn empty_pages_directory_fails_discovery() {
        let (_dir, config) = workspace(&[]);
        assert!(matches!(run(config), Err(FolioError::PageDiscovery(_))));
    }
}
