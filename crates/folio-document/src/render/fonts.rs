// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font registry: loads font families from a directory tree and resolves
// (family, weight, italic) requests to a concrete face.
//
// Layout of the fonts directory: one sub-directory per family, named after
// the family (`fonts/Roboto`, `fonts/Oswald`). Static instances under
// `<family>/static/` are preferred over the family root; variable fonts are
// skipped.

use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use rusttype::{Font, Scale, point};
use tracing::{debug, info, instrument, warn};

/// Weight keywords recognised in font file names. Compound names come first
/// so `ExtraBold` is not read as `Bold`.
const WEIGHT_NAMES: [(&str, u16); 9] = [
    ("ExtraLight", 200),
    ("SemiBold", 600),
    ("ExtraBold", 800),
    ("Thin", 100),
    ("Light", 300),
    ("Regular", 400),
    ("Medium", 500),
    ("Bold", 700),
    ("Black", 900),
];

pub const DEFAULT_WEIGHT: u16 = 400;

/// Fonts tried when the fonts directory yields nothing.
const SYSTEM_FONTS: &[(&str, &str)] = &[
    ("DejaVu Sans", "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
    ("DejaVu Sans", "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
    ("Liberation Sans", "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf"),
    ("Liberation Sans", "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf"),
    ("Liberation Sans", "/usr/share/fonts/truetype/liberation2/LiberationSans-Regular.ttf"),
    ("Liberation Sans", "/usr/share/fonts/truetype/liberation2/LiberationSans-Bold.ttf"),
    ("Arial", "/usr/share/fonts/TTF/arial.ttf"),
    ("Arial", "/System/Library/Fonts/Supplemental/Arial.ttf"),
    ("Arial", "/System/Library/Fonts/Supplemental/Arial Bold.ttf"),
    ("Helvetica", "/System/Library/Fonts/Helvetica.ttc"),
    ("Arial", "C:\\Windows\\Fonts\\arial.ttf"),
    ("Arial", "C:\\Windows\\Fonts\\arialbd.ttf"),
];

/// Weight and italic flag encoded in a font file name
/// (`Roboto-SemiBoldItalic.ttf` → 600, italic).
pub fn parse_font_style(file_name: &str) -> (u16, bool) {
    let weight = WEIGHT_NAMES
        .iter()
        .find(|(name, _)| file_name.contains(name))
        .map_or(DEFAULT_WEIGHT, |&(_, weight)| weight);
    (weight, file_name.contains("Italic"))
}

/// One loaded font face.
pub struct FontFace {
    pub family: String,
    pub weight: u16,
    pub italic: bool,
    pub source: PathBuf,
    font: Font<'static>,
}

impl FontFace {
    /// Load a single `.ttf`/`.otf` file, reading weight and style from its
    /// name.
    pub fn load(path: &Path, family: &str) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|err| FolioError::FontLoad(format!("{}: {err}", path.display())))?;
        let font = Font::try_from_vec(data)
            .ok_or_else(|| FolioError::FontLoad(format!("{}: not a usable font", path.display())))?;
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let (weight, italic) = parse_font_style(file_name);
        Ok(Self {
            family: family.to_owned(),
            weight,
            italic,
            source: path.to_path_buf(),
            font,
        })
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }

    /// Ascent and descent in pixels at `size_px`; descent is negative.
    pub fn v_metrics(&self, size_px: f32) -> (f32, f32) {
        let metrics = self.font.v_metrics(Scale::uniform(size_px));
        (metrics.ascent, metrics.descent)
    }

    /// Advance width of `text` in pixels at `size_px`, kerning included.
    pub fn text_width(&self, text: &str, size_px: f32) -> f32 {
        self.font
            .layout(text, Scale::uniform(size_px), point(0.0, 0.0))
            .last()
            .map_or(0.0, |glyph| {
                glyph.position().x + glyph.unpositioned().h_metrics().advance_width
            })
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("weight", &self.weight)
            .field("italic", &self.italic)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// All faces available to the renderer.
#[derive(Debug, Default)]
pub struct FontRegistry {
    faces: Vec<FontFace>,
}

impl FontRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every family under `dir`, falling back to system fonts when the
    /// directory is missing or holds no usable font.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut registry = Self::empty();

        match sorted_entries(dir) {
            Ok(entries) => {
                for family_dir in entries.into_iter().filter(|p| p.is_dir()) {
                    let Some(family) = family_dir.file_name().and_then(|n| n.to_str()) else {
                        continue;
                    };
                    let mut faces = load_font_files(&family_dir.join("static"), family);
                    if faces.is_empty() {
                        faces = load_font_files(&family_dir, family);
                    }
                    debug!(family, faces = faces.len(), "Font family loaded");
                    registry.faces.extend(faces);
                }
            }
            Err(err) => warn!(%err, "Fonts directory not readable"),
        }

        if registry.is_empty() {
            warn!("No fonts found in fonts directory, using system fallback");
            return Self::system_fallback();
        }
        info!(
            faces = registry.len(),
            families = registry.families().len(),
            "Fonts loaded"
        );
        registry
    }

    /// Well-known system font locations. May come back empty, in which case
    /// text is laid out with estimated metrics and not painted.
    pub fn system_fallback() -> Self {
        let mut registry = Self::empty();
        for &(family, path) in SYSTEM_FONTS {
            let path = Path::new(path);
            if !path.is_file() {
                continue;
            }
            match FontFace::load(path, family) {
                Ok(face) => registry.add(face),
                Err(err) => debug!(%err, "Skipping system font"),
            }
        }
        if registry.is_empty() {
            warn!("No system fonts available; text will not be painted");
        } else {
            info!(faces = registry.len(), "System fonts loaded");
        }
        registry
    }

    pub fn add(&mut self, face: FontFace) {
        self.faces.push(face);
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn face(&self, index: usize) -> Option<&FontFace> {
        self.faces.get(index)
    }

    /// Distinct family names, in load order.
    pub fn families(&self) -> Vec<&str> {
        let mut families: Vec<&str> = Vec::new();
        for face in &self.faces {
            if !families.contains(&face.family.as_str()) {
                families.push(&face.family);
            }
        }
        families
    }

    /// Index of the face best matching the request.
    ///
    /// The family is matched case-insensitively; an unknown or absent family
    /// searches every face. Within the candidates the italic flag wins, then
    /// the closest weight, then the lighter face.
    pub fn lookup(&self, family: Option<&str>, weight: u16, italic: bool) -> Option<usize> {
        let in_family = |face: &FontFace| {
            family.is_some_and(|wanted| face.family.eq_ignore_ascii_case(wanted.trim()))
        };
        let family_known = self.faces.iter().any(in_family);

        self.faces
            .iter()
            .enumerate()
            .filter(|(_, face)| !family_known || in_family(face))
            .min_by_key(|(_, face)| (face.italic != italic, face.weight.abs_diff(weight), face.weight))
            .map(|(index, _)| index)
    }
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect::<Vec<_>>();
    entries.sort();
    Ok(entries)
}

/// Load the static font files directly inside `dir`; unreadable files are
/// skipped with a warning.
fn load_font_files(dir: &Path, family: &str) -> Vec<FontFace> {
    let Ok(entries) = sorted_entries(dir) else {
        return Vec::new();
    };
    entries
        .into_iter()
        .filter(|path| is_static_font(path))
        .filter_map(|path| match FontFace::load(&path, family) {
            Ok(face) => Some(face),
            Err(err) => {
                warn!(%err, "Skipping font");
                None
            }
        })
        .collect()
}

fn is_static_font(path: &Path) -> bool {
    let is_font = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"));
    let variable = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains("VariableFont"));
    path.is_file() && is_font && !variable
}
