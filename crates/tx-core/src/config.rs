use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::palette::GlyphPalette;

/// Facteur de correction d'aspect vertical : les cellules de glyphe sont
/// plus hautes que larges.
pub const ASPECT_CORRECTION: f32 = 6.0 / 11.0;

/// Forward-path options: pixel → character conversion.
///
/// # Example
/// ```
/// use tx_core::config::ConvertOptions;
/// let opts = ConvertOptions::default();
/// assert!(opts.equalize);
/// assert!(!opts.invert);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ConvertOptions {
    /// Caractères par pixel source.
    pub scalefactor: f32,
    /// Inverser la luminance (pour fond clair).
    pub invert: bool,
    /// Égaliser l'histogramme avant quantification (recommandé).
    pub equalize: bool,
    /// Correction d'aspect vertical appliquée à la hauteur.
    pub aspect_correction: f32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            scalefactor: 0.2,
            invert: false,
            equalize: true,
            aspect_correction: ASPECT_CORRECTION,
        }
    }
}

impl ConvertOptions {
    /// Clamp all numeric fields to their valid ranges.
    pub fn clamp_all(&mut self) {
        self.scalefactor = self.scalefactor.clamp(0.01, 4.0);
        self.aspect_correction = self.aspect_correction.clamp(0.1, 2.0);
    }
}

/// Inverse-path options: character grid → bitmap rasterization.
///
/// # Example
/// ```
/// use tx_core::config::RasterOptions;
/// let opts = RasterOptions::default();
/// assert_eq!(opts.font_size, 10);
/// assert_eq!(opts.bg_color, (20, 20, 20));
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RasterOptions {
    /// Taille de police en pixels.
    pub font_size: u32,
    /// Couleur de fond (R, G, B).
    pub bg_color: (u8, u8, u8),
    /// Couleur du texte (R, G, B).
    pub fg_color: (u8, u8, u8),
    /// Police monospace explicite (.ttf/.otf). `None` = police système.
    pub font_path: Option<PathBuf>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            font_size: 10,
            bg_color: (20, 20, 20),
            fg_color: (255, 255, 255),
            font_path: None,
        }
    }
}

impl RasterOptions {
    /// Clamp all numeric fields to their valid ranges.
    pub fn clamp_all(&mut self) {
        self.font_size = self.font_size.clamp(4, 128);
    }
}

/// Animated-export options.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SequenceOptions {
    /// Cadence cible en frames par seconde.
    pub fps: f32,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self { fps: 15.0 }
    }
}

impl SequenceOptions {
    /// Clamp all numeric fields to their valid ranges.
    pub fn clamp_all(&mut self) {
        self.fps = self.fps.clamp(0.1, 120.0);
    }
}

/// Configuration complète d'une conversion, sérialisable en TOML.
///
/// Chaque section a une valeur par défaut saine; un fichier partiel ne
/// remplace que ce qu'il nomme.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    /// Forward-path options.
    pub convert: ConvertOptions,
    /// Inverse-path options.
    pub raster: RasterOptions,
    /// Animated-export options.
    pub sequence: SequenceOptions,
    /// Glyph table + bin thresholds.
    pub palette: GlyphPalette,
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs
/// optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    convert: Option<ConvertSection>,
    raster: Option<RasterSection>,
    sequence: Option<SequenceSection>,
    palette: Option<PaletteSection>,
}

#[derive(Deserialize)]
struct ConvertSection {
    scalefactor: Option<f32>,
    invert: Option<bool>,
    equalize: Option<bool>,
    aspect_correction: Option<f32>,
}

#[derive(Deserialize)]
struct RasterSection {
    font_size: Option<u32>,
    bg_color: Option<(u8, u8, u8)>,
    fg_color: Option<(u8, u8, u8)>,
    font_path: Option<PathBuf>,
}

#[derive(Deserialize)]
struct SequenceSection {
    fps: Option<f32>,
}

/// Palette section: both lists must be present together; validated through
/// [`GlyphPalette::new`] so a bad table fails at load time.
#[derive(Deserialize)]
struct PaletteSection {
    glyphs: Option<Vec<String>>,
    thresholds: Option<Vec<u8>>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if a custom
/// palette table is inconsistent.
///
/// # Example
/// ```no_run
/// use tx_core::config::load_settings;
/// use std::path::Path;
/// let settings = load_settings(Path::new("textel.toml")).unwrap();
/// ```
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    let mut settings = Settings::default();

    if let Some(c) = file.convert {
        if let Some(v) = c.scalefactor {
            settings.convert.scalefactor = v;
        }
        if let Some(v) = c.invert {
            settings.convert.invert = v;
        }
        if let Some(v) = c.equalize {
            settings.convert.equalize = v;
        }
        if let Some(v) = c.aspect_correction {
            settings.convert.aspect_correction = v;
        }
    }

    if let Some(r) = file.raster {
        if let Some(v) = r.font_size {
            settings.raster.font_size = v;
        }
        if let Some(v) = r.bg_color {
            settings.raster.bg_color = v;
        }
        if let Some(v) = r.fg_color {
            settings.raster.fg_color = v;
        }
        if let Some(v) = r.font_path {
            settings.raster.font_path = Some(v);
        }
    }

    if let Some(s) = file.sequence
        && let Some(v) = s.fps
    {
        settings.sequence.fps = v;
    }

    if let Some(p) = file.palette {
        match (p.glyphs, p.thresholds) {
            (Some(glyphs), Some(thresholds)) => {
                settings.palette = GlyphPalette::new(glyphs, thresholds)
                    .with_context(|| format!("Palette invalide dans {}", path.display()))?;
            }
            (None, None) => {}
            _ => anyhow::bail!(
                "Section [palette] incomplète dans {} : glyphs et thresholds vont ensemble",
                path.display()
            ),
        }
    }

    settings.convert.clamp_all();
    settings.raster.clamp_all();
    settings.sequence.clamp_all();
    log::debug!("configuration chargée depuis {}", path.display());
    Ok(settings)
}
