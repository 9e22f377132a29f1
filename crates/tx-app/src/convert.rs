use std::path::Path;

use anyhow::{Context, Result};
use tx_ascii::compositor::Compositor;
use tx_core::config::Settings;
use tx_core::traits::Progress;
use tx_export::animation::default_writer;
use tx_export::font::resolve_font;
use tx_export::rasterizer::{Rasterizer, rasterize_grid};
use tx_export::sequence::grids_to_animation;
use tx_source::gif::{decode_frames, probe_frame_count};
use tx_source::input::ImageInput;
use tx_source::resize::Resizer;

/// Progression remontée dans le log plutôt qu'en console bloquante.
pub struct LogProgress {
    label: String,
    total: usize,
}

impl LogProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            label: String::new(),
            total: 0,
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize, label: &str) {
        self.label = label.to_string();
        self.total = total;
        log::info!("{label}: 0/{total}");
    }

    fn tick(&mut self, completed: usize) {
        log::debug!("{}: {completed}/{}", self.label, self.total);
    }

    fn finish(&mut self) {
        log::info!("{}: {}/{} terminé", self.label, self.total, self.total);
    }
}

/// Conversion d'une image fixe : texte sur stdout, fichier texte, et/ou
/// bitmap PNG.
///
/// # Errors
/// Returns an error if the source cannot be converted or an output cannot
/// be written.
pub fn run_still(
    input: &str,
    settings: &Settings,
    out: Option<&Path>,
    render: Option<&Path>,
) -> Result<()> {
    let compositor = Compositor::new(settings.palette.clone());
    let grid = compositor.convert(ImageInput::path_or_url(input), &settings.convert)?;

    if let Some(path) = render {
        let bitmap = rasterize_grid(&grid, &settings.raster)?;
        image::save_buffer(
            path,
            &bitmap.data,
            bitmap.width,
            bitmap.height,
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
        log::info!("bitmap écrit : {} ({}×{})", path.display(), bitmap.width, bitmap.height);
    }

    match out {
        Some(path) => {
            std::fs::write(path, grid.as_str())
                .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
            log::info!("grille écrite : {}", path.display());
        }
        None if render.is_none() => print!("{grid}"),
        None => {}
    }
    Ok(())
}

/// Conversion d'un GIF animé : chaque frame passe le chemin aller, la
/// séquence de grilles est rasterisée puis confiée au writer d'animation.
///
/// Le writer est obtenu avant tout décodage — son absence échoue sans
/// gâcher de travail de frame.
///
/// # Errors
/// Returns an error if decoding, conversion, rasterization or writing
/// fails.
pub fn run_animated(input: &Path, settings: &Settings, out: &Path) -> Result<()> {
    let mut writer = default_writer(out)?;

    let declared = probe_frame_count(input)?;
    log::info!("{} : {declared} frames", input.display());

    let mut progress = LogProgress::new();
    let source = decode_frames(input, declared, &mut progress)?;

    let compositor = Compositor::new(settings.palette.clone());
    let mut resizer = Resizer::new();
    let mut grids = Vec::with_capacity(source.frames.len());
    for frame in &source.frames {
        grids.push(compositor.convert_frame(frame, &settings.convert, &mut resizer)?);
    }

    // Export cadence is the configured one, not the source's.
    let grid_seq = tx_core::frame::FrameSequence::new(grids, settings.sequence.fps);

    let font = resolve_font(settings.raster.font_path.as_deref())?;
    let rasterizer = Rasterizer::new(&font, settings.raster.font_size)?;
    grids_to_animation(
        &grid_seq,
        &rasterizer,
        &settings.raster,
        writer.as_mut(),
        &mut progress,
    )?;

    log::info!("animation ASCII écrite : {}", out.display());
    Ok(())
}
