use std::collections::HashMap;

use ab_glyph::{Font, FontRef, PxScale, point};
use rayon::prelude::*;
use tx_core::config::RasterOptions;
use tx_core::error::TextelError;
use tx_core::frame::{CharacterGrid, FrameBuffer};

use crate::font::{FontData, resolve_font};

/// Convertit une grille de caractères en pixels RGBA.
///
/// Les métriques de cellule viennent de la police : largeur = avance
/// horizontale de l'espace, hauteur = ascent − descent + line gap, à la
/// taille demandée. Un atlas alpha par caractère est pré-calculé pour que
/// la boucle par-cellule ne rasterise aucun contour.
pub struct Rasterizer {
    cell_width: u32,
    cell_height: u32,
    /// Maps a char to its 1D alpha buffer (size = cell_width * cell_height).
    glyph_cache: HashMap<char, Vec<u8>>,
    /// Pre-computed blank glyph shared by uncovered characters.
    empty_glyph: Vec<u8>,
}

impl Rasterizer {
    /// Initialise le rasterizer en pré-calculant l'atlas des caractères
    /// imprimables ASCII.
    ///
    /// # Errors
    /// Retourne [`TextelError::FontLoad`] si les bytes de police sont
    /// invalides.
    pub fn new(font: &FontData, font_size: u32) -> Result<Self, TextelError> {
        let font_ref =
            FontRef::try_from_slice_and_index(&font.bytes, font.index).map_err(|e| {
                TextelError::FontLoad {
                    detail: format!("police invalide : {e}"),
                }
            })?;
        let scale = PxScale::from(font_size as f32);

        let v_advance =
            font_ref.ascent_unscaled() - font_ref.descent_unscaled() + font_ref.line_gap_unscaled();
        let cell_height = ((v_advance * scale.y / font_ref.height_unscaled()).ceil() as u32).max(1);

        // Monospace: every advance matches the space advance.
        let space = font_ref.glyph_id(' ');
        let h_advance = font_ref.h_advance_unscaled(space);
        let cell_width = ((h_advance * scale.x / font_ref.height_unscaled()).ceil() as u32).max(1);

        let mut rasterizer = Self {
            cell_width,
            cell_height,
            glyph_cache: HashMap::new(),
            empty_glyph: vec![0u8; (cell_width * cell_height) as usize],
        };
        rasterizer.cache_charset(&font_ref, scale, 32..=126);

        Ok(rasterizer)
    }

    fn cache_charset(
        &mut self,
        font: &FontRef,
        scale: PxScale,
        range: std::ops::RangeInclusive<u32>,
    ) {
        for codepoint in range {
            let Some(ch) = std::char::from_u32(codepoint) else {
                continue;
            };
            // Skip characters not in the font (glyph_id 0 = .notdef) so
            // uncovered cells stay blank instead of drawing "?" boxes.
            let gid = font.glyph_id(ch);
            if gid.0 == 0 && ch != '\0' {
                continue;
            }

            let mut buffer = vec![0u8; (self.cell_width * self.cell_height) as usize];

            let ascent_px = font.ascent_unscaled() * scale.y / font.height_unscaled();
            let glyph = gid.with_scale_and_position(scale, point(0.0, ascent_px));

            if let Some(outline) = font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                #[allow(clippy::cast_possible_wrap)]
                outline.draw(|x, y, v| {
                    let px = (x as i32 + bounds.min.x as i32).max(0) as u32;
                    let py = (y as i32 + bounds.min.y as i32).max(0) as u32;
                    if px < self.cell_width && py < self.cell_height {
                        let idx = (py * self.cell_width + px) as usize;
                        if idx < buffer.len() {
                            buffer[idx] = (v * 255.0).round() as u8;
                        }
                    }
                });
            }
            self.glyph_cache.insert(ch, buffer);
        }
    }

    /// Dimensions d'une cellule de glyphe en pixels.
    #[must_use]
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Dimensions du canvas pour une grille donnée :
    /// `(max_line_len · cell_w, row_count · cell_h)`.
    #[must_use]
    pub fn target_dimensions(&self, grid: &CharacterGrid) -> (u32, u32) {
        let (rows, widest) = grid.dimensions();
        (
            widest as u32 * self.cell_width,
            rows as u32 * self.cell_height,
        )
    }

    /// Rendu de la grille sur un canvas couleur de fond, glyphes en couleur
    /// de texte.
    ///
    /// Les rangées inégales sont tolérées sans rognage : la largeur du
    /// canvas suit la rangée la plus longue, les cellules manquantes
    /// restent au fond. Rangée `i` dessinée à l'offset vertical
    /// `i · cell_h`, colonne 0. Parallélisé par bande de rangée.
    #[must_use]
    pub fn render(
        &self,
        grid: &CharacterGrid,
        fg: (u8, u8, u8),
        bg: (u8, u8, u8),
    ) -> FrameBuffer {
        let rows: Vec<&str> = grid.rows().collect();
        let widest = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        let width = widest as u32 * self.cell_width;
        let height = rows.len() as u32 * self.cell_height;
        if width == 0 || height == 0 {
            return FrameBuffer::new(width, height);
        }

        let mut fb = FrameBuffer::solid(width, height, bg);

        let stride = (width * 4) as usize;
        let band_size = stride * self.cell_height as usize;
        let empty_glyph = &self.empty_glyph;

        fb.data
            .par_chunks_exact_mut(band_size)
            .enumerate()
            .for_each(|(row_idx, band)| {
                for (cx, ch) in rows[row_idx].chars().enumerate() {
                    let alpha_map = self.glyph_cache.get(&ch).unwrap_or(empty_glyph);
                    let cx_start = cx * self.cell_width as usize;

                    for gy in 0..(self.cell_height as usize) {
                        let band_y_offset = gy * stride;
                        for gx in 0..(self.cell_width as usize) {
                            let alpha = alpha_map[gy * self.cell_width as usize + gx];
                            if alpha == 0 {
                                continue;
                            }
                            let alpha_f = f32::from(alpha) / 255.0;

                            let r = (f32::from(fg.0) * alpha_f
                                + f32::from(bg.0) * (1.0 - alpha_f))
                                as u8;
                            let g = (f32::from(fg.1) * alpha_f
                                + f32::from(bg.1) * (1.0 - alpha_f))
                                as u8;
                            let b = (f32::from(fg.2) * alpha_f
                                + f32::from(bg.2) * (1.0 - alpha_f))
                                as u8;

                            let px_idx = band_y_offset + (cx_start + gx) * 4;
                            band[px_idx] = r;
                            band[px_idx + 1] = g;
                            band[px_idx + 2] = b;
                            band[px_idx + 3] = 255;
                        }
                    }
                }
            });

        fb
    }
}

/// Rasterise une grille avec les options données : résolution de police,
/// métriques, rendu.
///
/// # Errors
/// Returns an error if no usable font exists.
///
/// # Example
/// ```no_run
/// use tx_core::config::RasterOptions;
/// use tx_core::frame::CharacterGrid;
/// use tx_export::rasterizer::rasterize_grid;
///
/// let grid = CharacterGrid::from_text("\n@@\n@@\n");
/// let bitmap = rasterize_grid(&grid, &RasterOptions::default()).unwrap();
/// assert!(bitmap.width > 0);
/// ```
pub fn rasterize_grid(
    grid: &CharacterGrid,
    opts: &RasterOptions,
) -> Result<FrameBuffer, TextelError> {
    let font = resolve_font(opts.font_path.as_deref())?;
    let rasterizer = Rasterizer::new(&font, opts.font_size)?;
    Ok(rasterizer.render(grid, opts.fg_color, opts.bg_color))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Host-dependent: exercises the real system font when present, exits
    /// quietly when the environment has none (same policy as testing an
    /// external encoder binary).
    fn try_rasterizer() -> Option<Rasterizer> {
        let font = resolve_font(None).ok()?;
        Rasterizer::new(&font, 10).ok()
    }

    #[test]
    fn canvas_shape_is_rows_by_longest_line() {
        let Some(r) = try_rasterizer() else { return };
        let (cw, ch) = r.cell_size();

        let grid = CharacterGrid::from_text("\nabcd\nef\n");
        let fb = r.render(&grid, (255, 255, 255), (20, 20, 20));
        assert_eq!((fb.width, fb.height), (4 * cw, 2 * ch));
        assert_eq!(r.target_dimensions(&grid), (fb.width, fb.height));
    }

    #[test]
    fn background_fills_ragged_area() {
        let Some(r) = try_rasterizer() else { return };
        let bg = (7, 9, 11);
        // Second row is shorter: its rightmost cell must stay background.
        let grid = CharacterGrid::from_text("\n@@@@\n@\n");
        let fb = r.render(&grid, (255, 255, 255), bg);
        let (w, h) = (fb.width, fb.height);
        let (pr, pg, pb, pa) = fb.pixel(w - 1, h - 1);
        assert_eq!((pr, pg, pb, pa), (bg.0, bg.1, bg.2, 255));
    }

    #[test]
    fn dense_glyph_leaves_foreground_ink() {
        let Some(r) = try_rasterizer() else { return };
        let bg = (0, 0, 0);
        let grid = CharacterGrid::from_text("\n@@\n@@\n");
        let fb = r.render(&grid, (255, 255, 255), bg);
        let inked = fb
            .data
            .chunks_exact(4)
            .any(|px| px[0] > 128 && px[1] > 128 && px[2] > 128);
        assert!(inked, "rendering '@' cells must leave visible ink");
    }

    #[test]
    fn empty_grid_renders_empty_canvas() {
        let Some(r) = try_rasterizer() else { return };
        let grid = CharacterGrid::from_text("\n");
        let fb = r.render(&grid, (255, 255, 255), (0, 0, 0));
        assert_eq!(fb.width, 0);
    }

    #[test]
    fn cell_metrics_are_positive() {
        let Some(r) = try_rasterizer() else { return };
        let (cw, ch) = r.cell_size();
        assert!(cw >= 1 && ch >= 1);
    }
}
