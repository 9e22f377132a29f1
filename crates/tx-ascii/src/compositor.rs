use tx_core::config::ConvertOptions;
use tx_core::error::TextelError;
use tx_core::frame::{CharacterGrid, FrameBuffer, LumaBuffer};
use tx_core::palette::GlyphPalette;
use tx_source::input::ImageInput;
use tx_source::resize::Resizer;

use crate::equalize::{equalize_in_place, invert_in_place};
use crate::sampler::sample_luminance;

/// Compositor orchestre le chemin aller pixel→caractère.
///
/// Itère la grille échantillonnée en row-major, un glyphe par cellule, un
/// terminateur par rangée, un terminateur de tête structurel — la
/// convention consommée par le rasterizer pour inférer la taille de frame.
///
/// # Example
/// ```
/// use tx_ascii::compositor::Compositor;
/// use tx_core::palette::GlyphPalette;
/// let c = Compositor::new(GlyphPalette::uniform());
/// ```
pub struct Compositor {
    palette: GlyphPalette,
}

impl Compositor {
    /// Create a compositor over an already-validated palette.
    #[must_use]
    pub fn new(palette: GlyphPalette) -> Self {
        Self { palette }
    }

    /// The palette this compositor quantizes against.
    #[must_use]
    pub fn palette(&self) -> &GlyphPalette {
        &self.palette
    }

    /// Assemble la grille de caractères d'un buffer de luminance.
    ///
    /// Le nombre de rangées/colonnes de la sortie égale exactement la
    /// hauteur/largeur du buffer.
    ///
    /// # Example
    /// ```
    /// use tx_ascii::compositor::Compositor;
    /// use tx_core::frame::LumaBuffer;
    /// use tx_core::palette::GlyphPalette;
    ///
    /// let compositor = Compositor::new(GlyphPalette::uniform());
    /// let grid = compositor.compose(&LumaBuffer::new(4, 2));
    /// assert_eq!(grid.dimensions(), (2, 4));
    /// ```
    #[must_use]
    pub fn compose(&self, luma: &LumaBuffer) -> CharacterGrid {
        let mut text =
            String::with_capacity((luma.width as usize + 1) * luma.height as usize + 1);
        text.push('\n');
        for y in 0..luma.height {
            for x in 0..luma.width {
                text.push(self.palette.pick(luma.get(x, y), x, y));
            }
            text.push('\n');
        }
        CharacterGrid::from_text(text)
    }

    /// Chemin aller complet sur une frame décodée :
    /// resize → grayscale → equalize → invert → quantize → compose.
    ///
    /// # Errors
    /// Returns an error if sampling fails.
    pub fn convert_frame(
        &self,
        frame: &FrameBuffer,
        opts: &ConvertOptions,
        resizer: &mut Resizer,
    ) -> Result<CharacterGrid, TextelError> {
        let mut luma = sample_luminance(frame, opts, resizer)?;
        if opts.equalize {
            equalize_in_place(&mut luma);
        }
        if opts.invert {
            invert_in_place(&mut luma);
        }
        log::debug!(
            "frame {}×{} → grille {}×{}",
            frame.width,
            frame.height,
            luma.width,
            luma.height
        );
        Ok(self.compose(&luma))
    }

    /// Convertit une source quelconque en grille de caractères.
    ///
    /// # Errors
    /// Returns an error if the source cannot be normalized or sampled.
    ///
    /// # Example
    /// ```no_run
    /// use tx_ascii::compositor::Compositor;
    /// use tx_core::config::ConvertOptions;
    /// use tx_core::palette::GlyphPalette;
    /// use tx_source::input::ImageInput;
    ///
    /// let compositor = Compositor::new(GlyphPalette::uniform());
    /// let grid = compositor
    ///     .convert(ImageInput::path_or_url("photo.png"), &ConvertOptions::default())
    ///     .unwrap();
    /// print!("{grid}");
    /// ```
    pub fn convert(
        &self,
        input: ImageInput,
        opts: &ConvertOptions,
    ) -> Result<CharacterGrid, TextelError> {
        let frame = input.decode()?;
        let mut resizer = Resizer::new();
        self.convert_frame(&frame, opts, &mut resizer)
    }
}

/// Convertit un buffer RGB de surface de rendu (figure) en grille.
///
/// Convenance reprenant les réglages consacrés aux figures : échelle 0.15,
/// pas d'égalisation.
///
/// # Errors
/// Returns an error if the buffer shape is inconsistent.
pub fn figure_to_ascii(
    compositor: &Compositor,
    data: Vec<u8>,
    width: u32,
    height: u32,
) -> Result<CharacterGrid, TextelError> {
    let opts = ConvertOptions {
        scalefactor: 0.15,
        equalize: false,
        ..Default::default()
    };
    compositor.convert(ImageInput::figure(data, width, height), &opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_opts() -> ConvertOptions {
        ConvertOptions {
            scalefactor: 1.0,
            invert: false,
            equalize: false,
            ..Default::default()
        }
    }

    fn convert(frame: &FrameBuffer, opts: &ConvertOptions) -> CharacterGrid {
        Compositor::new(GlyphPalette::uniform())
            .convert_frame(frame, opts, &mut Resizer::new())
            .unwrap()
    }

    #[test]
    fn solid_white_maps_to_brightest_glyph() {
        let frame = FrameBuffer::solid(10, 10, (255, 255, 255));
        let grid = convert(&frame, &plain_opts());
        let rows: Vec<&str> = grid.rows().collect();
        assert_eq!(rows.len(), 5, "round(10 · 6/11) rows");
        for row in rows {
            assert_eq!(row, "@@@@@@@@@@");
        }
    }

    #[test]
    fn solid_black_maps_to_darkest_glyph() {
        let frame = FrameBuffer::solid(10, 10, (0, 0, 0));
        let grid = convert(&frame, &plain_opts());
        for row in grid.rows() {
            assert_eq!(row, "          ");
        }
    }

    #[test]
    fn inverted_white_equals_plain_black() {
        let white = FrameBuffer::solid(10, 10, (255, 255, 255));
        let black = FrameBuffer::solid(10, 10, (0, 0, 0));

        let inverted = ConvertOptions {
            invert: true,
            ..plain_opts()
        };
        assert_eq!(
            convert(&white, &inverted).as_str(),
            convert(&black, &plain_opts()).as_str()
        );
    }

    #[test]
    fn grid_shape_matches_scaled_dimensions() {
        let frame = FrameBuffer::new(20, 10);
        let opts = ConvertOptions {
            scalefactor: 0.5,
            ..plain_opts()
        };
        let grid = convert(&frame, &opts);
        // round(20·0.5) columns, round(10·0.5·6/11) rows.
        assert_eq!(grid.dimensions(), (3, 10));
        assert!(grid.as_str().starts_with('\n'), "structural leading terminator");
        assert!(grid.as_str().ends_with('\n'));
    }

    #[test]
    fn conversion_is_deterministic() {
        let frame = FrameBuffer::solid(8, 8, (120, 90, 30));
        let opts = ConvertOptions::default();
        let a = convert(&frame, &opts);
        let b = convert(&frame, &opts);
        assert_eq!(a, b);
    }

    #[test]
    fn figure_conversion_skips_equalization() {
        // A constant mid-gray figure: with equalization disabled the cell
        // glyph is the mid-gray bucket, not a stretched extreme.
        let compositor = Compositor::new(GlyphPalette::uniform());
        let data = vec![128u8; 30 * 30 * 3];
        let grid = figure_to_ascii(&compositor, data, 30, 30).unwrap();
        let expected = compositor.palette().glyph(128);
        for row in grid.rows() {
            for ch in row.chars() {
                assert_eq!(ch.to_string(), expected);
            }
        }
    }
}
