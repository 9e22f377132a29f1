use crate::error::TextelError;

/// 19 buckets, un glyphe par bucket — la table uniforme de référence.
pub const UNIFORM_GLYPHS: [&str; 19] = [
    " ", ".", "'", "-", ":", ";", "!", "~", "*", "+", "e", "m", "6", "8", "g", "#", "W", "M", "@",
];

/// Seuils ascendants découpant [0, 255] en 19 buckets de luminance.
pub const UNIFORM_THRESHOLDS: [u8; 17] = [
    15, 25, 45, 60, 75, 90, 100, 115, 135, 155, 170, 185, 205, 220, 235, 245, 250,
];

/// 9 buckets, plusieurs glyphes candidats par bucket — texture variée.
pub const RANDOM_GLYPHS: [&str; 9] = [
    " ",
    ".",
    ",-",
    "_ivc=!/|\\~",
    "gjezt*+",
    "2](YL)[T7Vf",
    "mdK4",
    "mdK4ZGbN",
    "DXY5P#%$W8KMA",
];

/// Seuils pour la table à 9 buckets (découpage régulier).
pub const RANDOM_THRESHOLDS: [u8; 8] = [30, 60, 90, 120, 150, 180, 210, 240];

/// Ordered glyph table + ascending bin thresholds, darkest→brightest.
///
/// Immutable configuration data: built once, passed by reference into each
/// conversion call. Each entry is a single displayable character or a short
/// cluster of candidate characters; the luminance range is partitioned into
/// `thresholds.len() + 1` buckets with a left-exclusive, right-inclusive
/// convention (a sample equal to a threshold falls in the bucket whose
/// upper edge it is).
///
/// # Example
/// ```
/// use tx_core::palette::GlyphPalette;
/// let p = GlyphPalette::uniform();
/// assert_eq!(p.glyph(0), " ");
/// assert_eq!(p.glyph(255), "@");
/// ```
#[derive(Clone, Debug)]
pub struct GlyphPalette {
    glyphs: Vec<String>,
    thresholds: Vec<u8>,
}

impl GlyphPalette {
    /// Build a palette from a custom glyph table and threshold list.
    ///
    /// Validation happens here, at configuration time — bucket lookup never
    /// fails once a palette exists.
    ///
    /// # Errors
    /// Returns [`TextelError::InvalidPaletteConfig`] if the glyph count is
    /// not `thresholds.len() + 1`, if the thresholds are not strictly
    /// increasing, or if any glyph entry is empty.
    ///
    /// # Example
    /// ```
    /// use tx_core::palette::GlyphPalette;
    /// let p = GlyphPalette::new(
    ///     vec![" ".into(), ":".into(), "@".into()],
    ///     vec![80, 170],
    /// ).unwrap();
    /// assert_eq!(p.bucket_count(), 3);
    /// ```
    pub fn new(glyphs: Vec<String>, thresholds: Vec<u8>) -> Result<Self, TextelError> {
        if glyphs.len() != thresholds.len() + 1 {
            return Err(TextelError::InvalidPaletteConfig {
                detail: format!(
                    "{} glyphes pour {} seuils (attendu : seuils + 1)",
                    glyphs.len(),
                    thresholds.len()
                ),
            });
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TextelError::InvalidPaletteConfig {
                detail: "seuils non strictement croissants".to_string(),
            });
        }
        if let Some(i) = glyphs.iter().position(String::is_empty) {
            return Err(TextelError::InvalidPaletteConfig {
                detail: format!("glyphe vide à l'index {i}"),
            });
        }
        Ok(Self { glyphs, thresholds })
    }

    /// The 19-glyph uniform table with its 17 reference thresholds.
    #[must_use]
    pub fn uniform() -> Self {
        Self {
            glyphs: UNIFORM_GLYPHS.iter().map(ToString::to_string).collect(),
            thresholds: UNIFORM_THRESHOLDS.to_vec(),
        }
    }

    /// The 9-bucket table with several candidate glyphs per bucket.
    ///
    /// [`pick`](Self::pick) selects one candidate per cell
    /// deterministically.
    #[must_use]
    pub fn random() -> Self {
        Self {
            glyphs: RANDOM_GLYPHS.iter().map(ToString::to_string).collect(),
            thresholds: RANDOM_THRESHOLDS.to_vec(),
        }
    }

    /// Number of luminance buckets (= glyph entries).
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Bucket index for a luminance sample: the number of thresholds
    /// strictly below `v`.
    ///
    /// # Example
    /// ```
    /// use tx_core::palette::GlyphPalette;
    /// let p = GlyphPalette::uniform();
    /// // 15 is the first threshold: it closes bucket 0.
    /// assert_eq!(p.bucket(15), 0);
    /// assert_eq!(p.bucket(16), 1);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn bucket(&self, v: u8) -> usize {
        self.thresholds.partition_point(|&t| t < v)
    }

    /// Glyph entry (possibly a multi-character cluster) for a sample.
    #[inline]
    #[must_use]
    pub fn glyph(&self, v: u8) -> &str {
        &self.glyphs[self.bucket(v)]
    }

    /// One display character for the cell at `(x, y)` with luminance `v`.
    ///
    /// Single-glyph buckets return their glyph; multi-glyph buckets pick a
    /// candidate with a small coordinate-seeded LCG, so the same
    /// `(v, x, y)` always yields the same character.
    ///
    /// # Example
    /// ```
    /// use tx_core::palette::GlyphPalette;
    /// let p = GlyphPalette::uniform();
    /// assert_eq!(p.pick(255, 3, 7), '@');
    /// assert_eq!(p.pick(255, 3, 7), p.pick(255, 3, 7));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pick(&self, v: u8, x: u32, y: u32) -> char {
        let cluster = self.glyph(v);
        let n = cluster.chars().count();
        if n <= 1 {
            return cluster.chars().next().unwrap_or(' ');
        }
        let seed = 0x1234_5678_u32
            .wrapping_add(x.wrapping_mul(1337))
            .wrapping_add(y.wrapping_mul(7919))
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        cluster
            .chars()
            .nth(seed as usize % n)
            .unwrap_or(' ')
    }
}

impl Default for GlyphPalette {
    fn default() -> Self {
        Self::uniform()
    }
}
