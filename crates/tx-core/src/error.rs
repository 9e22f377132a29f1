use thiserror::Error;

/// Errors surfaced by the conversion pipeline.
///
/// Per-pixel transforms never fail on valid numeric input; everything here
/// is detected either at configuration time or at the boundary of a
/// conversion entry point, and propagates to the immediate caller without
/// retry.
#[derive(Error, Debug)]
pub enum TextelError {
    /// Source could not be normalized to the internal frame representation.
    #[error("Source non supportée : {detail}")]
    UnsupportedInput {
        /// What was wrong with the input.
        detail: String,
    },

    /// Palette/threshold tables are inconsistent. Detected at configuration
    /// time, before any pixel is processed.
    #[error("Configuration de palette invalide : {detail}")]
    InvalidPaletteConfig {
        /// Which invariant was violated.
        detail: String,
    },

    /// No usable font could be loaded.
    ///
    /// An unreadable *explicit* font path is recovered locally by falling
    /// back to the system default and only logs a warning; this variant is
    /// returned when no fallback face exists either.
    #[error("Police indisponible : {detail}")]
    FontLoad {
        /// Why font resolution failed.
        detail: String,
    },

    /// An animated source decoded fewer frames than it declared.
    #[error("Séquence incomplète : {declared} frames déclarées, {decoded} décodées")]
    IncompleteSequence {
        /// Frame count declared up front.
        declared: usize,
        /// Frames actually decoded.
        decoded: usize,
    },

    /// No animation-writer collaborator is available for animated export.
    #[error("Aucun encodeur d'animation disponible (compilez avec la feature `gif-export`)")]
    AnimationWriterUnavailable,

    /// The animation writer failed while encoding.
    #[error("Échec d'encodage de l'animation : {detail}")]
    AnimationEncode {
        /// Encoder-reported failure.
        detail: String,
    },

    /// Underlying I/O failure.
    #[error("E/S : {0}")]
    Io(#[from] std::io::Error),
}
