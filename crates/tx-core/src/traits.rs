use std::time::Duration;

use crate::error::TextelError;
use crate::frame::FrameBuffer;

/// Remonte l'avancement d'un traitement multi-frames.
///
/// Le cœur du pipeline ne fait jamais d'I/O console; la progression est un
/// effet observable exposé à travers cette interface. L'implémentation par
/// défaut ([`NoProgress`]) ne fait rien; le binaire installe une variante
/// loggée.
///
/// # Example
/// ```
/// use tx_core::traits::Progress;
///
/// struct Counter(usize);
/// impl Progress for Counter {
///     fn begin(&mut self, _total: usize, _label: &str) {}
///     fn tick(&mut self, _completed: usize) { self.0 += 1; }
///     fn finish(&mut self) {}
/// }
/// ```
pub trait Progress {
    /// Un traitement de `total` étapes démarre.
    fn begin(&mut self, total: usize, label: &str);

    /// `completed` étapes sont terminées.
    ///
    /// CONTRAT : appelé au plus une fois par étape, jamais depuis la boucle
    /// par-pixel.
    fn tick(&mut self, completed: usize);

    /// Le traitement est terminé.
    fn finish(&mut self);
}

/// Implémentation muette, utilisée par défaut.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn begin(&mut self, _total: usize, _label: &str) {}
    fn tick(&mut self, _completed: usize) {}
    fn finish(&mut self) {}
}

/// Collaborateur externe d'écriture d'animation.
///
/// Le cœur prépare la séquence raster ordonnée et la durée par frame; tout
/// l'encodage conteneur vit derrière cette interface étroite. L'absence de
/// tout writer est détectée avant la moindre rasterisation
/// ([`TextelError::AnimationWriterUnavailable`]).
pub trait AnimationWriter {
    /// Écrit la séquence ordonnée, chaque frame affichée `frame_delay`.
    ///
    /// # Errors
    /// Returns an error if the underlying encoder or destination fails.
    fn write_sequence(
        &mut self,
        frames: &[FrameBuffer],
        frame_delay: Duration,
    ) -> Result<(), TextelError>;
}
