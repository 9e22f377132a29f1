use tx_core::config::RasterOptions;
use tx_core::error::TextelError;
use tx_core::frame::{CharacterGrid, FrameBuffer, FrameSequence};
use tx_core::traits::{AnimationWriter, Progress};

use crate::rasterizer::Rasterizer;

/// Rasterise une séquence de grilles et la confie au writer d'animation.
///
/// Chaque grille passe par le rasterizer (progression remontée frame par
/// frame), puis la séquence raster ordonnée part vers le collaborateur
/// avec une durée par frame de `1/fps`. Obtenez le writer via
/// [`crate::animation::default_writer`] AVANT d'appeler ceci : son absence
/// doit être détectée sans gâcher de travail de rasterisation.
///
/// # Errors
/// Returns an error if the writer fails.
pub fn grids_to_animation(
    seq: &FrameSequence<CharacterGrid>,
    rasterizer: &Rasterizer,
    opts: &RasterOptions,
    writer: &mut dyn AnimationWriter,
    progress: &mut dyn Progress,
) -> Result<(), TextelError> {
    progress.begin(seq.frames.len(), "Generating frames");

    let mut frames = Vec::with_capacity(seq.frames.len());
    for (i, grid) in seq.frames.iter().enumerate() {
        frames.push(rasterizer.render(grid, opts.fg_color, opts.bg_color));
        progress.tick(i + 1);
    }

    progress.finish();
    writer.write_sequence(&frames, seq.frame_duration())
}

/// Confie une séquence déjà raster au writer d'animation.
///
/// # Errors
/// Returns an error if the writer fails.
pub fn frames_to_animation(
    seq: &FrameSequence<FrameBuffer>,
    writer: &mut dyn AnimationWriter,
) -> Result<(), TextelError> {
    writer.write_sequence(&seq.frames, seq.frame_duration())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Writer factice : capture ce que le cœur lui confie.
    struct Capture {
        frame_count: usize,
        delay: Duration,
    }

    impl AnimationWriter for Capture {
        fn write_sequence(
            &mut self,
            frames: &[FrameBuffer],
            frame_delay: Duration,
        ) -> Result<(), TextelError> {
            self.frame_count = frames.len();
            self.delay = frame_delay;
            Ok(())
        }
    }

    #[test]
    fn raster_sequence_passes_through_with_inverse_fps() {
        let seq = FrameSequence::new(
            vec![FrameBuffer::new(2, 2), FrameBuffer::new(2, 2)],
            20.0,
        );
        let mut writer = Capture {
            frame_count: 0,
            delay: Duration::ZERO,
        };
        frames_to_animation(&seq, &mut writer).unwrap();
        assert_eq!(writer.frame_count, 2);
        assert_eq!(writer.delay.as_millis(), 50);
    }

    #[test]
    fn grid_sequence_rasterizes_every_frame() {
        let Ok(font) = crate::font::resolve_font(None) else {
            return; // host without system fonts
        };
        let Ok(rasterizer) = Rasterizer::new(&font, 10) else {
            return;
        };

        let grids = vec![
            CharacterGrid::from_text("\n@@\n@@\n"),
            CharacterGrid::from_text("\n..\n..\n"),
            CharacterGrid::from_text("\n##\n##\n"),
        ];
        let seq = FrameSequence::new(grids, 15.0);

        let mut writer = Capture {
            frame_count: 0,
            delay: Duration::ZERO,
        };
        let mut ticks = TickLog::default();
        grids_to_animation(
            &seq,
            &rasterizer,
            &RasterOptions::default(),
            &mut writer,
            &mut ticks,
        )
        .unwrap();

        assert_eq!(writer.frame_count, 3);
        assert_eq!(ticks.ticks, 3);
        assert!((writer.delay.as_secs_f64() - 1.0 / 15.0).abs() < 1e-9);
    }

    #[derive(Default)]
    struct TickLog {
        ticks: usize,
    }

    impl Progress for TickLog {
        fn begin(&mut self, _total: usize, _label: &str) {}
        fn tick(&mut self, _completed: usize) {
            self.ticks += 1;
        }
        fn finish(&mut self) {}
    }

    #[test]
    fn empty_sequence_still_reaches_writer() {
        let seq: FrameSequence<FrameBuffer> = FrameSequence::new(vec![], 15.0);
        let mut writer = Capture {
            frame_count: 99,
            delay: Duration::ZERO,
        };
        frames_to_animation(&seq, &mut writer).unwrap();
        assert_eq!(writer.frame_count, 0);
    }
}
