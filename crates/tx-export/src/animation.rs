use std::path::Path;

use tx_core::error::TextelError;
pub use tx_core::traits::AnimationWriter;

/// Writer GIF adossé au codec `image`, disponible derrière la feature
/// `gif-export`.
#[cfg(feature = "gif-export")]
pub struct GifAnimationWriter {
    path: std::path::PathBuf,
}

#[cfg(feature = "gif-export")]
impl GifAnimationWriter {
    /// Écrira l'animation à `path`.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

#[cfg(feature = "gif-export")]
impl AnimationWriter for GifAnimationWriter {
    fn write_sequence(
        &mut self,
        frames: &[tx_core::frame::FrameBuffer],
        frame_delay: std::time::Duration,
    ) -> Result<(), TextelError> {
        use image::codecs::gif::{GifEncoder, Repeat};
        use image::{Delay, Frame, RgbaImage};
        use std::io::BufWriter;

        let file = std::fs::File::create(&self.path)?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| TextelError::AnimationEncode {
                detail: e.to_string(),
            })?;

        let delay = Delay::from_saturating_duration(frame_delay);
        for fb in frames {
            let buf = RgbaImage::from_raw(fb.width, fb.height, fb.data.clone()).ok_or_else(
                || TextelError::AnimationEncode {
                    detail: format!("frame {}×{} au buffer incohérent", fb.width, fb.height),
                },
            )?;
            encoder
                .encode_frame(Frame::from_parts(buf, 0, 0, delay))
                .map_err(|e| TextelError::AnimationEncode {
                    detail: e.to_string(),
                })?;
        }

        log::info!(
            "animation écrite : {} ({} frames)",
            self.path.display(),
            frames.len()
        );
        Ok(())
    }
}

/// Writer d'animation par défaut pour `path`.
///
/// # Errors
/// Sans collaborateur compilé, échoue immédiatement avec
/// [`TextelError::AnimationWriterUnavailable`] — avant que la moindre frame
/// ne soit rasterisée.
#[cfg(feature = "gif-export")]
pub fn default_writer(path: &Path) -> Result<Box<dyn AnimationWriter>, TextelError> {
    Ok(Box::new(GifAnimationWriter::new(path)))
}

/// Writer d'animation par défaut pour `path`.
///
/// # Errors
/// Sans collaborateur compilé, échoue immédiatement avec
/// [`TextelError::AnimationWriterUnavailable`] — avant que la moindre frame
/// ne soit rasterisée.
#[cfg(not(feature = "gif-export"))]
pub fn default_writer(_path: &Path) -> Result<Box<dyn AnimationWriter>, TextelError> {
    Err(TextelError::AnimationWriterUnavailable)
}

#[cfg(all(test, feature = "gif-export"))]
mod tests {
    use super::*;
    use std::time::Duration;
    use tx_core::frame::FrameBuffer;

    #[test]
    fn writes_a_gif_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gif");

        let frames = vec![
            FrameBuffer::solid(8, 8, (255, 0, 0)),
            FrameBuffer::solid(8, 8, (0, 0, 255)),
        ];
        let mut writer = GifAnimationWriter::new(&path);
        writer
            .write_sequence(&frames, Duration::from_millis(66))
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"GIF8"), "GIF magic expected");
    }

    #[test]
    fn default_writer_is_available_with_feature() {
        let dir = tempfile::tempdir().unwrap();
        assert!(default_writer(&dir.path().join("a.gif")).is_ok());
    }
}
