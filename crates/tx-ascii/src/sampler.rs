use tx_core::config::ConvertOptions;
use tx_core::error::TextelError;
use tx_core::frame::{FrameBuffer, LumaBuffer};
use tx_source::resize::Resizer;

/// Échantillonne la luminance d'une frame à l'échelle de sortie.
///
/// La frame est redimensionnée en bilinéaire vers
/// `(round(w·s), round(h·s·a))` — `s` le facteur d'échelle, `a` la
/// correction d'aspect — puis réduite à un canal de luminance BT.709.
/// Chaque échantillon du buffer résultant devient une cellule de la grille
/// de caractères.
///
/// # Errors
/// Returns an error if the resize engine rejects the buffers.
///
/// # Example
/// ```
/// use tx_ascii::sampler::sample_luminance;
/// use tx_core::config::ConvertOptions;
/// use tx_core::frame::FrameBuffer;
/// use tx_source::resize::Resizer;
///
/// let frame = FrameBuffer::solid(10, 10, (255, 255, 255));
/// let opts = ConvertOptions { scalefactor: 1.0, ..Default::default() };
/// let luma = sample_luminance(&frame, &opts, &mut Resizer::new()).unwrap();
/// assert_eq!(luma.width, 10);
/// assert_eq!(luma.height, 5); // round(10 · 6/11)
/// ```
pub fn sample_luminance(
    frame: &FrameBuffer,
    opts: &ConvertOptions,
    resizer: &mut Resizer,
) -> Result<LumaBuffer, TextelError> {
    let target_w = ((frame.width as f32 * opts.scalefactor).round() as u32).max(1);
    let target_h = ((frame.height as f32 * opts.scalefactor * opts.aspect_correction).round()
        as u32)
        .max(1);

    let mut resized = FrameBuffer::new(target_w, target_h);
    resizer.resize_into(frame, &mut resized)?;
    Ok(to_luma(&resized))
}

/// Réduit une frame RGBA à son canal de luminance.
#[must_use]
pub fn to_luma(frame: &FrameBuffer) -> LumaBuffer {
    let mut luma = LumaBuffer::new(frame.width, frame.height);
    for y in 0..frame.height {
        for x in 0..frame.width {
            luma.set(x, y, frame.luminance(x, y));
        }
    }
    luma
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_shape_follows_scale_and_aspect() {
        // 20×10 at s = 0.5, a = 6/11 → 10 × round(2.727) = 10×3.
        let frame = FrameBuffer::new(20, 10);
        let opts = ConvertOptions {
            scalefactor: 0.5,
            ..Default::default()
        };
        let luma = sample_luminance(&frame, &opts, &mut Resizer::new()).unwrap();
        assert_eq!((luma.width, luma.height), (10, 3));
    }

    #[test]
    fn unit_scale_keeps_width() {
        let frame = FrameBuffer::new(10, 10);
        let opts = ConvertOptions {
            scalefactor: 1.0,
            ..Default::default()
        };
        let luma = sample_luminance(&frame, &opts, &mut Resizer::new()).unwrap();
        assert_eq!((luma.width, luma.height), (10, 5));
    }

    #[test]
    fn tiny_scale_clamps_to_one_sample() {
        let frame = FrameBuffer::new(4, 4);
        let opts = ConvertOptions {
            scalefactor: 0.01,
            ..Default::default()
        };
        let luma = sample_luminance(&frame, &opts, &mut Resizer::new()).unwrap();
        assert_eq!((luma.width, luma.height), (1, 1));
    }

    #[test]
    fn white_stays_white_through_sampling() {
        let frame = FrameBuffer::solid(10, 10, (255, 255, 255));
        let opts = ConvertOptions {
            scalefactor: 1.0,
            ..Default::default()
        };
        let luma = sample_luminance(&frame, &opts, &mut Resizer::new()).unwrap();
        assert!(luma.data.iter().all(|&v| v == 255));
    }
}
