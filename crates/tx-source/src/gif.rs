use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use tx_core::error::TextelError;
use tx_core::frame::{FrameBuffer, FrameSequence};
use tx_core::traits::Progress;

/// Cadence par défaut quand le GIF ne porte aucun délai exploitable.
const FALLBACK_FPS: f32 = 15.0;

/// Compte les frames décodables d'un GIF animé.
///
/// Pré-passe d'inspection, pendant de `probe` côté vidéo : le nombre
/// déclaré pré-alloue le buffer de sortie et pilote la progression du
/// décodage proprement dit.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not a GIF.
///
/// # Example
/// ```no_run
/// use tx_source::gif::probe_frame_count;
/// use std::path::Path;
/// let n = probe_frame_count(Path::new("anim.gif")).unwrap();
/// ```
pub fn probe_frame_count(path: &Path) -> Result<usize, TextelError> {
    let decoder = open_decoder(path)?;
    let mut count = 0usize;
    for frame in decoder.into_frames() {
        if frame.is_err() {
            break;
        }
        count += 1;
    }
    log::debug!("probe_frame_count: {count} frames dans {}", path.display());
    Ok(count)
}

/// Décode un GIF animé en séquence de frames RGBA, dans l'ordre d'origine.
///
/// `declared` pré-alloue la séquence; un décodage qui produit moins de
/// frames qu'annoncé est une [`TextelError::IncompleteSequence`] plutôt
/// qu'une troncature silencieuse. La cadence de la séquence vient du délai
/// de la première frame.
///
/// # Errors
/// Returns an error if the file cannot be opened, is not a GIF, or decodes
/// fewer frames than `declared`.
///
/// # Example
/// ```no_run
/// use tx_source::gif::{decode_frames, probe_frame_count};
/// use tx_core::traits::NoProgress;
/// use std::path::Path;
///
/// let path = Path::new("anim.gif");
/// let declared = probe_frame_count(path).unwrap();
/// let seq = decode_frames(path, declared, &mut NoProgress).unwrap();
/// assert_eq!(seq.frames.len(), declared);
/// ```
pub fn decode_frames(
    path: &Path,
    declared: usize,
    progress: &mut dyn Progress,
) -> Result<FrameSequence<FrameBuffer>, TextelError> {
    let decoder = open_decoder(path)?;

    progress.begin(declared, "Reading frames");

    let mut frames: Vec<FrameBuffer> = Vec::with_capacity(declared);
    let mut fps = FALLBACK_FPS;

    for frame in decoder.into_frames() {
        if frames.len() >= declared {
            break;
        }
        let Ok(raw) = frame else { break };

        if frames.is_empty() {
            let (numer, denom) = raw.delay().numer_denom_ms();
            let ms = if denom == 0 { 0 } else { numer / denom };
            if ms > 0 {
                fps = 1000.0 / ms as f32;
            }
        }

        let buf = raw.buffer();
        let (width, height) = (buf.width(), buf.height());
        frames.push(FrameBuffer {
            data: buf.as_raw().clone(),
            width,
            height,
        });
        progress.tick(frames.len());
    }

    progress.finish();

    if frames.len() < declared {
        return Err(TextelError::IncompleteSequence {
            declared,
            decoded: frames.len(),
        });
    }

    Ok(FrameSequence::new(frames, fps))
}

fn open_decoder(path: &Path) -> Result<GifDecoder<BufReader<File>>, TextelError> {
    let file = File::open(path)?;
    GifDecoder::new(BufReader::new(file)).map_err(|e| TextelError::UnsupportedInput {
        detail: format!("{} : {e}", path.display()),
    })
}
