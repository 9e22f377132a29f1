use std::path::PathBuf;

use image::DynamicImage;
use tx_core::error::TextelError;
use tx_core::frame::FrameBuffer;

/// Source d'image explicite, résolue à la frontière du pipeline.
///
/// Chaque variante se normalise vers le même [`FrameBuffer`] RGBA interne;
/// une représentation impossible à normaliser échoue avec
/// [`TextelError::UnsupportedInput`].
///
/// # Example
/// ```
/// use tx_source::input::ImageInput;
/// let input = ImageInput::Pixels {
///     data: vec![255; 4],
///     width: 2,
///     height: 2,
///     channels: 1,
/// };
/// let frame = input.decode().unwrap();
/// assert_eq!((frame.width, frame.height), (2, 2));
/// ```
pub enum ImageInput {
    /// Fichier image local (PNG, JPEG, BMP, GIF).
    Path(PathBuf),
    /// URL distante, téléchargée puis décodée en mémoire.
    Url(String),
    /// Buffer brut d'échantillons 8-bit, row-major.
    Pixels {
        /// Samples, `width * height * channels` bytes.
        data: Vec<u8>,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// 1 (gris), 3 (RGB) ou 4 (RGBA).
        channels: u8,
    },
    /// Image déjà décodée par le crate `image`.
    Decoded(DynamicImage),
}

impl ImageInput {
    /// Buffer RGB d'une surface de rendu (figure de bibliothèque de tracé) :
    /// 3 bytes par pixel, row-major, sans padding.
    #[must_use]
    pub fn figure(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self::Pixels {
            data,
            width,
            height,
            channels: 3,
        }
    }

    /// Chemin local ou URL http(s), selon le préfixe.
    #[must_use]
    pub fn path_or_url(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::Path(PathBuf::from(source))
        }
    }

    /// Normalise la source vers le buffer RGBA interne.
    ///
    /// # Errors
    /// Returns [`TextelError::UnsupportedInput`] if the source cannot be
    /// fetched, decoded, or if a raw buffer's shape is inconsistent.
    pub fn decode(self) -> Result<FrameBuffer, TextelError> {
        match self {
            Self::Path(path) => {
                let img = image::open(&path).map_err(|e| TextelError::UnsupportedInput {
                    detail: format!("{} : {e}", path.display()),
                })?;
                Ok(to_frame(&img))
            }
            Self::Url(url) => {
                let bytes = fetch_bytes(&url)?;
                let img =
                    image::load_from_memory(&bytes).map_err(|e| TextelError::UnsupportedInput {
                        detail: format!("{url} : {e}"),
                    })?;
                Ok(to_frame(&img))
            }
            Self::Pixels {
                data,
                width,
                height,
                channels,
            } => pixels_to_frame(data, width, height, channels),
            Self::Decoded(img) => Ok(to_frame(&img)),
        }
    }
}

/// Télécharge le corps de la réponse en mémoire.
fn fetch_bytes(url: &str) -> Result<Vec<u8>, TextelError> {
    let response = reqwest::blocking::get(url).map_err(|e| TextelError::UnsupportedInput {
        detail: format!("{url} : {e}"),
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(TextelError::UnsupportedInput {
            detail: format!("{url} : HTTP {status}"),
        });
    }
    let bytes = response.bytes().map_err(|e| TextelError::UnsupportedInput {
        detail: format!("{url} : {e}"),
    })?;
    log::debug!("fetched {} bytes from {url}", bytes.len());
    Ok(bytes.to_vec())
}

fn to_frame(img: &DynamicImage) -> FrameBuffer {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    }
}

/// Expanse un buffer brut 1/3/4 canaux vers RGBA.
fn pixels_to_frame(
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
) -> Result<FrameBuffer, TextelError> {
    let expected = width as usize * height as usize * channels as usize;
    if data.len() != expected {
        return Err(TextelError::UnsupportedInput {
            detail: format!(
                "buffer de {} bytes pour {width}×{height}×{channels} (attendu {expected})",
                data.len()
            ),
        });
    }

    let mut frame = FrameBuffer::new(width, height);
    match channels {
        1 => {
            for (dst, &v) in frame.data.chunks_exact_mut(4).zip(data.iter()) {
                dst[0] = v;
                dst[1] = v;
                dst[2] = v;
                dst[3] = 255;
            }
        }
        3 => {
            for (dst, src) in frame.data.chunks_exact_mut(4).zip(data.chunks_exact(3)) {
                dst[0] = src[0];
                dst[1] = src[1];
                dst[2] = src[2];
                dst[3] = 255;
            }
        }
        4 => frame.data.copy_from_slice(&data),
        other => {
            return Err(TextelError::UnsupportedInput {
                detail: format!("{other} canaux (supportés : 1, 3, 4)"),
            });
        }
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_buffer_expands_to_rgba() {
        let input = ImageInput::Pixels {
            data: vec![0, 128, 255, 64],
            width: 2,
            height: 2,
            channels: 1,
        };
        let frame = input.decode().unwrap();
        assert_eq!(frame.pixel(1, 0), (128, 128, 128, 255));
        assert_eq!(frame.pixel(0, 1), (255, 255, 255, 255));
    }

    #[test]
    fn figure_buffer_is_rgb() {
        let input = ImageInput::figure(vec![10, 20, 30, 40, 50, 60], 2, 1);
        let frame = input.decode().unwrap();
        assert_eq!(frame.pixel(0, 0), (10, 20, 30, 255));
        assert_eq!(frame.pixel(1, 0), (40, 50, 60, 255));
    }

    #[test]
    fn unsupported_channel_count_rejected() {
        let input = ImageInput::Pixels {
            data: vec![0; 8],
            width: 2,
            height: 2,
            channels: 2,
        };
        assert!(matches!(
            input.decode(),
            Err(TextelError::UnsupportedInput { .. })
        ));
    }

    #[test]
    fn shape_mismatch_rejected() {
        let input = ImageInput::Pixels {
            data: vec![0; 5],
            width: 2,
            height: 2,
            channels: 1,
        };
        assert!(matches!(
            input.decode(),
            Err(TextelError::UnsupportedInput { .. })
        ));
    }

    #[test]
    fn path_roundtrip_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255]))
            .save(&path)
            .unwrap();

        let frame = ImageInput::Path(path).decode().unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.pixel(2, 1), (9, 8, 7, 255));
    }

    #[test]
    fn missing_path_is_unsupported_input() {
        let input = ImageInput::Path(PathBuf::from("/nonexistent/probe.png"));
        assert!(matches!(
            input.decode(),
            Err(TextelError::UnsupportedInput { .. })
        ));
    }

    #[test]
    fn url_scheme_detection() {
        assert!(matches!(
            ImageInput::path_or_url("https://example.org/a.png"),
            ImageInput::Url(_)
        ));
        assert!(matches!(
            ImageInput::path_or_url("a/b.png"),
            ImageInput::Path(_)
        ));
    }
}
