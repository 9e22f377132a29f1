/// ASCII conversion engine for textel.
///
/// Forward path: luminance sampling, histogram equalization, glyph
/// quantization and text composition — pixels in, character grid out.

pub mod compositor;
pub mod equalize;
pub mod sampler;

pub use compositor::{Compositor, figure_to_ascii};
