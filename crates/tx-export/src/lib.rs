/// Inverse path and animated export for textel.
///
/// Rasterizes character grids back into RGB bitmaps with a monospace font,
/// and adapts ordered frame sequences for the animation-writer
/// collaborator.

pub mod animation;
pub mod font;
pub mod rasterizer;
pub mod sequence;

pub use animation::default_writer;
pub use font::{FontData, resolve_font};
pub use rasterizer::{Rasterizer, rasterize_grid};
pub use sequence::{frames_to_animation, grids_to_animation};
