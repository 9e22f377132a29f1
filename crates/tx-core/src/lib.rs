/// Configuration, types, and shared structures for textel.
///
/// This crate contains all shared types, traits, and configuration logic
/// used across the textel workspace: the glyph palette and its luminance
/// quantizer, pixel/character frame types, the error taxonomy, and the
/// progress/writer traits implemented by the leaf crates.

pub mod config;
pub mod error;
pub mod frame;
pub mod palette;
pub mod traits;

pub use config::{ConvertOptions, RasterOptions, SequenceOptions};
pub use error::TextelError;
pub use frame::{CharacterGrid, FrameBuffer, FrameSequence, LumaBuffer};
pub use palette::GlyphPalette;
pub use traits::{AnimationWriter, NoProgress, Progress};
