/// Source normalization for textel (file, URL, raw buffers, GIF demux).

pub mod gif;
pub mod input;
pub mod resize;

pub use gif::{decode_frames, probe_frame_count};
pub use input::ImageInput;
pub use resize::{Resizer, resize_frame};
