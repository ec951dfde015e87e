//! Pixel pipeline stages
//!
//! Each stage takes ownership of its input grid and returns a grid the
//! caller owns.

pub mod crop;
pub mod pixel;
pub mod resize;

pub use crop::{crop, flip_horizontal, rotate90};
pub use pixel::{estimate_window, normalize, NormalizedImage, PixelTransform, TransformOutput};
pub use resize::resize;
