pub mod pixels;
pub mod tags;

pub use pixels::decode_pixels;
pub use tags::*;
