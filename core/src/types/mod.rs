//! Core type definitions for radiograph conversion
//!
//! This module provides the fundamental types used throughout the hipfx library:
//! - [`Laterality`]: Imaged side (Left, Right)
//! - [`PhotometricInterpretation`]: Pixel polarity (MONOCHROME1 is inverted)
//! - [`PixelIntensityRelationship`]: Whether stored values are log-scaled
//! - [`Region`]: Crop box with bounds correction
//! - [`Window`] and [`WindowValue`]: Clip windows, declared or estimated

mod enums;
mod region;
mod window;

pub use enums::{Laterality, PhotometricInterpretation, PixelIntensityRelationship};
pub use region::{Region, DEFAULT_SIZE};
pub use window::{Window, WindowSource, WindowValue};
