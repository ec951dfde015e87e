pub mod api;
pub mod cli;
pub mod convert;
pub mod error;
pub mod extraction;
pub mod index;
pub mod table;
pub mod transform;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use api::{ImagingExtractor, ImagingMetadata};
pub use cli::report::{PreviewTextReport, TextReport};
pub use convert::preview::{preview_directory, PreviewReport};
pub use convert::{BatchConverter, ConversionOutcome, ConversionReport, ConvertConfig, SkipReason};
pub use error::{HipfxError, Result};
pub use index::AccessionIndex;
pub use table::{RegionRecord, RegionTable};
pub use transform::{NormalizedImage, PixelTransform, TransformOutput};
pub use types::*;
