use std::fmt;

/// Laterality of the imaged hip (left/right)
///
/// Drives the mirroring convention: left images are flipped so that every
/// output array shows the anatomy the same way round. Sides other than left
/// or right keep their lowercase initial for artifact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Laterality {
    #[default]
    Unknown,
    Left,
    Right,
    Other(char),
}

impl Laterality {
    /// Returns whether images of this side get mirrored
    pub fn is_left(&self) -> bool {
        matches!(self, Laterality::Left)
    }

    /// Side initial used in artifact names
    pub fn initial(&self) -> char {
        match self {
            Laterality::Left => 'l',
            Laterality::Right => 'r',
            Laterality::Other(c) => *c,
            Laterality::Unknown => 'u',
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Laterality::Left => "left",
            Laterality::Right => "right",
            Laterality::Other(_) => "other",
            Laterality::Unknown => "unknown",
        }
    }

    /// Parses laterality from string
    ///
    /// Accepts the table spelling ("Left", "Right") and the DICOM codes
    /// ("L", "R") in any case. Any other non-empty value keeps its initial.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "left" | "l" => Laterality::Left,
            "right" | "r" => Laterality::Right,
            _ => lower
                .chars()
                .next()
                .map_or(Laterality::Unknown, Laterality::Other),
        }
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

impl<'de> serde::Deserialize<'de> for Laterality {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Laterality::from_str(&s))
    }
}

/// Photometric interpretation enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum PhotometricInterpretation {
    #[default]
    Unknown,
    Monochrome1,
    Monochrome2,
    PaletteColor,
    Rgb,
    YbrFull,
    YbrFull422,
}

impl PhotometricInterpretation {
    /// Returns whether this is a monochrome interpretation
    pub fn is_monochrome(&self) -> bool {
        matches!(
            self,
            PhotometricInterpretation::Monochrome1 | PhotometricInterpretation::Monochrome2
        )
    }

    /// Returns whether this is inverted (MONOCHROME1)
    pub fn is_inverted(&self) -> bool {
        matches!(self, PhotometricInterpretation::Monochrome1)
    }

    /// Parses photometric interpretation from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "MONOCHROME1" => PhotometricInterpretation::Monochrome1,
            "MONOCHROME2" => PhotometricInterpretation::Monochrome2,
            "PALETTE COLOR" => PhotometricInterpretation::PaletteColor,
            "RGB" => PhotometricInterpretation::Rgb,
            "YBR_FULL" => PhotometricInterpretation::YbrFull,
            "YBR_FULL_422" => PhotometricInterpretation::YbrFull422,
            _ => PhotometricInterpretation::Unknown,
        }
    }
}

impl fmt::Display for PhotometricInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhotometricInterpretation::Unknown => "UNKNOWN",
            PhotometricInterpretation::Monochrome1 => "MONOCHROME1",
            PhotometricInterpretation::Monochrome2 => "MONOCHROME2",
            PhotometricInterpretation::PaletteColor => "PALETTE COLOR",
            PhotometricInterpretation::Rgb => "RGB",
            PhotometricInterpretation::YbrFull => "YBR_FULL",
            PhotometricInterpretation::YbrFull422 => "YBR_FULL_422",
        };
        write!(f, "{}", name)
    }
}

/// Pixel Intensity Relationship (0028,1040)
///
/// Only `LOG` changes how pixels are processed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum PixelIntensityRelationship {
    #[default]
    Unspecified,
    Linear,
    Log,
    Other(String),
}

impl PixelIntensityRelationship {
    /// Returns whether pixel values are proportional to the log of exposure
    pub fn is_log(&self) -> bool {
        matches!(self, PixelIntensityRelationship::Log)
    }

    /// Parses the relationship from its DICOM code string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" => PixelIntensityRelationship::Unspecified,
            "lin" => PixelIntensityRelationship::Linear,
            "log" => PixelIntensityRelationship::Log,
            _ => PixelIntensityRelationship::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for PixelIntensityRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelIntensityRelationship::Unspecified => write!(f, "unspecified"),
            PixelIntensityRelationship::Linear => write!(f, "LIN"),
            PixelIntensityRelationship::Log => write!(f, "LOG"),
            PixelIntensityRelationship::Other(s) => write!(f, "{}", s),
        }
    }
}
