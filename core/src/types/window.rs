use std::fmt;

/// A declared window attribute (WindowCenter or WindowWidth)
///
/// DICOM allows several windows to be declared at once, in which case the
/// attribute holds a list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum WindowValue {
    Single(f64),
    Multi(Vec<f64>),
}

impl WindowValue {
    /// Builds a value from the parsed numbers of a tag
    ///
    /// Returns `None` when the tag held no numbers.
    pub fn from_values(values: Vec<f64>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => Some(WindowValue::Single(values[0])),
            _ => Some(WindowValue::Multi(values)),
        }
    }

    /// Resolves to a scalar, taking the first element of a list
    pub fn resolve(&self) -> f64 {
        match self {
            WindowValue::Single(v) => *v,
            WindowValue::Multi(values) => values.first().copied().unwrap_or(f64::NAN),
        }
    }
}

/// Clip window (inclusive intensity bounds)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Window {
    pub low: f64,
    pub high: f64,
    pub source: WindowSource,
}

/// Where a clip window came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum WindowSource {
    /// WindowCenter/WindowWidth from the file
    Declared,
    /// 0.5th and 99.5th percentiles of the pixel values
    Estimated,
}

impl Window {
    /// Window from a declared center and width
    pub fn from_center_width(center: f64, width: f64) -> Self {
        Self {
            low: center - width / 2.0,
            high: center + width / 2.0,
            source: WindowSource::Declared,
        }
    }

    /// Window from estimated bounds
    pub fn estimated(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            source: WindowSource::Estimated,
        }
    }

    /// Clamps a single value into the window
    pub fn clip(&self, value: f64) -> f64 {
        if value < self.low {
            self.low
        } else if value > self.high {
            self.high
        } else {
            value
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            WindowSource::Declared => "declared",
            WindowSource::Estimated => "estimated",
        };
        write!(f, "[{}, {}] ({})", self.low, self.high, source)
    }
}
