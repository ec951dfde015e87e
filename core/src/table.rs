//! Region table: crop boxes and orientation per source image
//!
//! One row per imaged side, with the columns
//! `filename,left,right,upper,lower,side,image_type,accession`.
//! Rows whose `left` boundary is empty or `NaN` carry no region.

use crate::error::Result;
use crate::types::{Laterality, Region};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Image types starting with this are cross-table laterals and get rotated
pub const CROSS_TABLE_PREFIX: &str = "Cross Table";

/// Image types starting with this get the `_lat` artifact suffix
pub const CROSS_PREFIX: &str = "Cross";

/// One row of the region table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionRecord {
    /// Source file name without extension
    pub filename: String,

    pub left: Option<f64>,
    pub right: Option<f64>,
    pub upper: Option<f64>,
    pub lower: Option<f64>,

    /// Imaged side
    pub side: Laterality,

    /// Free-text acquisition type, tested by prefix
    #[serde(default)]
    pub image_type: String,

    /// Accession number, possibly with a fractional suffix (e.g. "123.0")
    #[serde(default)]
    pub accession: String,
}

impl RegionRecord {
    /// Returns the crop region, or `None` when any boundary is undefined
    ///
    /// Fractional bounds are kept as-is; they are truncated only when the
    /// grid is sliced.
    pub fn region(&self) -> Option<Region> {
        let bound = |v: Option<f64>| v.filter(|x| x.is_finite());
        Some(Region::new(
            bound(self.left)?,
            bound(self.right)?,
            bound(self.upper)?,
            bound(self.lower)?,
        ))
    }

    /// Returns whether the left boundary is missing
    pub fn has_undefined_left(&self) -> bool {
        !self.left.is_some_and(|x| x.is_finite())
    }

    /// Cross-table acquisitions are rotated a quarter turn
    pub fn is_cross_table(&self) -> bool {
        self.image_type.starts_with(CROSS_TABLE_PREFIX)
    }

    /// Cross views get the `_lat` suffix
    pub fn is_lateral(&self) -> bool {
        self.image_type.starts_with(CROSS_PREFIX)
    }

    /// Accession number with any fractional suffix stripped
    pub fn accession_dir(&self) -> &str {
        self.accession
            .split('.')
            .next()
            .unwrap_or(&self.accession)
            .trim()
    }
}

/// In-memory region table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionTable {
    records: Vec<RegionRecord>,
}

impl RegionTable {
    /// Creates a table from records
    pub fn new(records: Vec<RegionRecord>) -> Self {
        Self { records }
    }

    /// Loads a table from a CSV file with a header row
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv_reader(reader)
    }

    /// Loads a table from any CSV source with a header row
    pub fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: RegionRecord = result?;
            records.push(record);
        }
        Ok(Self { records })
    }

    /// All records for a base file name, in table order
    pub fn records_for<'a>(&'a self, base: &'a str) -> impl Iterator<Item = &'a RegionRecord> + 'a {
        self.records.iter().filter(move |r| r.filename == base)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
