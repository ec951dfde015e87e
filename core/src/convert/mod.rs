//! Batch conversion of radiographs into square `.npy` arrays
//!
//! For every source image the region table is consulted. Each matching
//! record is cropped, resized, oriented, windowed and written as one
//! artifact named `<base>[_<side>][_lat].npy`.

pub mod preview;

use crate::api::{ImagingExtractor, ImagingMetadata};
use crate::error::{HipfxError, Result};
use crate::extraction::decode_pixels;
use crate::table::{RegionRecord, RegionTable};
use crate::transform::{crop, flip_horizontal, resize, rotate90, PixelTransform, TransformOutput};
use crate::types::DEFAULT_SIZE;
use dicom_object::open_file;
use log::{debug, info, warn};
use ndarray::Array2;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Options for a conversion run
///
/// # Example
///
/// ```
/// use hipfx_core::ConvertConfig;
///
/// let config = ConvertConfig::default()
///     .with_flip(false)
///     .group_by_accession(true);
///
/// assert!(config.crop);
/// assert!(!config.flip);
/// assert!(config.group_by_accession);
/// assert_eq!(config.size, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ConvertConfig {
    /// Crop to the record's region and resize to `size`
    pub crop: bool,

    /// Mirror left-side images
    pub flip: bool,

    /// Write into one subdirectory per accession number
    pub group_by_accession: bool,

    /// Side length of cropped output arrays
    pub size: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            crop: true,
            flip: true,
            group_by_accession: false,
            size: DEFAULT_SIZE,
        }
    }
}

impl ConvertConfig {
    /// Sets whether to crop and resize
    pub fn with_crop(mut self, crop: bool) -> Self {
        self.crop = crop;
        self
    }

    /// Sets whether to mirror left-side images
    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Sets whether to group artifacts by accession number
    pub fn group_by_accession(mut self, group: bool) -> Self {
        self.group_by_accession = group;
        self
    }

    /// Sets the output side length
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
}

/// A decoded source radiograph
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// File name without extension
    pub base: String,

    /// Imaging attributes
    pub metadata: ImagingMetadata,

    /// Stored pixel values of the first frame
    pub pixels: Array2<f64>,
}

impl SourceImage {
    /// Opens and decodes a DICOM file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let dcm = open_file(path)?;
        let metadata = ImagingExtractor::extract(&dcm)?;
        let pixels = decode_pixels(&dcm)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            base: base_name(&file_name).to_string(),
            metadata,
            pixels,
        })
    }
}

/// Why an image produced no artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum SkipReason {
    /// No table record matches the file
    NoRecords,
    /// The first matching record has no left boundary
    NoRegion,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoRecords => write!(f, "no region records"),
            SkipReason::NoRegion => write!(f, "no region defined"),
        }
    }
}

/// Outcome of converting one source image
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Skipped(SkipReason),
    Converted {
        artifacts: Vec<PathBuf>,
        used_log_path: bool,
    },
}

/// Summary of a batch run
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ConversionReport {
    /// Written artifact paths
    pub artifacts: Vec<PathBuf>,

    /// Files skipped with their reason
    pub skipped: Vec<(String, SkipReason)>,

    /// Files that failed with the error message
    pub failures: Vec<(String, String)>,

    /// Source files that took the logarithmic path
    pub log_images: Vec<String>,

    /// Whether the run stopped early on cancellation
    pub cancelled: bool,

    /// Wall time of the run
    pub elapsed: Duration,
}

/// Base identifier of a file name: everything before the first '.'
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Artifact name (without extension) for a record
///
/// Uncropped output is named after the source alone. Cropped output adds the
/// side initial and, for cross views, `_lat`.
pub fn artifact_name(base: &str, record: &RegionRecord, crop: bool) -> String {
    if !crop {
        return base.to_string();
    }

    let mut name = format!("{}_{}", base, record.side.initial());
    if record.is_lateral() {
        name.push_str("_lat");
    }
    name
}

fn remove_artifacts(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}

/// Runs the conversion pipeline against a region table
pub struct BatchConverter<'a> {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    table: &'a RegionTable,
    config: ConvertConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> BatchConverter<'a> {
    /// Creates a converter
    ///
    /// # Errors
    ///
    /// Returns [`HipfxError::MissingDirectory`] if either directory does not
    /// exist.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        source_dir: P,
        dest_dir: Q,
        table: &'a RegionTable,
        config: ConvertConfig,
    ) -> Result<Self> {
        let source_dir = source_dir.into();
        let dest_dir = dest_dir.into();
        for dir in [&source_dir, &dest_dir] {
            if !dir.is_dir() {
                return Err(HipfxError::MissingDirectory(dir.clone()));
            }
        }

        Ok(Self {
            source_dir,
            dest_dir,
            table,
            config,
            cancel: None,
        })
    }

    /// Checks this flag between images and stops once it is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Converts one source image by file name
    ///
    /// Images without records, or whose first record has no region, are
    /// skipped without touching the filesystem.
    pub fn convert(&self, image_file: &str) -> Result<ConversionOutcome> {
        let base = base_name(image_file);
        let records: Vec<&RegionRecord> = self.table.records_for(base).collect();

        let Some(first) = records.first() else {
            debug!("No records for {}", base);
            return Ok(ConversionOutcome::Skipped(SkipReason::NoRecords));
        };
        if first.has_undefined_left() {
            debug!("No region for {}", base);
            return Ok(ConversionOutcome::Skipped(SkipReason::NoRegion));
        }

        let source = SourceImage::open(self.source_dir.join(image_file))?;
        self.convert_source(base, &source, &records)
    }

    /// Runs every record of an already decoded image
    ///
    /// All records are rendered before anything is written, so a record
    /// that cannot be rendered leaves no artifacts behind. If a write fails,
    /// the artifacts already written for this image are removed again.
    pub fn convert_source(
        &self,
        base: &str,
        source: &SourceImage,
        records: &[&RegionRecord],
    ) -> Result<ConversionOutcome> {
        let records = if self.config.crop {
            records
        } else {
            &records[..records.len().min(1)]
        };

        let mut rendered = Vec::with_capacity(records.len());
        for record in records {
            rendered.push((*record, self.render(source, record)?));
        }
        let used_log_path = rendered.iter().any(|(_, output)| output.used_log_path);

        let mut artifacts = Vec::with_capacity(rendered.len());
        for (record, output) in &rendered {
            match self.write_artifact(base, record, output) {
                Ok(path) => artifacts.push(path),
                Err(e) => {
                    remove_artifacts(&artifacts);
                    return Err(e);
                }
            }
        }

        Ok(ConversionOutcome::Converted {
            artifacts,
            used_log_path,
        })
    }

    fn write_artifact(
        &self,
        base: &str,
        record: &RegionRecord,
        output: &TransformOutput,
    ) -> Result<PathBuf> {
        let dir = self.output_dir(record)?;
        let path = dir.join(format!(
            "{}.npy",
            artifact_name(base, record, self.config.crop)
        ));
        ndarray_npy::write_npy(&path, &output.image.to_u8())?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Applies crop, resize, orientation and windowing for one record
    pub fn render(&self, source: &SourceImage, record: &RegionRecord) -> Result<TransformOutput> {
        let mut pixels = source.pixels.clone();

        if self.config.crop {
            let region = record.region().ok_or_else(|| HipfxError::MissingRegion {
                filename: record.filename.clone(),
                side: record.side.to_string(),
            })?;
            pixels = crop(pixels, region, self.config.size);
            pixels = resize(pixels, self.config.size)?;
            if record.is_cross_table() {
                pixels = rotate90(pixels);
            }
            if self.config.flip && record.side.is_left() {
                pixels = flip_horizontal(pixels);
            }
        }

        Ok(PixelTransform::apply(pixels, &source.metadata, true))
    }

    /// Processes a list of file names, isolating per-image failures
    pub fn run<S: AsRef<str>>(&self, image_files: &[S]) -> ConversionReport {
        let started = Instant::now();
        let mut report = ConversionReport::default();

        for image_file in image_files {
            if self.is_cancelled() {
                warn!("Conversion cancelled");
                report.cancelled = true;
                break;
            }

            let image_file = image_file.as_ref();
            match self.convert(image_file) {
                Ok(ConversionOutcome::Converted {
                    artifacts,
                    used_log_path,
                }) => {
                    if used_log_path {
                        report.log_images.push(image_file.to_string());
                    }
                    report.artifacts.extend(artifacts);
                }
                Ok(ConversionOutcome::Skipped(reason)) => {
                    report.skipped.push((image_file.to_string(), reason));
                }
                Err(e) => {
                    warn!("Failed to convert {}: {}", image_file, e);
                    report.failures.push((image_file.to_string(), e.to_string()));
                }
            }
        }

        report.elapsed = started.elapsed();
        report
    }

    fn output_dir(&self, record: &RegionRecord) -> Result<PathBuf> {
        if !self.config.group_by_accession {
            return Ok(self.dest_dir.clone());
        }

        let dir = self.dest_dir.join(record.accession_dir());
        if !dir.is_dir() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tags::PIXEL_INTENSITY_RELATIONSHIP;
    use crate::test_utils::write_test_dicom;
    use crate::types::{Laterality, PixelIntensityRelationship};
    use dicom_core::VR;
    use ndarray::Array;
    use tempfile::TempDir;

    fn record(
        filename: &str,
        side: Laterality,
        image_type: &str,
        left: Option<f64>,
    ) -> RegionRecord {
        RegionRecord {
            filename: filename.to_string(),
            left,
            right: left.map(|l| l + 40.0),
            upper: Some(10.0),
            lower: Some(50.0),
            side,
            image_type: image_type.to_string(),
            accession: "5501.0".to_string(),
        }
    }

    fn gradient(rows: usize, cols: usize) -> Array2<f64> {
        Array::from_shape_fn((rows, cols), |(r, c)| (r * 7 + c * 13) as f64)
    }

    fn source(rows: usize, cols: usize) -> SourceImage {
        SourceImage {
            base: "IMG".to_string(),
            metadata: ImagingMetadata::default(),
            pixels: gradient(rows, cols),
        }
    }

    fn dirs() -> (TempDir, TempDir) {
        (TempDir::new().unwrap(), TempDir::new().unwrap())
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("E5482906S3I1.DCM"), "E5482906S3I1");
        assert_eq!(base_name("study.1.dcm"), "study");
        assert_eq!(base_name("noext"), "noext");
    }

    #[test]
    fn test_artifact_name() {
        let right = record("A", Laterality::Right, "AP Pelvis", Some(0.0));
        let left_lat = record("A", Laterality::Left, "Cross Table Lateral", Some(0.0));
        assert_eq!(artifact_name("A", &right, true), "A_r");
        assert_eq!(artifact_name("A", &left_lat, true), "A_l_lat");
        assert_eq!(artifact_name("A", &left_lat, false), "A");

        let bilateral = record("A", Laterality::from_str("Bilateral"), "AP", Some(0.0));
        assert_eq!(artifact_name("A", &bilateral, true), "A_b");
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let table = RegionTable::default();
        let (src, _) = dirs();
        let result = BatchConverter::new(
            src.path(),
            src.path().join("missing"),
            &table,
            ConvertConfig::default(),
        );
        assert!(matches!(result, Err(HipfxError::MissingDirectory(_))));
    }

    #[test]
    fn test_skip_without_records() {
        let table = RegionTable::new(vec![record("OTHER", Laterality::Left, "AP", Some(0.0))]);
        let (src, dst) = dirs();
        let converter =
            BatchConverter::new(src.path(), dst.path(), &table, ConvertConfig::default()).unwrap();

        // The file does not even exist: skipping must happen before any read
        let outcome = converter.convert("IMG.dcm").unwrap();
        assert_eq!(outcome, ConversionOutcome::Skipped(SkipReason::NoRecords));
        assert_eq!(fs::read_dir(dst.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_skip_without_region() {
        let table = RegionTable::new(vec![record("IMG", Laterality::Left, "AP", None)]);
        let (src, dst) = dirs();
        let converter =
            BatchConverter::new(src.path(), dst.path(), &table, ConvertConfig::default()).unwrap();

        let outcome = converter.convert("IMG.dcm").unwrap();
        assert_eq!(outcome, ConversionOutcome::Skipped(SkipReason::NoRegion));
        assert_eq!(fs::read_dir(dst.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_render_crops_and_resizes() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let config = ConvertConfig::default().with_size(32);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();

        let rec = record("IMG", Laterality::Right, "AP Pelvis", Some(5.0));
        let output = converter.render(&source(80, 100), &rec).unwrap();
        assert_eq!(output.image.dim(), (32, 32));
        assert!(!output.used_log_path);
    }

    #[test]
    fn test_render_flips_left_side() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let config = ConvertConfig::default().with_size(40);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();
        let image = source(60, 60);

        let right = converter
            .render(&image, &record("IMG", Laterality::Right, "AP", Some(0.0)))
            .unwrap()
            .image
            .to_u8();
        let left = converter
            .render(&image, &record("IMG", Laterality::Left, "AP", Some(0.0)))
            .unwrap()
            .image
            .to_u8();

        let mut mirrored = right.clone();
        mirrored.invert_axis(ndarray::Axis(1));
        assert_eq!(left, mirrored);

        let no_flip = BatchConverter::new(src.path(), dst.path(), &table, config.with_flip(false))
            .unwrap()
            .render(&image, &record("IMG", Laterality::Left, "AP", Some(0.0)))
            .unwrap()
            .image
            .to_u8();
        assert_eq!(no_flip, right);
    }

    #[test]
    fn test_render_rotates_cross_table() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let config = ConvertConfig::default().with_size(40);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();
        let image = source(60, 60);

        let plain = converter
            .render(&image, &record("IMG", Laterality::Right, "AP", Some(0.0)))
            .unwrap()
            .image
            .to_u8();
        let cross = converter
            .render(
                &image,
                &record("IMG", Laterality::Right, "Cross Table Lateral", Some(0.0)),
            )
            .unwrap()
            .image
            .to_u8();

        assert_eq!(cross.dim(), (40, 40));
        assert_ne!(cross, plain);
        // Top-left of the rotated image is the top-right of the original
        assert_eq!(cross[[0, 0]], plain[[0, 39]]);
    }

    #[test]
    fn test_uncropped_writes_once() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let config = ConvertConfig::default().with_crop(false);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();

        let right = record("IMG", Laterality::Right, "AP", Some(0.0));
        let left = record("IMG", Laterality::Left, "AP", Some(0.0));
        let outcome = converter
            .convert_source("IMG", &source(30, 20), &[&right, &left])
            .unwrap();

        match outcome {
            ConversionOutcome::Converted { artifacts, .. } => {
                assert_eq!(artifacts, vec![dst.path().join("IMG.npy")]);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        let saved: Array2<u8> = ndarray_npy::read_npy(dst.path().join("IMG.npy")).unwrap();
        assert_eq!(saved.dim(), (30, 20));
    }

    #[test]
    fn test_group_by_accession() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let config = ConvertConfig::default()
            .with_size(20)
            .group_by_accession(true);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();

        let right = record("IMG", Laterality::Right, "AP", Some(0.0));
        let left = record("IMG", Laterality::Left, "Cross Table", Some(10.0));
        converter
            .convert_source("IMG", &source(60, 60), &[&right, &left])
            .unwrap();

        let dir = dst.path().join("5501");
        assert!(dir.join("IMG_r.npy").is_file());
        assert!(dir.join("IMG_l_lat.npy").is_file());
    }

    #[test]
    fn test_convert_dicom_end_to_end() {
        let (src, dst) = dirs();
        let pixels: Vec<u16> = (0..120 * 90).map(|i| (i % 4000) as u16).collect();
        write_test_dicom(&src.path().join("HIP1.dcm"), 120, 90, &pixels, &[]).unwrap();

        let table = RegionTable::new(vec![
            record("HIP1", Laterality::Right, "AP Pelvis", Some(10.0)),
            record("HIP1", Laterality::Left, "AP Pelvis", Some(40.0)),
        ]);
        let config = ConvertConfig::default().with_size(40);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();

        let report = converter.run(&["HIP1.dcm", "NOPE.dcm"]);
        assert_eq!(report.artifacts.len(), 2);
        assert_eq!(report.skipped, vec![("NOPE.dcm".to_string(), SkipReason::NoRecords)]);
        assert!(report.failures.is_empty());
        assert!(report.log_images.is_empty());

        let saved: Array2<u8> = ndarray_npy::read_npy(dst.path().join("HIP1_l.npy")).unwrap();
        assert_eq!(saved.dim(), (40, 40));
    }

    #[test]
    fn test_run_records_log_images() {
        let (src, dst) = dirs();
        let pixels: Vec<u16> = (0..64 * 64).map(|i| (i * 3) as u16).collect();
        write_test_dicom(
            &src.path().join("LOG1.dcm"),
            64,
            64,
            &pixels,
            &[(PIXEL_INTENSITY_RELATIONSHIP, VR::CS, "LOG")],
        )
        .unwrap();

        let table = RegionTable::new(vec![record("LOG1", Laterality::Right, "AP", Some(0.0))]);
        let config = ConvertConfig::default().with_size(40);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();

        let report = converter.run(&["LOG1.dcm"]);
        assert_eq!(report.log_images, vec!["LOG1.dcm".to_string()]);
        assert_eq!(report.artifacts.len(), 1);
    }

    #[test]
    fn test_run_isolates_failures() {
        let (src, dst) = dirs();
        fs::write(src.path().join("BAD.dcm"), b"not a dicom file").unwrap();
        let pixels: Vec<u16> = (0..50 * 50).map(|i| i as u16).collect();
        write_test_dicom(&src.path().join("GOOD.dcm"), 50, 50, &pixels, &[]).unwrap();

        let table = RegionTable::new(vec![
            record("BAD", Laterality::Right, "AP", Some(0.0)),
            record("GOOD", Laterality::Right, "AP", Some(0.0)),
        ]);
        let config = ConvertConfig::default().with_size(40);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();

        let report = converter.run(&["BAD.dcm", "GOOD.dcm"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "BAD.dcm");
        assert_eq!(report.artifacts, vec![dst.path().join("GOOD_r.npy")]);
    }

    #[test]
    fn test_partial_region_writes_nothing() {
        let (src, dst) = dirs();
        let pixels: Vec<u16> = (0..120 * 90).map(|i| (i % 4000) as u16).collect();
        write_test_dicom(&src.path().join("P.dcm"), 120, 90, &pixels, &[]).unwrap();

        let mut left = record("P", Laterality::Left, "AP Pelvis", Some(40.0));
        left.right = None;
        let table = RegionTable::new(vec![
            record("P", Laterality::Right, "AP Pelvis", Some(10.0)),
            left,
        ]);
        let config = ConvertConfig::default().with_size(40);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();

        let report = converter.run(&["P.dcm"]);
        assert!(report.artifacts.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].1, "No region for P (left)");
        assert_eq!(fs::read_dir(dst.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_render_reports_missing_region() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let converter =
            BatchConverter::new(src.path(), dst.path(), &table, ConvertConfig::default()).unwrap();

        let mut rec = record("IMG", Laterality::Right, "AP", Some(0.0));
        rec.lower = None;
        let result = converter.render(&source(60, 60), &rec);
        assert!(matches!(result, Err(HipfxError::MissingRegion { .. })));
    }

    #[test]
    fn test_failed_write_removes_written_artifacts() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let config = ConvertConfig::default()
            .with_size(20)
            .group_by_accession(true);
        let converter = BatchConverter::new(src.path(), dst.path(), &table, config).unwrap();

        // A plain file where the second accession directory should go
        fs::write(dst.path().join("7700"), b"occupied").unwrap();
        let right = record("IMG", Laterality::Right, "AP", Some(0.0));
        let mut left = record("IMG", Laterality::Left, "AP", Some(10.0));
        left.accession = "7700".to_string();

        let result = converter.convert_source("IMG", &source(60, 60), &[&right, &left]);
        assert!(result.is_err());
        assert!(!dst.path().join("5501").join("IMG_r.npy").exists());
    }

    #[test]
    fn test_render_full_size_radiograph() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let converter =
            BatchConverter::new(src.path(), dst.path(), &table, ConvertConfig::default()).unwrap();

        let mut rec = record("IMG", Laterality::Right, "AP Pelvis", Some(100.0));
        rec.right = Some(1100.0);
        rec.upper = Some(50.0);
        rec.lower = Some(1050.0);

        let output = converter.render(&source(2000, 1500), &rec).unwrap();
        let image = output.image.to_u8();
        assert_eq!(image.dim(), (DEFAULT_SIZE, DEFAULT_SIZE));
        assert_eq!(image.iter().min(), Some(&0));
        assert_eq!(image.iter().max(), Some(&255));
        assert!(!output.used_log_path);
    }

    #[test]
    fn test_run_stops_when_cancelled() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let flag = Arc::new(AtomicBool::new(true));
        let converter = BatchConverter::new(src.path(), dst.path(), &table, ConvertConfig::default())
            .unwrap()
            .with_cancel_flag(flag);

        let report = converter.run(&["A.dcm", "B.dcm"]);
        assert!(report.cancelled);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_log_metadata_marks_output() {
        let table = RegionTable::default();
        let (src, dst) = dirs();
        let converter = BatchConverter::new(
            src.path(),
            dst.path(),
            &table,
            ConvertConfig::default().with_size(40),
        )
        .unwrap();
        let mut image = source(60, 60);
        image.metadata.pixel_intensity_relationship = PixelIntensityRelationship::Log;

        let output = converter
            .render(&image, &record("IMG", Laterality::Right, "AP", Some(0.0)))
            .unwrap();
        assert!(output.used_log_path);
    }
}
