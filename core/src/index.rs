//! Filename to accession number index
//!
//! Maps each DICOM file's base name to the AccessionNumber stored in it, so
//! review tooling can look a study up from an image file.

use crate::convert::base_name;
use crate::error::{HipfxError, Result};
use crate::extraction::tags::{get_string_value, ACCESSION_NUMBER, PIXEL_DATA};
use dicom_object::OpenFileOptions;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Base file name -> accession number, ordered by file name
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(transparent))]
pub struct AccessionIndex {
    entries: BTreeMap<String, String>,
}

impl AccessionIndex {
    /// Reads the accession number of every `*.dcm` file in a directory
    ///
    /// Only the header is parsed; pixel data is never loaded. Files that
    /// cannot be read, or carry no accession number, are logged and left out.
    pub fn from_directory(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(HipfxError::MissingDirectory(dir.to_path_buf()));
        }

        let mut entries = BTreeMap::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if !name.to_lowercase().ends_with("dcm") {
                continue;
            }

            let dcm = match OpenFileOptions::new().read_until(PIXEL_DATA).open_file(&path) {
                Ok(dcm) => dcm,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            match get_string_value(&dcm, ACCESSION_NUMBER).filter(|s| !s.is_empty()) {
                Some(accession) => {
                    debug!("{} -> {}", name, accession);
                    entries.insert(base_name(&name).to_string(), accession);
                }
                None => warn!("No accession number in {}", path.display()),
            }
        }

        Ok(Self { entries })
    }

    /// Accession number for a base file name
    pub fn get(&self, base: &str) -> Option<&str> {
        self.entries.get(base).map(String::as_str)
    }

    /// Number of indexed files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no file was indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in file name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Writes the index as a `filename,accession` CSV
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["filename", "accession"])?;
        for (filename, accession) in self.iter() {
            writer.write_record([filename, accession])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_test_dicom;
    use dicom_core::VR;
    use tempfile::TempDir;

    #[test]
    fn test_index_directory() {
        let dir = TempDir::new().unwrap();
        let pixels = vec![0_u16; 4 * 4];
        write_test_dicom(
            &dir.path().join("IMG1.dcm"),
            4,
            4,
            &pixels,
            &[(ACCESSION_NUMBER, VR::SH, "E1001")],
        )
        .unwrap();
        write_test_dicom(
            &dir.path().join("IMG2.DCM"),
            4,
            4,
            &pixels,
            &[(ACCESSION_NUMBER, VR::SH, "E1002")],
        )
        .unwrap();
        write_test_dicom(&dir.path().join("IMG3.dcm"), 4, 4, &pixels, &[]).unwrap();
        fs::write(dir.path().join("broken.dcm"), b"nope").unwrap();

        let index = AccessionIndex::from_directory(dir.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("IMG1"), Some("E1001"));
        assert_eq!(index.get("IMG2"), Some("E1002"));
        assert_eq!(index.get("IMG3"), None);
    }

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let index = AccessionIndex {
            entries: BTreeMap::from([
                ("B".to_string(), "2".to_string()),
                ("A".to_string(), "1".to_string()),
            ]),
        };
        let path = dir.path().join("accessions.csv");
        index.write_csv(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "filename,accession\nA,1\nB,2\n");
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = AccessionIndex::from_directory(&dir.path().join("nope"));
        assert!(matches!(result, Err(HipfxError::MissingDirectory(_))));
    }
}
