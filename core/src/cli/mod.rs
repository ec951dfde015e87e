pub mod report;

use crate::convert::ConvertConfig;
use crate::types::DEFAULT_SIZE;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for hipfx
#[derive(Parser, Debug)]
#[command(name = "hipfx")]
#[command(about = "Hip radiograph preprocessing: crop, resize and window DICOM images")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crop and resize every image listed in a region table into `.npy` arrays
    Convert(ConvertArgs),

    /// Window every DICOM file in a directory into a JPEG preview
    Preview {
        /// Directory containing DICOM files
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Directory receiving the JPEG files
        #[arg(value_name = "DEST")]
        dest: PathBuf,
    },

    /// Write a filename to accession number CSV for a DICOM directory
    Accessions {
        /// Directory containing DICOM files
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// CSV file to write
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Directory containing DICOM files
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory receiving the `.npy` arrays
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Region table CSV
    #[arg(short, long, value_name = "CSV")]
    pub table: PathBuf,

    /// Keep the whole image instead of cropping each region
    #[arg(long)]
    pub no_crop: bool,

    /// Do not mirror left-side crops
    #[arg(long)]
    pub no_flip: bool,

    /// Write each artifact into a subdirectory named after its accession
    #[arg(long)]
    pub by_accession: bool,

    /// Edge length of the square output
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,
}

impl ConvertArgs {
    /// Builds the pipeline configuration from the flags
    pub fn config(&self) -> ConvertConfig {
        ConvertConfig::default()
            .with_crop(!self.no_crop)
            .with_flip(!self.no_flip)
            .group_by_accession(self.by_accession)
            .with_size(self.size)
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}
