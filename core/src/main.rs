use clap::Parser;
use hipfx_core::cli::report::{PreviewTextReport, TextReport};
use hipfx_core::cli::{Cli, Command, ConvertArgs, OutputFormat};
use hipfx_core::convert::preview::preview_directory;
use hipfx_core::{AccessionIndex, BatchConverter, RegionTable};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    match cli.command {
        Command::Convert(args) => run_convert(&args, &cli.format),
        Command::Preview { source, dest } => run_preview(&source, &dest, &cli.format),
        Command::Accessions { source, output } => run_accessions(&source, &output, &cli.format),
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn run_convert(args: &ConvertArgs, format: &OutputFormat) {
    let table = match RegionTable::from_csv_path(&args.table) {
        Ok(table) => table,
        Err(e) => fail(&format!("Failed to load {}: {}", args.table.display(), e)),
    };
    info!("Loaded {} region records", table.len());

    let converter = match BatchConverter::new(&args.source, &args.dest, &table, args.config()) {
        Ok(converter) => converter,
        Err(e) => fail(&e.to_string()),
    };

    let files = match collect_dicom_files(&args.source) {
        Ok(files) => files,
        Err(e) => fail(&format!("Failed to read directory: {}", e)),
    };
    if files.is_empty() {
        fail("No DICOM files found in directory");
    }
    info!("Found {} DICOM files", files.len());

    let names: Vec<String> = files
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();

    let report = converter.run(&names);
    match format {
        OutputFormat::Text => println!("{}", TextReport::new(&report)),
        OutputFormat::Json => print_json(&report),
    }
}

fn run_preview(source: &Path, dest: &Path, format: &OutputFormat) {
    let report = match preview_directory(source, dest) {
        Ok(report) => report,
        Err(e) => fail(&e.to_string()),
    };
    match format {
        OutputFormat::Text => println!("{}", PreviewTextReport::new(&report)),
        OutputFormat::Json => print_json(&report),
    }
}

fn run_accessions(source: &Path, output: &Path, format: &OutputFormat) {
    let index = match AccessionIndex::from_directory(source) {
        Ok(index) => index,
        Err(e) => fail(&e.to_string()),
    };
    if let Err(e) = index.write_csv(output) {
        fail(&format!("Failed to write {}: {}", output.display(), e));
    }
    info!("Wrote {} accessions to {}", index.len(), output.display());

    if let OutputFormat::Json = format {
        print_json(&index);
    }
}

#[cfg(feature = "json")]
fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(&format!("Failed to serialize to JSON: {}", e)),
    }
}

#[cfg(not(feature = "json"))]
fn print_json<T>(_value: &T) {
    eprintln!("Error: JSON output requires the 'json' feature");
    eprintln!("Rebuild with: cargo build --features json");
    process::exit(1);
}

fn fail(message: &str) -> ! {
    error!("{}", message);
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Lists DICOM files in a directory, sorted by name
///
/// Files with a `.dcm` or `.dicom` extension are taken as-is; files without
/// an extension are kept only if they carry the DICOM header.
fn collect_dicom_files(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom") => {
                files.push(path);
            }
            Some(_) => {}
            None => {
                if is_dicom_file(&path) {
                    info!("Found headerless DICOM file: {}", path.display());
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Checks for the 128-byte preamble followed by the `DICM` magic
fn is_dicom_file(path: &Path) -> bool {
    use std::fs::File;
    use std::io::Read;

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; 132];
    match file.read_exact(&mut buffer) {
        Ok(()) => &buffer[128..132] == b"DICM",
        Err(_) => false,
    }
}
