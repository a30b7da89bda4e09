use clap::Parser;

use std::path::{Path, PathBuf};

use batchkit::fsutil::expand_paths;
use batchkit::imgops::crop;
use batchkit::logging;
use batchkit::{BatchStats, Outcome, ProgressReporter};

/// Crop images to remove all excess transparent pixels.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image files or directories to process
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Recursively process directories
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Directory to save cropped images
    #[arg(short = 'o', long, value_name = "DIR", default_value = "cropped")]
    output_dir: PathBuf,

    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,

    /// List actions without saving files
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, false);

    match run_cropalpha(&cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_cropalpha(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let inputs: Vec<&Path> = cli.input.iter().map(PathBuf::as_path).collect();
    let files = expand_paths(inputs, cli.recursive, None)?;
    println!("Cropping {} image(s)...\n", files.len());

    let mut progress = ProgressReporter::new(true);
    progress.start(files.len(), "images cropped");

    let mut stats = BatchStats::default();
    for file in &files {
        if !crop::is_supported(file) {
            progress.println(&format!("[SKIP] Unsupported extension: {}", file.display()));
            stats.record(Outcome::Skipped);
            progress.inc();
            continue;
        }

        let dest = cli
            .output_dir
            .join(file.file_name().unwrap_or(file.as_os_str()));

        match crop::crop_file(file, &dest, cli.overwrite, cli.dry_run) {
            Ok(outcome) => stats.record(outcome),
            Err(e) => {
                progress.println(&format!("[SKIP] {}: {e}", file.display()));
                stats.record(Outcome::Error);
            }
        }
        progress.inc();
    }
    progress.finish_and_clear();

    println!("{}", stats.summary());
    Ok(())
}
