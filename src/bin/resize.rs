use clap::Parser;

use std::path::{Path, PathBuf};

use batchkit::fsutil::expand_paths;
use batchkit::imgops::resize::{self, ResizeOptions, SmallerPolicy};
use batchkit::logging;
use batchkit::{BatchStats, Outcome, ProgressReporter};

/// Resize image(s) to a target height, keeping aspect ratio.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image files or directories to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Recursively process directories
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Target height for resized images
    #[arg(short = 'y', long, value_name = "PIXELS")]
    height: u32,

    /// Output directory
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: PathBuf,

    /// Prefix to add to resized image filenames
    #[arg(long, value_name = "TEXT", default_value = "")]
    prefix: String,

    /// Suffix to append to resized image filenames
    #[arg(long, value_name = "TEXT", default_value = "")]
    suffix: String,

    /// Handle images at or below the target height: upscale, keep the
    /// original size, or skip them
    #[arg(short = 'm', long, value_name = "POLICY", value_parser = ["upscale", "keep", "skip"], default_value = "keep")]
    resize_smaller: String,

    /// Allow overwriting output files
    #[arg(long)]
    overwrite: bool,

    /// Only print actions without saving any files
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, false);

    match run_resize(&cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_resize(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let smaller = SmallerPolicy::from_str(&cli.resize_smaller)?;
    let opts = ResizeOptions {
        target_height: cli.height,
        prefix: cli.prefix.clone(),
        suffix: cli.suffix.clone(),
        smaller,
        overwrite: cli.overwrite,
        dry_run: cli.dry_run,
    };

    let inputs: Vec<&Path> = cli.files.iter().map(PathBuf::as_path).collect();
    let files = expand_paths(inputs, cli.recursive, None)?;
    println!("Processing {} image(s)...\n", files.len());

    let mut progress = ProgressReporter::new(true);
    progress.start(files.len(), "images resized");

    let mut stats = BatchStats::default();
    for file in &files {
        if !resize::is_supported(file) {
            progress.println(&format!("[SKIP] Unsupported extension: {}", file.display()));
            stats.record(Outcome::Skipped);
            progress.inc();
            continue;
        }

        match resize::process_file(file, &cli.output_dir, &opts) {
            Ok(outcome) => stats.record(outcome),
            Err(e) => {
                progress.println(&format!("[SKIP] Failed to process: {} ({e})", file.display()));
                stats.record(Outcome::Error);
            }
        }
        progress.inc();
    }
    progress.finish_and_clear();

    println!("{}", stats.summary());
    Ok(())
}
