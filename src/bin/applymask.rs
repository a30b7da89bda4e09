use clap::Parser;

use std::path::PathBuf;

use batchkit::imgops::mask::{apply_mask_file, mask_path_for};
use batchkit::logging;
use batchkit::{BatchStats, Outcome, ProgressReporter};

/// Apply alpha masks to a batch of images.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input image file(s)
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Directory where corresponding *_mask.png files are stored
    #[arg(short = 'm', long, value_name = "DIR")]
    mask_dir: PathBuf,

    /// Directory to save output images
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: PathBuf,

    /// Allow overwriting output files
    #[arg(long)]
    overwrite: bool,

    /// Preview actions without writing files
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, false);

    match run_applymask(&cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_applymask(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Writing into a source directory would make inputs and outputs
    // collide; refuse up front.
    if cli
        .images
        .iter()
        .any(|f| f.parent() == Some(cli.output_dir.as_path()))
    {
        return Err("input and output directories must not be the same".into());
    }

    let mut progress = ProgressReporter::new(true);
    progress.start(cli.images.len(), "masks applied");

    let mut stats = BatchStats::default();
    for image in &cli.images {
        let mask = mask_path_for(image, &cli.mask_dir);
        if !mask.exists() {
            progress.println(&format!("[SKIP] Mask not found: {}", mask.display()));
            stats.record(Outcome::Skipped);
            progress.inc();
            continue;
        }

        let dest = cli
            .output_dir
            .join(image.file_name().unwrap_or(image.as_os_str()));
        match apply_mask_file(image, &mask, &dest, cli.overwrite, cli.dry_run) {
            Ok(outcome) => stats.record(outcome),
            Err(e) => {
                progress.println(&format!("[ERROR] {}: {e}", image.display()));
                stats.record(Outcome::Error);
            }
        }
        progress.inc();
    }
    progress.finish_and_clear();

    println!("{}", stats.summary());
    Ok(())
}
