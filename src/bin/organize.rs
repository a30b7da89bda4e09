use clap::Parser;

use std::path::PathBuf;

use batchkit::logging;
use batchkit::textops::organize::organize_dir;
use batchkit::BatchStats;

/// Organize dated render directories by year/month.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directories to organize (named YYYY-MM-DD)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Show what would happen without moving
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Print all directory checks
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, false);

    match run_organize(&cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_organize(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let today = chrono::Local::now().date_naive();

    let mut stats = BatchStats::default();
    for path in &cli.paths {
        match organize_dir(path, today, cli.dry_run) {
            Ok(outcome) => stats.record(outcome),
            Err(e) => {
                eprintln!("Error moving {}: {e}", path.display());
                stats.record(batchkit::Outcome::Error);
            }
        }
    }

    println!("{}", stats.summary());
    Ok(())
}
