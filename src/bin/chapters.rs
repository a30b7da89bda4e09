use clap::Parser;

use std::path::PathBuf;

use batchkit::logging;
use batchkit::textops::chapters::split_chapters;

/// Split a story text file into chapter files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the story text file
    input_file: PathBuf,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, false);

    match split_chapters(&cli.input_file) {
        Ok(written) => {
            for path in &written {
                println!("Wrote: {}", path.display());
            }
            if written.is_empty() {
                println!("No chapter headings found.");
            }
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
