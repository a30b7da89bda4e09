use clap::Parser;

use std::path::{Path, PathBuf};

use batchkit::logging;
use batchkit::textops::convert::{convert_file, DataFormat};
use batchkit::{BatchStats, Outcome};

/// Convert between JSON and CSV record files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file(s)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_name = "FORMAT", value_parser = ["json", "csv"])]
    format: String,

    /// Directory for output files (defaults to the input's directory)
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Force input format when the extension is not .json/.csv
    #[arg(long, value_name = "FORMAT", value_parser = ["json", "csv"])]
    input_format: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// CSV delimiter
    #[arg(long, value_name = "CHAR", default_value = ",")]
    delimiter: String,

    /// Allow overwriting files
    #[arg(long)]
    overwrite: bool,

    /// Show what would be converted without writing
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, false);

    match run_convert(&cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_convert(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let target = DataFormat::from_str(&cli.format)?;
    let input_format = cli
        .input_format
        .as_deref()
        .map(DataFormat::from_str)
        .transpose()?;

    let delimiter = parse_delimiter(&cli.delimiter)?;

    let mut stats = BatchStats::default();
    for file in &cli.files {
        let output_dir = cli
            .output_dir
            .clone()
            .unwrap_or_else(|| file.parent().unwrap_or_else(|| Path::new(".")).to_path_buf());

        match convert_file(
            file,
            &output_dir,
            target,
            input_format,
            delimiter,
            cli.pretty,
            cli.overwrite,
            cli.dry_run,
        ) {
            Ok(Outcome::Done) => {
                println!("Converted: {} -> {}", file.display(), output_dir.display());
                stats.record(Outcome::Done);
            }
            Ok(outcome) => {
                println!("{}: {}", outcome, file.display());
                stats.record(outcome);
            }
            Err(e) => {
                eprintln!("Failed to convert {}: {e}", file.display());
                stats.record(Outcome::Error);
            }
        }
    }

    println!("{}", stats.summary());
    Ok(())
}

fn parse_delimiter(value: &str) -> Result<u8, Box<dyn std::error::Error>> {
    let bytes = value.as_bytes();
    if bytes.len() != 1 {
        return Err(format!("delimiter must be a single byte, got '{value}'").into());
    }
    Ok(bytes[0])
}
