use clap::Parser;

use std::path::PathBuf;

use batchkit::logging;
use batchkit::textops::rename::{
    apply_renames, plan_counter, plan_regex_replace, plan_replace, CounterOptions,
};

/// Batch rename files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to rename
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Simple string replace: OLD NEW
    #[arg(short = 'r', long, num_args = 2, value_names = ["OLD", "NEW"])]
    replace: Option<Vec<String>>,

    /// Treat the match expression as a regex
    #[arg(long)]
    regex: bool,

    /// Add a counter for files matching the expression. Separate several
    /// words with '|'; '@sprites' expands to the sprite name preset
    #[arg(short = 'c', long, value_name = "MATCH")]
    counter: Option<String>,

    /// Replace the full filename (excluding extension)
    #[arg(short = 'f', long)]
    full: bool,

    /// Ignore case when matching words for counters
    #[arg(long)]
    ignore_case: bool,

    /// Delimiter between match word and counter
    #[arg(long, value_name = "TEXT", default_value = "-")]
    delimiter: String,

    /// Pad counter with leading zeros to this width
    #[arg(long, value_name = "WIDTH", default_value_t = 0)]
    pad: usize,

    /// Show what would be renamed without renaming
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, false);

    match run_rename(&cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_rename(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let files: Vec<PathBuf> = cli.files.iter().filter(|f| f.is_file()).cloned().collect();
    if files.is_empty() {
        println!("No matching files.");
        return Ok(());
    }

    let pairs = if let Some(ref match_expr) = cli.counter {
        plan_counter(
            &files,
            &CounterOptions {
                regex: cli.regex,
                match_expr: match_expr.clone(),
                full: cli.full,
                ignore_case: cli.ignore_case,
                delimiter: cli.delimiter.clone(),
                pad: cli.pad,
            },
        )?
    } else if let Some(ref replace) = cli.replace {
        if cli.regex {
            plan_regex_replace(&files, &replace[0], &replace[1])?
        } else {
            plan_replace(&files, &replace[0], &replace[1])
        }
    } else {
        return Err("nothing to do: pass --replace or --counter".into());
    };

    for (src, dst) in &pairs {
        if src != dst {
            println!("{} -> {}", src.display(), dst.display());
        }
    }

    let stats = apply_renames(&pairs, cli.dry_run);
    println!("{}", stats.summary());
    Ok(())
}
