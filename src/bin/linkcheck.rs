use chrono::Datelike;
use clap::Parser;

use std::fs;
use std::path::PathBuf;

use batchkit::config::{CliOverrides, Config};
use batchkit::core::constants::output_formats;
use batchkit::linkcheck::{
    build_summary, extract_links, find_html_files, render_summary, Checker, CheckerOptions,
    ExtractedLinks, ProbeLinks,
};
use batchkit::linkcheck::extract::parse_base_url;
use batchkit::logging;
use batchkit::ProgressReporter;

/// Check links in HTML files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan for HTML files
    directory: PathBuf,

    /// Base URL to resolve relative links against, as if the scanned tree
    /// were served there
    #[arg(long, value_name = "URL", help_heading = "Resolution")]
    base_url: Option<String>,

    /// Per-request timeout in seconds (default: 5)
    #[arg(long, value_name = "SECONDS", help_heading = "Checking")]
    timeout: Option<u64>,

    /// Concurrent probes in flight (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Checking")]
    concurrency: Option<usize>,

    /// Maximum number of links to check
    #[arg(long, value_name = "N", help_heading = "Checking")]
    max: Option<usize>,

    /// Drop links matching this regex before checking
    #[arg(long, value_name = "REGEX", help_heading = "Checking")]
    exclude: Option<String>,

    /// Custom User-Agent string
    #[arg(long, value_name = "AGENT", help_heading = "Checking")]
    user_agent: Option<String>,

    /// Extract links but don't check them
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output")]
    format: Option<String>,

    /// Output file to save results
    #[arg(short = 'o', long, value_name = "PATH", help_heading = "Output")]
    output: Option<PathBuf>,

    /// Suppress informational output
    #[arg(short = 'q', long, help_heading = "Output")]
    quiet: bool,

    /// Show detailed info
    #[arg(short = 'v', long, help_heading = "Output")]
    verbose: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output")]
    no_progress: bool,

    /// Use a specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    no_config: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_linkcheck(&cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run_linkcheck(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_and_merge_config(cli)?;
    logging::init_logger(cli.verbose, cli.quiet);

    let format = config
        .format
        .clone()
        .unwrap_or_else(|| output_formats::DEFAULT.to_string());
    // Informational chatter would corrupt json/csv output on stdout.
    let chatty = !cli.quiet && format == output_formats::TEXT;

    // Fatal before any work: bad regex, bad base URL, missing root.
    let exclude = config.compile_exclude()?;
    let base_url = cli.base_url.as_deref().map(parse_base_url).transpose()?;

    if chatty {
        println!("Scanning directory: {}", cli.directory.display());
    }
    let html_files = find_html_files(&cli.directory)?;
    logging::log_file_info(html_files.len(), &html_files);

    let mut extracted = extract_links(&html_files, &cli.directory, base_url.as_ref());
    logging::log_link_discovery(extracted.origins.len(), extracted.relative.len());

    if let Some(ref pattern) = exclude {
        let excluded: Vec<String> = extracted
            .origins
            .keys()
            .filter(|url| pattern.is_match(url))
            .cloned()
            .collect();
        // Dropped entirely: never probed, never reported.
        for url in excluded {
            extracted.origins.remove(&url);
        }
    }

    let mut working_set = extracted.absolute_urls_sorted();
    if let Some(max) = cli.max {
        working_set.truncate(max);
    }

    if chatty {
        println!(
            "\nFound {} absolute links, {} relative/unparseable links.",
            working_set.len(),
            extracted.relative.len()
        );
    }

    let results = if cli.dry_run {
        if chatty {
            println!("Dry-run mode: skipping link checking.");
        }
        Default::default()
    } else {
        let checker = Checker::new(CheckerOptions {
            timeout: config.timeout_duration(),
            user_agent: config.user_agent.clone(),
            concurrency: config.concurrency(),
        });

        let mut progress = ProgressReporter::new(chatty && !cli.no_progress);

        logging::log_check_start(working_set.len(), config.concurrency());
        let started = std::time::Instant::now();
        let results = checker.check_links(working_set, Some(&mut progress)).await?;
        let reachable = results.values().filter(|o| o.reachable).count();
        logging::log_check_complete(reachable, results.len(), started.elapsed().as_millis());
        results
    };

    let current_year = chrono::Local::now().year();
    let summary = build_summary(&results, &extracted.origins, current_year, config.years_back());

    let rendered = render_summary(&summary, &format)?;
    if format == output_formats::TEXT {
        println!("\n=== Link Status ===");
        print!("{rendered}");
        print_relative_links(&extracted);
    } else {
        print!("{rendered}");
    }

    if let Some(ref output) = cli.output {
        if chatty {
            println!("\nSaving results to: {} ({format})", output.display());
        }
        fs::write(output, &rendered)?;
    }

    // Unreachable links are data, not a process failure.
    Ok(())
}

fn load_and_merge_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli.config {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    config.merge_with_cli(&CliOverrides {
        timeout: cli.timeout,
        concurrency: cli.concurrency,
        exclude: cli.exclude.clone(),
        user_agent: cli.user_agent.clone(),
        format: cli.format.clone(),
    });
    config.validate()?;
    Ok(config)
}

fn print_relative_links(extracted: &ExtractedLinks) {
    if extracted.relative.is_empty() {
        return;
    }
    println!("\n=== Relative or Unparseable Links ===");
    for link in &extracted.relative {
        println!("[??] {link}");
    }
}
