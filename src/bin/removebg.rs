use clap::Parser;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use batchkit::logging;
use batchkit::removebg::{self, model_suffix, resolve_models, MattingClient};
use batchkit::{BatchStats, Outcome, ProgressReporter};

/// Remove image backgrounds through a matting service, with optional mask
/// export.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input image file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Directory to save output images
    #[arg(short = 'o', long, value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Model: u2, u2p, human, silu, isnet, or 'all'
    #[arg(short = 'm', long, value_name = "MODEL", default_value = batchkit::core::constants::matting::DEFAULT_MODEL)]
    model: String,

    /// Matting service endpoint
    #[arg(long, value_name = "URL", default_value = batchkit::core::constants::matting::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    timeout: u64,

    /// Save the alpha mask as a separate image
    #[arg(long)]
    save_mask: bool,

    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,

    /// Print actions only
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, false);

    match run_removebg(&cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run_removebg(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let models = resolve_models(&cli.model)?;
    let multi_model = models.len() > 1;
    let client = MattingClient::new(&cli.endpoint, Duration::from_secs(cli.timeout))?;

    let mut stats: BTreeMap<String, BatchStats> = models
        .iter()
        .map(|m| (m.clone(), BatchStats::default()))
        .collect();

    let mut progress = ProgressReporter::new(true);
    progress.start(cli.input.len() * models.len(), "backgrounds removed");

    for input in &cli.input {
        for model in &models {
            let suffix = model_suffix(model, multi_model);
            let file_name = format!(
                "{}{}{}",
                input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default(),
                suffix,
                input
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default()
            );
            let output_path = cli.output_dir.join(file_name);

            let outcome = removebg::process_file(
                &client,
                input,
                &output_path,
                model,
                cli.save_mask,
                cli.overwrite,
                cli.dry_run,
            )
            .await;

            let recorded = match outcome {
                Ok(outcome) => outcome,
                Err(e) => {
                    progress.println(&format!("[ERROR] {} ({model}): {e}", input.display()));
                    Outcome::Error
                }
            };
            if let Some(model_stats) = stats.get_mut(model) {
                model_stats.record(recorded);
            }
            progress.inc();
        }
    }
    progress.finish_and_clear();

    println!("Summary:");
    for (model, model_stats) in &stats {
        println!("Model: {model}");
        println!("  done: {}", model_stats.done);
        println!("  skipped: {}", model_stats.skipped);
        println!("  dry-run: {}", model_stats.dry_run);
        println!("  errors: {}", model_stats.errors);
    }
    Ok(())
}
