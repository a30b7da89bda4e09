use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .ok();

    debug!("Logger initialized with level: {level:?}");
}

/// Log file processing information
pub fn log_file_info<P: AsRef<Path>>(file_count: usize, files: &[P]) {
    info!("Processing {file_count} file(s)");
    for (i, file) in files.iter().enumerate() {
        debug!("  {}. {}", i + 1, file.as_ref().display());
    }
}

/// Log link discovery counts
pub fn log_link_discovery(absolute: usize, relative: usize) {
    info!("Found {absolute} absolute link(s), {relative} relative/unparseable");
}

/// Log check-stage progress
pub fn log_check_start(url_count: usize, concurrency: usize) {
    info!("Checking {url_count} URL(s) with {concurrency} in flight");
}

/// Log check-stage completion
pub fn log_check_complete(reachable: usize, total: usize, duration_ms: u128) {
    if reachable == total {
        info!("Check complete: {reachable}/{total} reachable ({duration_ms}ms)");
    } else {
        warn!("Check complete: {reachable}/{total} reachable ({duration_ms}ms)");
    }
}

/// Log a per-file failure that does not abort the batch
pub fn log_file_error(path: &Path, err: &dyn std::error::Error) {
    warn!("Skipping {}: {err}", path.display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
