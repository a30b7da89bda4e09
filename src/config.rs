//! Configuration for the link checker.
//!
//! Defaults can be pinned in a `.batchkit.toml` next to (or above) the
//! working directory; CLI flags always take precedence.

use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{checker, output_formats, stale};
use crate::core::error::{BatchError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Per-probe timeout in seconds
    pub timeout: Option<u64>,

    /// Number of probes in flight concurrently
    pub concurrency: Option<usize>,

    /// URL pattern to exclude (regex)
    pub exclude: Option<String>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Output format (text, json, csv)
    pub format: Option<String>,

    /// Trailing window of years tagged as old
    pub years_back: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(checker::DEFAULT_TIMEOUT_SECONDS),
            concurrency: Some(checker::DEFAULT_CONCURRENCY),
            exclude: None,
            user_agent: None,
            format: Some(output_formats::DEFAULT.to_string()),
            years_back: Some(stale::DEFAULT_YEARS_BACK),
        }
    }
}

/// Options coming from the command line, merged over the file config.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub timeout: Option<u64>,
    pub concurrency: Option<usize>,
    pub exclude: Option<String>,
    pub user_agent: Option<String>,
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from a specific file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BatchError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            BatchError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Find `.batchkit.toml` in the working directory or up to three parents.
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(".batchkit.toml") {
            return config;
        }

        for i in 1..=3 {
            let path = format!("{}.batchkit.toml", "../".repeat(i));
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge CLI flags over the config (CLI takes precedence).
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(timeout) = cli.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(concurrency) = cli.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(ref exclude) = cli.exclude {
            self.exclude = Some(exclude.clone());
        }
        if let Some(ref user_agent) = cli.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref format) = cli.format {
            self.format = Some(format.clone());
        }
    }

    /// Compile the exclude pattern, if any.
    pub fn compile_exclude(&self) -> Result<Option<Regex>> {
        match self.exclude {
            Some(ref pattern) => Ok(Some(Regex::new(pattern)?)),
            None => Ok(None),
        }
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(checker::DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(checker::DEFAULT_CONCURRENCY)
    }

    pub fn years_back(&self) -> i32 {
        self.years_back.unwrap_or(stale::DEFAULT_YEARS_BACK)
    }

    /// Validate configuration values before any work starts.
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(BatchError::Config(
                    "Timeout cannot be 0. Expected a positive number of seconds.".to_string(),
                ));
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(BatchError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
        }

        if let Some(ref format) = self.format {
            if !output_formats::ALL.contains(&format.as_str()) {
                return Err(BatchError::Config(format!(
                    "Invalid output format '{format}'. Expected one of: {}.",
                    output_formats::ALL.join(", ")
                )));
            }
        }

        if let Some(years) = self.years_back {
            if years <= 0 {
                return Err(BatchError::Config(
                    "years_back must be a positive number of years.".to_string(),
                ));
            }
        }

        self.compile_exclude()?;

        Ok(())
    }
}
