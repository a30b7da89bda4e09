use async_trait::async_trait;
use futures::{stream, StreamExt};
use reqwest::redirect::Policy;
use rustc_hash::FxHashMap;

use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::time::Duration;

use crate::core::constants::checker as defaults;
use crate::core::error::Result;
use crate::progress::ProgressReporter;

/// Result of probing one URL. `reachable` is defined strictly by the
/// status range check, not by the presence of a status code: a 404 is
/// unreachable *with* a code, a timeout is unreachable without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    pub reachable: bool,
    pub status: Option<u16>,
}

impl CheckOutcome {
    pub fn from_status(status: u16) -> Self {
        Self {
            reachable: (defaults::REACHABLE_MIN..defaults::REACHABLE_MAX).contains(&status),
            status: Some(status),
        }
    }

    pub fn transport_failure() -> Self {
        Self {
            reachable: false,
            status: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckerOptions {
    /// Per-probe timeout
    pub timeout: Duration,
    /// User-Agent header sent with every probe
    pub user_agent: Option<String>,
    /// Maximum probes in flight
    pub concurrency: usize,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(defaults::DEFAULT_TIMEOUT_SECONDS),
            user_agent: None,
            concurrency: defaults::DEFAULT_CONCURRENCY,
        }
    }
}

#[async_trait]
pub trait ProbeLinks {
    /// Probe every URL once and collect an outcome per URL. Input is
    /// expected to be deduplicated; completion order is immaterial.
    async fn check_links(
        &self,
        urls: Vec<String>,
        progress: Option<&mut ProgressReporter>,
    ) -> Result<FxHashMap<String, CheckOutcome>>;
}

#[derive(Debug, Default)]
pub struct Checker {
    options: CheckerOptions,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl Checker {
    pub fn new(options: CheckerOptions) -> Self {
        Self {
            options,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Highest number of probes that were in flight simultaneously during
    /// the last `check_links` run.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl ProbeLinks for Checker {
    async fn check_links(
        &self,
        urls: Vec<String>,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<FxHashMap<String, CheckOutcome>> {
        let user_agent = self.options.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let client = reqwest::Client::builder()
            .timeout(self.options.timeout)
            .redirect(Policy::limited(defaults::MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()?;

        if let Some(ref mut prog) = progress {
            prog.start(urls.len(), "URLs checked");
        }

        let mut probes = stream::iter(urls)
            .map(|url| {
                let client = &client;
                let in_flight = &self.in_flight;
                let peak_in_flight = &self.peak_in_flight;
                async move {
                    let active = in_flight.fetch_add(1, AtomicOrdering::SeqCst) + 1;
                    peak_in_flight.fetch_max(active, AtomicOrdering::SeqCst);

                    let response = client.head(&url).send().await;

                    in_flight.fetch_sub(1, AtomicOrdering::SeqCst);
                    (url, response)
                }
            })
            .buffer_unordered(self.options.concurrency.max(1));

        let mut results = FxHashMap::default();
        while let Some((url, response)) = probes.next().await {
            let outcome = match response {
                Ok(res) => CheckOutcome::from_status(res.status().as_u16()),
                Err(_) => CheckOutcome::transport_failure(),
            };
            // URLs are unique post-deduplication, so each entry is written
            // exactly once.
            results.insert(url, outcome);

            if let Some(ref prog) = progress {
                prog.inc();
            }
        }

        if let Some(ref mut prog) = progress {
            prog.finish_and_clear();
        }

        Ok(results)
    }
}
