//! Scanner Module - concurrent username lookup
//!
//! `UsernameScanner` fans one probe per catalog platform out onto a bounded
//! pool of tokio tasks and drains them in completion order. Submodules:
//! - `aggregator`: counters and the found list

mod aggregator;

pub use aggregator::ResultAggregator;

use crate::errors::{FindmeError, FindmeResult};
use crate::models::{Catalog, PlatformDefinition, ScanReport, Verdict};
use crate::probe::{probe_username, Fetcher, HttpFetcher, DEFAULT_TIMEOUT};
use crate::ui::ProgressSink;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Tunables for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Maximum number of probes in flight.
    pub concurrency: usize,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> FindmeResult<()> {
        if self.concurrency == 0 {
            return Err(FindmeError::Config("threads must be at least 1".into()));
        }
        if self.timeout.is_zero() {
            return Err(FindmeError::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

/// Checks one username against every platform of a catalog.
pub struct UsernameScanner {
    fetcher: Arc<dyn Fetcher>,
    concurrency: usize,
}

impl UsernameScanner {
    pub fn new(fetcher: Arc<dyn Fetcher>, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    /// Scanner backed by the reqwest fetcher.
    pub fn from_config(config: &ScanConfig) -> FindmeResult<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(config.timeout)?;
        Ok(Self::new(Arc::new(fetcher), config.concurrency))
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probe every non-metadata platform for `username`.
    ///
    /// Events reach `sink` in completion order, one per platform. The scan
    /// runs until every probe has finished or `cancel` fires; on cancellation
    /// outstanding probes are aborted and the report is flagged `cancelled`.
    pub async fn scan(
        &self,
        catalog: &Catalog,
        username: &str,
        sink: &mut dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> ScanReport {
        let targets: Vec<(String, PlatformDefinition)> = catalog
            .platforms()
            .map(|(name, definition)| (name.to_string(), definition.clone()))
            .collect();
        let total = targets.len();

        log::info!(
            "Scanning {} platforms for '{}' with {} workers",
            total,
            username,
            self.concurrency
        );

        let mut aggregator = ResultAggregator::new(total);
        sink.on_start(total);

        let permits = Arc::new(Semaphore::new(self.concurrency));
        let username: Arc<str> = Arc::from(username);
        let mut tasks = JoinSet::new();
        let mut names = HashMap::with_capacity(total);

        for (name, definition) in targets {
            let fetcher = Arc::clone(&self.fetcher);
            let permits = Arc::clone(&permits);
            let username = Arc::clone(&username);

            let handle = tasks.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return Verdict::Error,
                };
                probe_username(fetcher.as_ref(), &definition, &username).await
            });
            names.insert(handle.id(), name);
        }

        let cancelled = loop {
            let joined = tokio::select! {
                biased;
                _ = cancel.cancelled() => break true,
                joined = tasks.join_next_with_id() => joined,
            };

            let Some(joined) = joined else {
                break false;
            };

            let (id, verdict) = match joined {
                Ok((id, verdict)) => (id, verdict),
                Err(e) => {
                    sink.suspend(&mut || log::warn!("Platform task failed: {}", e));
                    (e.id(), Verdict::Error)
                }
            };

            let platform = names.remove(&id).unwrap_or_default();
            if log::log_enabled!(log::Level::Debug) {
                sink.suspend(&mut || log::debug!("{}: {:?}", platform, verdict));
            }
            let event = aggregator.record(platform, verdict);
            sink.on_event(&event);
        };

        if cancelled {
            tasks.abort_all();
        }

        let report = aggregator.finish(cancelled);
        // The bar owns the terminal line until it is finished.
        sink.on_finish(&report);

        if cancelled {
            log::info!("Scan cancelled after {}/{} platforms", report.completed, total);
        }
        log::info!(
            "Scan finished: {} found, {} errors, {}/{} completed",
            report.found_count(),
            report.errors,
            report.completed,
            report.total
        );
        report
    }
}
