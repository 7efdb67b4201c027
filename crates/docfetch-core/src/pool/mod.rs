//! Bounded worker pool: identifier source → bounded queue → N fetch workers.
//!
//! The coordinator is the only producer. It spawns exactly `workers` worker
//! tasks, pushes every identifier (waiting whenever the queue is full), closes
//! the queue, then waits for every worker to drain it. Per-identifier
//! failures are logged by the workers and never reach the coordinator.

mod worker;

use anyhow::Result;
use std::sync::Arc;
use tokio::io::AsyncBufRead;
use tokio::task::JoinSet;

use crate::config::FetchConfig;
use crate::fetch::{CurlFetcher, Fetch};
use crate::queue;
use crate::source::IdSource;

/// Pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Number of concurrent workers (at least 1).
    pub workers: usize,
    /// Pending identifiers the queue holds before the producer waits (at least 1).
    pub queue_capacity: usize,
}

impl PoolSettings {
    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            workers: cfg.workers,
            queue_capacity: cfg.queue_capacity,
        }
    }
}

/// Fixed-size pool of fetch workers sharing one fetcher.
pub struct FetchPool<F> {
    settings: PoolSettings,
    fetcher: Arc<F>,
}

impl FetchPool<CurlFetcher> {
    /// Pool using the curl fetcher described by `cfg`.
    pub fn from_config(cfg: &FetchConfig) -> Self {
        FetchPool::new(PoolSettings::from_config(cfg), CurlFetcher::from_config(cfg))
    }
}

impl<F: Fetch> FetchPool<F> {
    pub fn new(settings: PoolSettings, fetcher: F) -> Self {
        Self {
            settings,
            fetcher: Arc::new(fetcher),
        }
    }

    /// Feeds every identifier from `source` to the workers and returns once all
    /// workers have exited. Returns the number of identifiers dispatched.
    ///
    /// A read error from `source` stops the workers and is returned; per-item
    /// fetch failures are not.
    pub async fn run<R: AsyncBufRead + Unpin>(&self, mut source: IdSource<R>) -> Result<u64> {
        let workers = self.settings.workers.max(1);
        let (tx, rx) = queue::bounded(self.settings.queue_capacity);

        let mut join_set = JoinSet::new();
        for index in 0..workers {
            join_set.spawn(worker::run_worker(index, rx.clone(), Arc::clone(&self.fetcher)));
        }
        drop(rx);
        tracing::debug!(
            workers,
            queue_capacity = self.settings.queue_capacity.max(1),
            "fetch pool started"
        );

        let mut dispatched = 0u64;
        loop {
            let next = match source.next_id().await {
                Ok(next) => next,
                Err(e) => {
                    join_set.abort_all();
                    return Err(e);
                }
            };
            let Some(id) = next else {
                break;
            };
            if let Err(e) = tx.push(id).await {
                join_set.abort_all();
                anyhow::bail!("{} (id \"{}\" not dispatched)", e, e.0);
            }
            dispatched += 1;
        }
        tx.close();
        tracing::debug!(dispatched, "identifier list exhausted, waiting for workers");

        while let Some(res) = join_set.join_next().await {
            if let Err(e) = res {
                tracing::error!("worker task failed: {}", e);
            }
        }

        tracing::info!(dispatched, "all workers finished");
        Ok(dispatched)
    }
}

/// Validates `cfg`, opens the identifier list, then runs the curl-backed pool.
///
/// The input is opened before any worker starts, so a missing list fails
/// without touching the network or the output directory.
pub async fn run_from_config(cfg: &FetchConfig) -> Result<u64> {
    cfg.validate()?;
    let source = IdSource::open(&cfg.input_path).await?;
    FetchPool::from_config(cfg).run(source).await
}
