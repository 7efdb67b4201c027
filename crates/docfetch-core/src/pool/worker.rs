//! One fetch worker: drains the shared queue until it is closed and empty.

use std::sync::Arc;

use crate::fetch::Fetch;
use crate::queue::QueueReceiver;

/// Runs worker `index` to completion and returns how many identifiers it took.
///
/// Each identifier gets exactly one fetch on the blocking pool. Failures are
/// logged with the identifier and never stop the loop.
pub(super) async fn run_worker<F: Fetch>(index: usize, queue: QueueReceiver, fetcher: Arc<F>) -> u64 {
    tracing::debug!(worker = index, "worker started");
    let mut handled = 0u64;

    while let Some(id) = queue.next().await {
        handled += 1;
        let task_fetcher = Arc::clone(&fetcher);
        let task_id = id.clone();
        let outcome =
            tokio::task::spawn_blocking(move || task_fetcher.fetch(&task_id, index)).await;

        match outcome {
            Ok(Ok(path)) => {
                tracing::info!(worker = index, %id, "saved {}", path.display());
            }
            Ok(Err(e)) => {
                tracing::warn!(worker = index, "error when processing id \"{}\": {}", id, e);
            }
            Err(e) => {
                tracing::error!(worker = index, "fetch task for id \"{}\" failed: {}", id, e);
            }
        }
    }

    tracing::debug!(worker = index, handled, "queue closed and drained, worker exiting");
    handled
}
