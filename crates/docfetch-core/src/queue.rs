//! Bounded FIFO between the identifier reader and the workers.
//!
//! `push` waits while the queue is full; nothing is ever dropped. Workers
//! share one receiver and see `None` only after the sender is closed and
//! every queued item has been taken.

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::identifier::Identifier;

/// Creates a queue holding at most `capacity` pending identifiers (at least 1).
pub fn bounded(capacity: usize) -> (QueueSender, QueueReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        QueueSender { tx },
        QueueReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Error returned by `push` when every receiver is gone.
#[derive(Debug, thiserror::Error)]
#[error("work queue has no consumers left")]
pub struct QueueClosed(pub Identifier);

/// Producer half. Dropping it (or calling `close`) closes the queue.
pub struct QueueSender {
    tx: mpsc::Sender<Identifier>,
}

impl QueueSender {
    /// Enqueue one identifier, waiting for a free slot when the queue is full.
    pub async fn push(&self, id: Identifier) -> Result<(), QueueClosed> {
        self.tx.send(id).await.map_err(|e| QueueClosed(e.0))
    }

    /// Signals that no more items will arrive.
    pub fn close(self) {
        drop(self.tx);
    }
}

/// Consumer half, cloned into each worker.
#[derive(Clone)]
pub struct QueueReceiver {
    rx: Arc<Mutex<mpsc::Receiver<Identifier>>>,
}

impl QueueReceiver {
    /// Next identifier in FIFO order; `None` once closed and drained.
    pub async fn next(&self) -> Option<Identifier> {
        self.rx.lock().await.recv().await
    }
}
