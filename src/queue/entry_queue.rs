use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use futures::{SinkExt, Stream};
use futures_channel::mpsc;

use crate::supplier::Entry;

/// Default number of entries a supplier may run ahead of the comparison
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// What travels from a supplier to the comparison engine.
///
/// Closing the channel without an `Aborted` item means the walk finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
    Entry(Entry),
    /// The walk hit a root-level fatal error and stopped early
    Aborted,
}

/// Creates a bounded queue holding at most `capacity` undelivered items.
pub fn entry_queue(capacity: usize) -> (EntrySender, EntryReceiver) {
    let capacity = capacity.max(1);
    // futures-channel reserves one extra slot per sender on top of the buffer
    let (sender, receiver) = mpsc::channel(capacity - 1);
    let depth = Arc::new(AtomicUsize::new(0));

    (
        EntrySender {
            inner: sender,
            depth: depth.clone(),
        },
        EntryReceiver {
            inner: receiver,
            depth,
            capacity,
        },
    )
}

/// Producing half of an entry queue
pub struct EntrySender {
    inner: mpsc::Sender<QueueItem>,
    depth: Arc<AtomicUsize>,
}

impl EntrySender {
    /// Enqueues `item`, then waits until the queue has room again.
    ///
    /// Once `capacity` items are undelivered this suspends until the consumer
    /// catches up.
    ///
    /// Returns `Err(QueueClosed)` once the receiving side has been dropped.
    pub async fn send(&mut self, item: QueueItem) -> Result<(), QueueClosed> {
        self.depth.fetch_add(1, Ordering::Relaxed);
        match self.inner.send(item).await {
            Ok(()) => Ok(()),
            Err(_) => {
                self.depth.fetch_sub(1, Ordering::Relaxed);
                Err(QueueClosed)
            }
        }
    }
}

/// The receiving side of the queue is gone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueClosed;

/// Consuming half of an entry queue
pub struct EntryReceiver {
    inner: mpsc::Receiver<QueueItem>,
    depth: Arc<AtomicUsize>,
    capacity: usize,
}

impl EntryReceiver {
    /// Items sent but not yet received. Only meant for progress output.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Stream for EntryReceiver {
    type Item = QueueItem;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let polled = Pin::new(&mut self.inner).poll_next(cx);
        if let Poll::Ready(Some(_)) = &polled {
            self.depth.fetch_sub(1, Ordering::Relaxed);
        }
        polled
    }
}
