//! Ordered hand-off of solver results from the threads that compute them to
//! the thread that displays them.
//!
//! [`result_channel`] creates the two ends once, at process start. The
//! [`Publisher`] is cloned into every producer (request handlers, worker
//! threads); the single [`Subscriber`] is polled by the display loop, which
//! calls [`Subscriber::drain`] on a fixed period. Messages are owned
//! snapshots, so nothing is shared between the two sides but the queue.
//!
//! # Teardown
//!
//! The queue lives until both ends are dropped. Once the subscriber is gone
//! there is no one left to deliver to, and later pushes are discarded.

mod message;

pub use message::ResultMessage;

use crossbeam_channel::{Receiver, Sender};

/// Creates a connected publisher/subscriber pair over an unbounded FIFO.
#[must_use]
pub fn result_channel() -> (Publisher, Subscriber) {
    let (sender, receiver) = crossbeam_channel::unbounded();
    (Publisher { sender }, Subscriber { receiver })
}

/// The producing end of a result channel.
///
/// Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Publisher {
    sender: Sender<ResultMessage>,
}

impl Publisher {
    /// Appends a message to the tail of the queue.
    ///
    /// Never blocks. The queue is unbounded, so this only discards the
    /// message if the subscriber has already been dropped.
    pub fn push(&self, message: ResultMessage) {
        if self.sender.send(message).is_err() {
            tracing::debug!("result channel closed, discarding message");
        }
    }
}

/// The consuming end of a result channel.
#[derive(Debug)]
pub struct Subscriber {
    receiver: Receiver<ResultMessage>,
}

impl Subscriber {
    /// Removes and returns every queued message, oldest first.
    ///
    /// Never blocks; returns an empty `Vec` when nothing is pending.
    #[must_use]
    pub fn drain(&self) -> Vec<ResultMessage> {
        let messages: Vec<_> = self.receiver.try_iter().collect();
        if !messages.is_empty() {
            tracing::trace!(count = messages.len(), "drained results");
        }
        messages
    }
}
