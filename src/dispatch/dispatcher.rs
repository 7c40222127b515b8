//! Background delivery of replay events.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use crate::core::ReplayEvent;
use crate::notify::ReplayNotifier;

/// Errors submitting an event for delivery.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The delivery queue is at capacity.
    #[error("delivery queue is full")]
    QueueFull,

    /// The dispatcher has been shut down.
    #[error("dispatcher is shut down")]
    Closed,
}

/// Dispatcher configuration.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Capacity of the bounded delivery queue.
    pub queue_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { queue_capacity: 64 }
    }
}

/// Builder for [`DispatcherConfig`].
#[derive(Debug)]
pub struct DispatcherConfigBuilder {
    config: DispatcherConfig,
}

impl DispatcherConfigBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: DispatcherConfig::default(),
        }
    }

    /// Set the delivery queue capacity. Values below 1 are clamped to 1.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity.max(1);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> DispatcherConfig {
        self.config
    }
}

impl Default for DispatcherConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for submitting events to the dispatcher.
///
/// Can be cloned and used from multiple producer tasks. Holds only a weak
/// reference to the delivery queue, so outstanding handles never keep the
/// dispatcher alive: once the dispatcher is shut down (or dropped), every
/// submission fails with [`DispatchError::Closed`].
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::WeakSender<ReplayEvent>,
}

impl EventSender {
    /// Submit an event, waiting for queue space if necessary.
    pub async fn send(&self, event: ReplayEvent) -> Result<(), DispatchError> {
        let tx = self.tx.upgrade().ok_or(DispatchError::Closed)?;
        tx.send(event).await.map_err(|_| DispatchError::Closed)
    }

    /// Submit an event without waiting.
    ///
    /// Intended for callers that must not block, such as the thread observing
    /// network-state transitions.
    pub fn try_send(&self, event: ReplayEvent) -> Result<(), DispatchError> {
        let tx = self.tx.upgrade().ok_or(DispatchError::Closed)?;
        tx.try_send(event).map_err(|err| match err {
            TrySendError::Full(_) => DispatchError::QueueFull,
            TrySendError::Closed(_) => DispatchError::Closed,
        })
    }
}

/// Delivers replay events to a [`ReplayNotifier`] on a dedicated task.
///
/// The dispatcher owns a bounded FIFO queue and a background tokio task.
/// Every enqueued event is handed to [`ReplayNotifier::notify`] by that task,
/// in enqueue order, so all observer callbacks run on one definite execution
/// context and the offline queue's replay order is preserved end to end.
///
/// Once enqueued, an event cannot be cancelled or retracted.
///
/// Dropping the dispatcher closes the queue and lets the task drain what was
/// already enqueued; use [`shutdown`](Self::shutdown) to additionally wait
/// until that drain has finished.
pub struct ReplayDispatcher {
    tx: mpsc::Sender<ReplayEvent>,
    task: JoinHandle<()>,
}

impl ReplayDispatcher {
    /// Spawn a dispatcher delivering to `notifier`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(notifier: Arc<ReplayNotifier>, config: DispatcherConfig) -> Self {
        let (tx, mut rx) = mpsc::channel::<ReplayEvent>(config.queue_capacity.max(1));

        let task = tokio::spawn(async move {
            log::debug!("replay dispatcher started");
            while let Some(event) = rx.recv().await {
                log::trace!(
                    "delivering '{}' completion for client '{}'",
                    event.operation(),
                    event.client(),
                );
                notifier.notify(&event);
            }
            log::debug!("replay dispatcher stopped");
        });

        Self { tx, task }
    }

    /// Spawn a dispatcher with the default configuration.
    pub fn spawn_default(notifier: Arc<ReplayNotifier>) -> Self {
        Self::spawn(notifier, DispatcherConfig::default())
    }

    /// Enqueue an event for delivery, waiting for queue space if necessary.
    pub async fn enqueue(&self, event: ReplayEvent) -> Result<(), DispatchError> {
        self.tx.send(event).await.map_err(|_| DispatchError::Closed)
    }

    /// Enqueue an event without waiting.
    ///
    /// Fails with [`DispatchError::QueueFull`] instead of blocking when the
    /// queue is at capacity.
    pub fn try_enqueue(&self, event: ReplayEvent) -> Result<(), DispatchError> {
        self.tx.try_send(event).map_err(|err| match err {
            TrySendError::Full(_) => DispatchError::QueueFull,
            TrySendError::Closed(_) => DispatchError::Closed,
        })
    }

    /// Get a cloneable submission handle.
    ///
    /// The handle is weak: it does not keep the queue open, so it never
    /// prevents [`shutdown`](Self::shutdown) from completing.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.downgrade(),
        }
    }

    /// Shut down the dispatcher.
    ///
    /// Closes the queue and waits until every already-enqueued event has been
    /// delivered, regardless of any [`EventSender`] handles still held.
    /// Senders obtained via [`sender`](Self::sender) fail with
    /// [`DispatchError::Closed`] afterwards.
    pub async fn shutdown(self) {
        let Self { tx, task } = self;
        drop(tx);
        let _ = task.await;
    }
}
