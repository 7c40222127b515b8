//! Async delivery context for replay notifications.
//!
//! The replay executor completes operations on a background connectivity
//! path that must not be blocked by application callbacks. This module
//! provides the documented execution context between the two:
//!
//! - [`ReplayDispatcher`]: owns a bounded FIFO queue and a delivery task
//! - [`EventSender`]: cloneable submission handle for producer tasks
//! - [`DispatcherConfig`] / [`DispatcherConfigBuilder`]: queue tuning
//!
//! Events are delivered to the notifier strictly in enqueue order, so the
//! FIFO order of the offline queue survives into observer callbacks.

mod dispatcher;

pub use dispatcher::*;
