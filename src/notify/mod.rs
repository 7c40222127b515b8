//! Replay-completion notification.
//!
//! This module implements the observer side of offline replay:
//!
//! - [`ReplayObserver`]: the callback trait applications implement
//! - [`ReplayNotifier`]: registration and synchronous fan-out of events
//!
//! The notifier is a pure fan-out step. It keeps no queue and makes no
//! ordering promises across events; FIFO delivery of replayed operations is
//! the job of the `dispatch` layer feeding it (feature `dispatch`).

mod notifier;
mod observer;

pub use notifier::*;
pub use observer::*;
