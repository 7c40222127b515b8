//! # DocSync Replay
//!
//! Offline replay notifications for the DocSync client SDK.
//!
//! When a device goes offline, remote document operations (create, replace,
//! delete) are queued locally; once connectivity returns, the replay executor
//! runs them against the remote store. This crate is the notification layer
//! between that executor and the application:
//!
//! - **Events**: one [`ReplayEvent`] per replayed operation, carrying the
//!   originating [`ClientHandle`], the [`OperationName`], and an
//!   [`OperationOutcome`] that is structurally either document metadata or an
//!   error - never both, never neither
//! - **Observers**: [`ReplayObserver`] with default no-op callbacks, so an
//!   application implements only what it cares about
//! - **Fan-out**: [`ReplayNotifier`] delivers each event to every registered
//!   observer in registration order, isolating observer panics
//! - **Delivery context**: [`ReplayDispatcher`](dispatch::ReplayDispatcher)
//!   (feature `dispatch`) moves delivery off the connectivity-detection path
//!   onto a dedicated task, preserving the offline queue's FIFO order
//!
//! ## Feature Flags
//!
//! - `dispatch` (default): Async delivery context (requires tokio)
//!
//! ## Modules
//!
//! - [`core`]: Event data model and error types (always included)
//! - [`notify`]: Observer trait and fan-out notifier (always included)
//! - [`dispatch`]: Async delivery context (requires `dispatch` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use docsync_replay::prelude::*;
//!
//! struct SyncBanner;
//!
//! impl ReplayObserver for SyncBanner {
//!     fn remote_operation_completed(&self, event: &ReplayEvent) {
//!         match event.outcome() {
//!             OperationOutcome::Succeeded(meta) => {
//!                 println!("{} synchronized document {}", event.operation(), meta.document_id());
//!             }
//!             OperationOutcome::Failed(err) => {
//!                 eprintln!("{} failed: {err}", event.operation());
//!             }
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), docsync_replay::EventError> {
//! let notifier = ReplayNotifier::new();
//! notifier.register(Arc::new(SyncBanner));
//!
//! // The replay executor builds and delivers events like this:
//! let event = ReplayEvent::succeeded(
//!     ClientHandle::new("mobile-app"),
//!     OperationName::new("createDocument")?,
//!     DocumentMetadata::new("p1", "doc1", "\"0x5FA\""),
//! );
//! notifier.notify(&event);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core data model (always included)
pub mod core;

// Observer trait and fan-out (always included)
pub mod notify;

// Async delivery context (feature-gated)
#[cfg(feature = "dispatch")]
#[cfg_attr(docsrs, doc(cfg(feature = "dispatch")))]
pub mod dispatch;

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use crate::core::*;

    // Observer and notifier
    pub use crate::notify::*;

    // Delivery context (when enabled)
    #[cfg(feature = "dispatch")]
    pub use crate::dispatch::*;
}

// Re-export commonly used items at crate root
pub use crate::core::{
    ClientHandle, DataError, DocumentMetadata, ErrorCategory, EventError, OperationName,
    OperationOutcome, ReplayEvent,
};
pub use crate::notify::{ReplayNotifier, ReplayObserver};

#[cfg(feature = "dispatch")]
pub use crate::dispatch::{
    DispatchError, DispatcherConfig, DispatcherConfigBuilder, EventSender, ReplayDispatcher,
};
