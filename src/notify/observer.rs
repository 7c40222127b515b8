//! Observer trait for replay notifications.

use crate::core::ReplayEvent;

/// Callback interface for replay-completion events.
///
/// Implemented by application components that want to know when a remote
/// operation, queued while the device was offline, has been executed after
/// connectivity returned.
///
/// Every method has a default no-op body, so an observer implements only the
/// callbacks it cares about; one that overrides nothing is valid and is
/// simply never reacted to.
///
/// Callbacks run on whichever context calls
/// [`ReplayNotifier::notify`](super::ReplayNotifier::notify) - with the
/// `dispatch` feature, the `ReplayDispatcher` delivery task - and should
/// return promptly; a slow observer delays delivery to the observers
/// registered after it.
pub trait ReplayObserver: Send + Sync {
    /// Called once per replayed remote operation, after it completed.
    ///
    /// Inspect [`ReplayEvent::outcome`] to decide whether to reconcile local
    /// state, surface a warning, or ignore the result.
    fn remote_operation_completed(&self, event: &ReplayEvent) {
        let _ = event;
    }
}
