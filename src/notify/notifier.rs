//! Observer registration and event fan-out.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::ReplayEvent;

use super::observer::ReplayObserver;

/// Fans replay-completion events out to registered observers.
///
/// Observers are identified by `Arc` pointer identity and notified in
/// registration order. All three operations are safe under concurrent use:
/// the background delivery task may call [`notify`](Self::notify) while the
/// application thread registers or unregisters.
///
/// `notify` snapshots the observer set before invoking anyone, so an observer
/// may register or unregister from inside its own callback; the change takes
/// effect from the next notification.
pub struct ReplayNotifier {
    observers: Mutex<Vec<Arc<dyn ReplayObserver>>>,
}

impl ReplayNotifier {
    /// Create a notifier with no observers.
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer.
    ///
    /// Returns `false` if this exact observer (same `Arc`) is already
    /// registered; re-registration is an idempotent no-op and does not change
    /// the observer's position in the delivery order.
    pub fn register(&self, observer: Arc<dyn ReplayObserver>) -> bool {
        let mut observers = self.lock();
        if observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            return false;
        }
        observers.push(observer);
        true
    }

    /// Unregister an observer.
    ///
    /// Returns `false` if the observer was not registered. After this
    /// returns, the observer receives no further notifications.
    pub fn unregister(&self, observer: &Arc<dyn ReplayObserver>) -> bool {
        let mut observers = self.lock();
        let before = observers.len();
        observers.retain(|o| !Arc::ptr_eq(o, observer));
        observers.len() != before
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.lock().len()
    }

    /// Deliver one event to every observer registered at the time of the call.
    ///
    /// Infallible: with zero observers this is a no-op, and a panicking
    /// observer is isolated (logged at `warn`) so delivery continues with the
    /// remaining observers. Nothing propagates back to the caller.
    pub fn notify(&self, event: &ReplayEvent) {
        // Snapshot outside the callbacks; holding the lock across an observer
        // that re-enters register/unregister would deadlock.
        let snapshot: Vec<Arc<dyn ReplayObserver>> = self.lock().clone();

        for observer in snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                observer.remote_operation_completed(event);
            }));
            if outcome.is_err() {
                log::warn!(
                    "replay observer panicked handling '{}' for client '{}'; \
                     continuing with remaining observers",
                    event.operation(),
                    event.client(),
                );
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn ReplayObserver>>> {
        // A panicking observer never runs under this lock, so poisoning can
        // only come from a panic between lock and push/retain; recover rather
        // than wedge every later notification.
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ReplayNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::core::{
        ClientHandle, DataError, DocumentMetadata, ErrorCategory, OperationName,
    };

    fn success_event(operation: &str) -> ReplayEvent {
        ReplayEvent::succeeded(
            ClientHandle::new("test-client"),
            OperationName::new(operation).unwrap(),
            DocumentMetadata::new("p1", "doc1", "etag-1"),
        )
    }

    fn failure_event(operation: &str, code: i32) -> ReplayEvent {
        ReplayEvent::failed(
            ClientHandle::new("test-client"),
            OperationName::new(operation).unwrap(),
            DataError::new(ErrorCategory::Remote, code, "not found"),
        )
    }

    /// Records every event it sees as (operation, document_id, error_code).
    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<(String, Option<String>, Option<i32>)>>,
    }

    impl ReplayObserver for Recording {
        fn remote_operation_completed(&self, event: &ReplayEvent) {
            self.seen.lock().unwrap().push((
                event.operation().as_str().to_owned(),
                event.metadata().map(|m| m.document_id().to_owned()),
                event.error().map(|e| e.code()),
            ));
        }
    }

    struct Counting {
        hits: AtomicUsize,
    }

    impl Counting {
        fn new() -> Self {
            Self {
                hits: AtomicUsize::new(0),
            }
        }
    }

    impl ReplayObserver for Counting {
        fn remote_operation_completed(&self, _event: &ReplayEvent) {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Panicky;

    impl ReplayObserver for Panicky {
        fn remote_operation_completed(&self, _event: &ReplayEvent) {
            panic!("observer failure");
        }
    }

    /// Observer that relies entirely on the default no-op bodies.
    struct Uninterested;

    impl ReplayObserver for Uninterested {}

    #[test]
    fn test_zero_observers_is_noop() {
        let notifier = ReplayNotifier::new();
        notifier.notify(&success_event("createDocument"));
        assert_eq!(notifier.observer_count(), 0);
    }

    #[test]
    fn test_all_observers_invoked_once() {
        let notifier = ReplayNotifier::new();
        let observers: Vec<Arc<Counting>> =
            (0..3).map(|_| Arc::new(Counting::new())).collect();
        for obs in &observers {
            notifier.register(obs.clone());
        }

        notifier.notify(&success_event("createDocument"));

        for obs in &observers {
            assert_eq!(obs.hits.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_success_event_fields() {
        let notifier = ReplayNotifier::new();
        let recording = Arc::new(Recording::default());
        notifier.register(recording.clone());

        notifier.notify(&success_event("createDocument"));

        let seen = recording.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![("createDocument".to_owned(), Some("doc1".to_owned()), None)]
        );
    }

    #[test]
    fn test_failure_event_fields() {
        let notifier = ReplayNotifier::new();
        let recording = Arc::new(Recording::default());
        notifier.register(recording.clone());

        notifier.notify(&failure_event("deleteDocument", 404));

        let seen = recording.seen.lock().unwrap();
        assert_eq!(*seen, vec![("deleteDocument".to_owned(), None, Some(404))]);
    }

    #[test]
    fn test_unregistered_observer_receives_nothing() {
        let notifier = ReplayNotifier::new();
        let kept = Arc::new(Counting::new());
        let removed = Arc::new(Counting::new());
        notifier.register(kept.clone());
        notifier.register(removed.clone());

        let removed_dyn: Arc<dyn ReplayObserver> = removed.clone();
        assert!(notifier.unregister(&removed_dyn));

        notifier.notify(&success_event("createDocument"));
        notifier.notify(&success_event("replaceDocument"));

        assert_eq!(kept.hits.load(Ordering::SeqCst), 2);
        assert_eq!(removed.hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unregister_absent_is_noop() {
        let notifier = ReplayNotifier::new();
        let never_registered: Arc<dyn ReplayObserver> = Arc::new(Counting::new());
        assert!(!notifier.unregister(&never_registered));
    }

    #[test]
    fn test_reregistration_is_idempotent() {
        let notifier = ReplayNotifier::new();
        let obs = Arc::new(Counting::new());

        assert!(notifier.register(obs.clone()));
        assert!(!notifier.register(obs.clone()));
        assert_eq!(notifier.observer_count(), 1);

        notifier.notify(&success_event("createDocument"));
        assert_eq!(obs.hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_observer_does_not_abort_delivery() {
        let notifier = ReplayNotifier::new();
        let after = Arc::new(Counting::new());
        notifier.register(Arc::new(Panicky));
        notifier.register(after.clone());

        notifier.notify(&success_event("createDocument"));

        assert_eq!(after.hits.load(Ordering::SeqCst), 1);

        // The notifier stays usable after the panic.
        notifier.notify(&success_event("replaceDocument"));
        assert_eq!(after.hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_delivery_in_registration_order() {
        struct Tagged {
            tag: &'static str,
            order: Arc<Mutex<Vec<&'static str>>>,
        }

        impl ReplayObserver for Tagged {
            fn remote_operation_completed(&self, _event: &ReplayEvent) {
                self.order.lock().unwrap().push(self.tag);
            }
        }

        let notifier = ReplayNotifier::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            notifier.register(Arc::new(Tagged {
                tag,
                order: order.clone(),
            }));
        }

        notifier.notify(&success_event("createDocument"));

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_observer_with_default_body_is_valid() {
        let notifier = ReplayNotifier::new();
        notifier.register(Arc::new(Uninterested));
        notifier.notify(&success_event("createDocument"));
        assert_eq!(notifier.observer_count(), 1);
    }

    #[test]
    fn test_register_from_within_callback() {
        struct Recruiter {
            notifier: Arc<ReplayNotifier>,
            recruit: Arc<Counting>,
        }

        impl ReplayObserver for Recruiter {
            fn remote_operation_completed(&self, _event: &ReplayEvent) {
                self.notifier.register(self.recruit.clone());
            }
        }

        let notifier = Arc::new(ReplayNotifier::new());
        let recruit = Arc::new(Counting::new());
        notifier.register(Arc::new(Recruiter {
            notifier: notifier.clone(),
            recruit: recruit.clone(),
        }));

        // Registration during fan-out must not deadlock, and the recruit only
        // sees events from the next notification on.
        notifier.notify(&success_event("createDocument"));
        assert_eq!(recruit.hits.load(Ordering::SeqCst), 0);

        notifier.notify(&success_event("replaceDocument"));
        assert_eq!(recruit.hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_from_within_callback() {
        struct Resigner {
            notifier: Arc<ReplayNotifier>,
            handle: Mutex<Option<Arc<dyn ReplayObserver>>>,
            hits: AtomicUsize,
        }

        impl ReplayObserver for Resigner {
            fn remote_operation_completed(&self, _event: &ReplayEvent) {
                self.hits.fetch_add(1, Ordering::SeqCst);
                if let Some(handle) = self.handle.lock().unwrap().take() {
                    self.notifier.unregister(&handle);
                }
            }
        }

        let notifier = Arc::new(ReplayNotifier::new());
        let resigner = Arc::new(Resigner {
            notifier: notifier.clone(),
            handle: Mutex::new(None),
            hits: AtomicUsize::new(0),
        });
        let handle: Arc<dyn ReplayObserver> = resigner.clone();
        *resigner.handle.lock().unwrap() = Some(handle.clone());
        notifier.register(handle);

        let after = Arc::new(Counting::new());
        notifier.register(after.clone());

        // Self-removal during fan-out must not deadlock and must not skip
        // observers registered after the one removing itself.
        notifier.notify(&success_event("createDocument"));
        assert_eq!(resigner.hits.load(Ordering::SeqCst), 1);
        assert_eq!(after.hits.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.observer_count(), 1);

        // The removal is effective from the next notification on.
        notifier.notify(&success_event("replaceDocument"));
        assert_eq!(resigner.hits.load(Ordering::SeqCst), 1);
        assert_eq!(after.hits.load(Ordering::SeqCst), 2);
    }
}
