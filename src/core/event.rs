//! The replay-completion event.

use std::fmt;
use std::sync::Arc;

use super::error::DataError;
use super::metadata::DocumentMetadata;
use super::operation::OperationName;

/// Identity of the data-access client that performed the operation.
///
/// Injected explicitly by the replay executor and carried on every event, so
/// observers can tell which client instance a notification belongs to without
/// any ambient singleton. Cloning is cheap (shared string).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientHandle {
    instance: Arc<str>,
}

impl ClientHandle {
    /// Create a handle identifying a client instance.
    pub fn new(instance: impl Into<Arc<str>>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    /// Name of the client instance.
    pub fn instance_name(&self) -> &str {
        &self.instance
    }
}

impl fmt::Display for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.instance)
    }
}

/// Result of one replayed remote operation.
///
/// Exactly two variants, so an event structurally carries either document
/// metadata or an error, never both and never neither. The [`metadata`] and
/// [`error`] accessors mirror the SDK's two-nullable-fields surface.
///
/// [`metadata`]: OperationOutcome::metadata
/// [`error`]: OperationOutcome::error
#[derive(Debug)]
pub enum OperationOutcome {
    /// The operation ran against the remote store and succeeded.
    Succeeded(DocumentMetadata),
    /// The operation ran and failed.
    Failed(DataError),
}

impl OperationOutcome {
    /// Metadata of the synchronized document, if the operation succeeded.
    pub fn metadata(&self) -> Option<&DocumentMetadata> {
        match self {
            OperationOutcome::Succeeded(meta) => Some(meta),
            OperationOutcome::Failed(_) => None,
        }
    }

    /// Failure details, if the operation failed.
    pub fn error(&self) -> Option<&DataError> {
        match self {
            OperationOutcome::Succeeded(_) => None,
            OperationOutcome::Failed(err) => Some(err),
        }
    }

    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Succeeded(_))
    }
}

/// Notification that one queued remote operation was replayed.
///
/// Emitted exactly once per operation after the device transitioned back
/// online and the operation was executed against the remote store. Immutable
/// once constructed.
#[derive(Debug)]
pub struct ReplayEvent {
    client: ClientHandle,
    operation: OperationName,
    outcome: OperationOutcome,
}

impl ReplayEvent {
    /// Create an event from an already-determined outcome.
    pub fn new(client: ClientHandle, operation: OperationName, outcome: OperationOutcome) -> Self {
        Self {
            client,
            operation,
            outcome,
        }
    }

    /// Create a success event.
    pub fn succeeded(
        client: ClientHandle,
        operation: OperationName,
        metadata: DocumentMetadata,
    ) -> Self {
        Self::new(client, operation, OperationOutcome::Succeeded(metadata))
    }

    /// Create a failure event.
    pub fn failed(client: ClientHandle, operation: OperationName, error: DataError) -> Self {
        Self::new(client, operation, OperationOutcome::Failed(error))
    }

    /// The client instance that performed the operation.
    pub fn client(&self) -> &ClientHandle {
        &self.client
    }

    /// Name of the operation that ran.
    pub fn operation(&self) -> &OperationName {
        &self.operation
    }

    /// The operation's result.
    pub fn outcome(&self) -> &OperationOutcome {
        &self.outcome
    }

    /// Shorthand for `self.outcome().metadata()`.
    pub fn metadata(&self) -> Option<&DocumentMetadata> {
        self.outcome.metadata()
    }

    /// Shorthand for `self.outcome().error()`.
    pub fn error(&self) -> Option<&DataError> {
        self.outcome.error()
    }
}
