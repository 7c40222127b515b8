//! Error types for replay notifications.

use std::fmt;

use thiserror::Error;

/// Coarse classification of a remote-operation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The remote store rejected the operation (HTTP-level failure).
    Remote,
    /// The network transport failed before a response was obtained.
    Network,
    /// The local persistence layer failed while recording the result.
    LocalStore,
    /// The document payload could not be serialized or deserialized.
    Serialization,
    /// Authentication or token acquisition failed.
    Auth,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Remote => "remote",
            ErrorCategory::Network => "network",
            ErrorCategory::LocalStore => "local store",
            ErrorCategory::Serialization => "serialization",
            ErrorCategory::Auth => "auth",
        };
        f.write_str(name)
    }
}

/// Failure payload of a replayed remote operation.
///
/// Carried by [`OperationOutcome::Failed`](super::OperationOutcome::Failed).
/// The code is the data layer's numeric error code (for [`ErrorCategory::Remote`]
/// this is the HTTP status, e.g. `404`). An optional underlying cause is exposed
/// through the standard [`Error::source`](std::error::Error::source) chain.
#[derive(Debug, Error)]
#[error("{category} error {code}: {message}")]
pub struct DataError {
    code: i32,
    category: ErrorCategory,
    message: String,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DataError {
    /// Create a new error with the given category, code, and message.
    pub fn new(category: ErrorCategory, code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            category,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach an underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Numeric error code from the data layer.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Failure category.
    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors constructing a replay event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// Operation name was empty or whitespace-only.
    #[error("operation name must not be empty")]
    EmptyOperationName,
}
