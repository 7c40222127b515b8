//! Operation identifiers.

use std::fmt;

use super::error::EventError;

/// Name of the remote operation that was replayed.
///
/// A non-empty identifier for the CRUD-style action that ran against the
/// remote store, e.g. `"createDocument"`, `"replaceDocument"`,
/// `"deleteDocument"`. Emptiness is rejected at construction so that a built
/// [`ReplayEvent`](super::ReplayEvent) always carries a valid name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationName(String);

impl OperationName {
    /// Create an operation name.
    ///
    /// Fails with [`EventError::EmptyOperationName`] if `name` is empty or
    /// whitespace-only.
    pub fn new(name: impl Into<String>) -> Result<Self, EventError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EventError::EmptyOperationName);
        }
        Ok(Self(name))
    }

    /// The operation name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OperationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for OperationName {
    type Error = EventError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}
