//! Core data model for replay notifications.
//!
//! Defines the value types carried by a replay-completion event:
//!
//! - [`DocumentMetadata`]: identity of a successfully synchronized document
//! - [`DataError`]: failure payload from the remote data layer
//! - [`OperationName`]: validated, non-empty operation identifier
//! - [`ClientHandle`]: identity of the client facade that ran the operation
//! - [`OperationOutcome`] / [`ReplayEvent`]: the delivered event itself

mod error;
mod event;
mod metadata;
mod operation;

pub use error::*;
pub use event::*;
pub use metadata::*;
pub use operation::*;
