//! Metadata of a synchronized document.

/// Identity and revision of a document that was successfully synchronized.
///
/// Immutable snapshot taken by the replay executor when the remote operation
/// completed. Present only on successful outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentMetadata {
    partition: String,
    document_id: String,
    etag: String,
}

impl DocumentMetadata {
    /// Create a metadata snapshot.
    pub fn new(
        partition: impl Into<String>,
        document_id: impl Into<String>,
        etag: impl Into<String>,
    ) -> Self {
        Self {
            partition: partition.into(),
            document_id: document_id.into(),
            etag: etag.into(),
        }
    }

    /// Partition (collection) key of the document.
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Document identifier within its partition.
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Server-assigned revision tag after the operation.
    pub fn etag(&self) -> &str {
        &self.etag
    }
}
