//! Store error types
//!
//! Storage faults are surfaced to callers and never silently swallowed.

use thiserror::Error;

/// Errors that can occur during record store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the collection
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The storage medium could not be read or written
    #[error("storage fault: {0}")]
    Io(#[from] std::io::Error),

    /// The collection file could not be encoded or decoded
    #[error("storage serialization fault: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A durable write did not complete within the configured bound
    #[error("storage write timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl StoreError {
    /// Creates a not found error for a specific entity kind and identifier
    pub fn not_found(kind: &'static str, id: impl std::fmt::Display) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Returns true if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if this error indicates a durability fault
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            StoreError::Io(_) | StoreError::Serialization(_) | StoreError::Timeout { .. }
        )
    }
}
