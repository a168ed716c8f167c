//! Claims domain errors

use thiserror::Error;

use core_kernel::Role;
use infra_store::StoreError;

use crate::claim::ClaimStatus;
use crate::engine::ClaimAction;
use crate::upload::UploadViolation;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("validation failed: {0}")]
    Validation(String),

    /// An attachment violated the upload policy; the whole submission fails
    #[error(transparent)]
    Upload(#[from] UploadViolation),

    /// Role/state mismatch on a claim action; the claim is left untouched
    #[error("{role} may not {action} a claim in status {from}")]
    InvalidTransition {
        from: ClaimStatus,
        action: ClaimAction,
        role: Role,
    },

    #[error("claims can only be submitted by lecturers, not {role}")]
    Forbidden { role: Role },

    #[error("claim not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(StoreError),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, ClaimError::InvalidTransition { .. })
    }
}

impl From<StoreError> for ClaimError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => ClaimError::NotFound(id),
            other => ClaimError::Storage(other),
        }
    }
}
