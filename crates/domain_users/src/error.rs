//! User directory errors

use thiserror::Error;

use core_kernel::Role;
use infra_store::StoreError;

use crate::password::PasswordHashError;

/// Errors that can occur in the user directory
#[derive(Debug, Error)]
pub enum UserError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("an account with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Wrong email, password or role. Deliberately indistinct.
    #[error("invalid email, password or role")]
    InvalidCredentials,

    /// Credentials were correct but HR has not activated the account yet.
    /// Kept distinct from [`UserError::InvalidCredentials`] so the caller can
    /// render the awaiting-approval message.
    #[error(
        "your account has been created but is waiting for HR approval; \
         you will be able to log in once HR activates your profile"
    )]
    AwaitingApproval,

    #[error("this action requires the {required} role")]
    Forbidden { required: Role },

    #[error("user not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),

    #[error(transparent)]
    Storage(StoreError),
}

impl UserError {
    pub fn validation(message: impl Into<String>) -> Self {
        UserError::Validation(message.into())
    }

    /// Returns true if this is an authentication failure of either flavor
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            UserError::InvalidCredentials | UserError::AwaitingApproval
        )
    }
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => UserError::NotFound(id),
            other => UserError::Storage(other),
        }
    }
}
