//! User entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Role, UserId};
use infra_store::Record;

/// A pipeline user account
///
/// The password is stored only as a salted Argon2id hash. The `approved` flag
/// gates login for lecturers: an unapproved lecturer can never authenticate,
/// regardless of credential correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Email address, unique across all roles (case-insensitive)
    pub email: String,
    /// Salted Argon2id password hash
    pub password_hash: String,
    /// Pipeline role
    pub role: Role,
    /// Hourly rate copied onto claims at submission time
    pub hourly_rate: Decimal,
    /// Whether HR has activated this account
    pub approved: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns true if this account may authenticate
    ///
    /// Only lecturers are gated; the staff roles are created approved.
    pub fn may_log_in(&self) -> bool {
        self.role != Role::Lecturer || self.approved
    }

    /// Case-insensitive email comparison
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

impl Record for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> UserId {
        self.id
    }
}
