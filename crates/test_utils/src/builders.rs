//! Test data builders
//!
//! Builder patterns for constructing test entities with sensible defaults.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, Role, UserId};
use domain_claims::{Attachment, Claim, ClaimStatus, LecturerRef};
use domain_users::password::hash_password;
use domain_users::User;

use crate::fixtures;

/// Builder for test user accounts
pub struct TestUserBuilder {
    id: UserId,
    name: String,
    email: String,
    password: String,
    role: Role,
    hourly_rate: Decimal,
    approved: bool,
    created_at: DateTime<Utc>,
}

impl Default for TestUserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestUserBuilder {
    /// Creates a builder for an approved lecturer at the standard test rate
    pub fn new() -> Self {
        Self {
            id: UserId::new_v7(),
            name: fixtures::LECTURER_NAME.to_string(),
            email: fixtures::LECTURER_EMAIL.to_string(),
            password: fixtures::PASSWORD.to_string(),
            role: Role::Lecturer,
            hourly_rate: dec!(350),
            approved: true,
            created_at: fixtures::base_time(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_hourly_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = rate;
        self
    }

    pub fn unapproved(mut self) -> Self {
        self.approved = false;
        self
    }

    /// Builds the user, hashing the configured password
    pub fn build(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: hash_password(&self.password).expect("test password hash"),
            role: self.role,
            hourly_rate: self.hourly_rate,
            approved: self.approved,
            created_at: self.created_at,
        }
    }
}

/// Builder for test claims
pub struct TestClaimBuilder {
    id: ClaimId,
    lecturer_name: String,
    lecturer_email: String,
    hours_worked: u32,
    hourly_rate: Decimal,
    notes: Option<String>,
    status: ClaimStatus,
    created_at: DateTime<Utc>,
    attachments: Vec<Attachment>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a builder for a pending 10-hour claim at rate 350
    pub fn new() -> Self {
        Self {
            id: ClaimId::new_v7(),
            lecturer_name: fixtures::LECTURER_NAME.to_string(),
            lecturer_email: fixtures::LECTURER_EMAIL.to_string(),
            hours_worked: 10,
            hourly_rate: dec!(350),
            notes: None,
            status: ClaimStatus::Pending,
            created_at: fixtures::base_time(),
            attachments: Vec::new(),
        }
    }

    pub fn with_lecturer(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.lecturer_name = name.into();
        self.lecturer_email = email.into();
        self
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours_worked = hours;
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = rate;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn with_attachment(mut self, file_name: &str, size: u64) -> Self {
        self.attachments
            .push(Attachment::assign(self.id, file_name, size));
        self
    }

    pub fn build(self) -> Claim {
        Claim {
            id: self.id,
            lecturer: LecturerRef {
                name: self.lecturer_name,
                email: self.lecturer_email,
            },
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            notes: self.notes,
            status: self.status,
            created_at: self.created_at,
            attachments: self.attachments,
        }
    }
}
