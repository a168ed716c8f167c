//! The user directory and approval gate
//!
//! All role-facing account operations go through this service. HR-only
//! operations take the acting role as an explicit parameter so the gate is
//! testable without any web-layer scaffolding.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;
use validator::ValidateEmail;

use core_kernel::{Role, UserId};
use infra_store::JsonStore;

use crate::error::UserError;
use crate::password::{hash_password, verify_password};
use crate::user::User;

/// Hourly rate assigned to self-registered lecturers until HR adjusts it
pub const DEFAULT_HOURLY_RATE: Decimal = dec!(350);

const MAX_NAME_LEN: usize = 80;
const MIN_PASSWORD_LEN: usize = 8;

/// HR-editable account fields
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub hourly_rate: Option<Decimal>,
}

/// Registration, credential verification and the login-eligibility gate
pub struct UserDirectory {
    users: Arc<JsonStore<User>>,
    // Serializes the duplicate-email check against the insert that follows it
    registration: Mutex<()>,
}

impl UserDirectory {
    pub fn new(users: Arc<JsonStore<User>>) -> Self {
        Self {
            users,
            registration: Mutex::new(()),
        }
    }

    /// Self-service lecturer registration
    ///
    /// The account is durable immediately but inert until HR approves it.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, UserError> {
        validate_account_input(name, email, password)?;

        let _guard = self.registration.lock().await;
        if self.email_taken(email, None).await {
            return Err(UserError::DuplicateEmail(email.to_string()));
        }

        let user = User {
            id: UserId::new_v7(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            role: Role::Lecturer,
            hourly_rate: DEFAULT_HOURLY_RATE,
            approved: false,
            created_at: Utc::now(),
        };
        self.users.upsert(user.clone()).await?;

        tracing::info!(user = %user.id, "lecturer registered, awaiting HR approval");
        Ok(user)
    }

    /// Verifies credentials and the approval gate for the claimed role
    ///
    /// An unapproved lecturer is refused even with correct credentials, with
    /// the distinct [`UserError::AwaitingApproval`] failure.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        claimed_role: Role,
    ) -> Result<User, UserError> {
        let user = self
            .users
            .all()
            .await
            .into_iter()
            .find(|u| u.email_matches(email) && u.role == claimed_role)
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(UserError::InvalidCredentials);
        }

        if !user.may_log_in() {
            return Err(UserError::AwaitingApproval);
        }

        Ok(user)
    }

    /// HR activates an account; idempotent
    pub async fn approve(&self, actor: Role, id: UserId) -> Result<User, UserError> {
        require_hr(actor)?;

        let _guard = self.users.lock(id).await;
        let mut user = self.users.get(id).await?;
        if user.approved {
            // Approving an already-approved user is a no-op, not an error
            return Ok(user);
        }

        user.approved = true;
        self.users.upsert(user.clone()).await?;

        tracing::info!(user = %user.id, name = %user.name, "account approved by HR");
        Ok(user)
    }

    /// HR creates a lecturer that is active immediately, bypassing the gate
    pub async fn create_lecturer(
        &self,
        actor: Role,
        name: &str,
        email: &str,
        password: &str,
        hourly_rate: Decimal,
    ) -> Result<User, UserError> {
        require_hr(actor)?;
        validate_account_input(name, email, password)?;
        if hourly_rate < Decimal::ZERO {
            return Err(UserError::validation("hourly rate must not be negative"));
        }

        let _guard = self.registration.lock().await;
        if self.email_taken(email, None).await {
            return Err(UserError::DuplicateEmail(email.to_string()));
        }

        let user = User {
            id: UserId::new_v7(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            role: Role::Lecturer,
            hourly_rate,
            approved: true,
            created_at: Utc::now(),
        };
        self.users.upsert(user.clone()).await?;

        tracing::info!(user = %user.id, "lecturer created and activated by HR");
        Ok(user)
    }

    /// HR edits account details
    pub async fn update_profile(
        &self,
        actor: Role,
        id: UserId,
        update: UserUpdate,
    ) -> Result<User, UserError> {
        require_hr(actor)?;

        let _row = self.users.lock(id).await;
        let mut user = self.users.get(id).await?;

        if let Some(name) = update.name {
            if name.trim().is_empty() || name.len() > MAX_NAME_LEN {
                return Err(UserError::validation(format!(
                    "name must be 1 to {MAX_NAME_LEN} characters"
                )));
            }
            user.name = name;
        }
        if let Some(email) = update.email {
            if !email.validate_email() {
                return Err(UserError::validation("email address is not valid"));
            }
            if !user.email_matches(&email) {
                let _guard = self.registration.lock().await;
                if self.email_taken(&email, Some(id)).await {
                    return Err(UserError::DuplicateEmail(email));
                }
                user.email = email;
            }
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(rate) = update.hourly_rate {
            if rate < Decimal::ZERO {
                return Err(UserError::validation("hourly rate must not be negative"));
            }
            user.hourly_rate = rate;
        }

        self.users.upsert(user.clone()).await?;
        Ok(user)
    }

    /// Full directory snapshot
    pub async fn all(&self) -> Vec<User> {
        self.users.all().await
    }

    pub async fn get(&self, id: UserId) -> Result<User, UserError> {
        Ok(self.users.get(id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .all()
            .await
            .into_iter()
            .find(|u| u.email_matches(email))
    }

    async fn email_taken(&self, email: &str, excluding: Option<UserId>) -> bool {
        self.users
            .all()
            .await
            .iter()
            .any(|u| u.email_matches(email) && Some(u.id) != excluding)
    }
}

fn require_hr(actor: Role) -> Result<(), UserError> {
    if actor != Role::Hr {
        return Err(UserError::Forbidden { required: Role::Hr });
    }
    Ok(())
}

fn validate_account_input(name: &str, email: &str, password: &str) -> Result<(), UserError> {
    if name.trim().is_empty() || name.len() > MAX_NAME_LEN {
        return Err(UserError::validation(format!(
            "name must be 1 to {MAX_NAME_LEN} characters"
        )));
    }
    if !email.validate_email() {
        return Err(UserError::validation("email address is not valid"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(UserError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
