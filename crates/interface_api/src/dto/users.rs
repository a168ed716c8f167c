//! User DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::Role;
use domain_users::User;

/// Lecturer self-registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub hourly_rate: Decimal,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role,
            hourly_rate: user.hourly_rate,
            approved: user.approved,
            created_at: user.created_at,
        }
    }
}

/// HR creates an immediately-active lecturer
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLecturerRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub hourly_rate: Decimal,
}

/// HR edits account details; omitted fields stay unchanged
#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub hourly_rate: Option<Decimal>,
}

/// HR pipeline summary
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub total_users: usize,
    pub total_claims: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
}

/// One activity feed line
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub message: String,
    pub role: Role,
    pub at: DateTime<Utc>,
}
