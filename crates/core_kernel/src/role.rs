//! Actor roles in the approval pipeline
//!
//! The role set is closed: every actor is exactly one of these four, and the
//! lifecycle engine authorizes transitions against the role explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pipeline role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Submits monthly claims
    Lecturer,
    /// Verifies or rejects pending claims
    Coordinator,
    /// Approves or rejects verified claims
    Manager,
    /// Manages accounts and payment reporting
    Hr,
}

impl Role {
    /// Returns every role in the closed set
    pub fn all() -> [Role; 4] {
        [Role::Lecturer, Role::Coordinator, Role::Manager, Role::Hr]
    }

    /// Returns the canonical display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Lecturer => "Lecturer",
            Role::Coordinator => "Coordinator",
            Role::Manager => "Manager",
            Role::Hr => "HR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lecturer" => Ok(Role::Lecturer),
            "coordinator" => Ok(Role::Coordinator),
            "manager" => Ok(Role::Manager),
            "hr" => Ok(Role::Hr),
            other => Err(CoreRoleParseError(other.to_string())),
        }
    }
}

/// Error returned when parsing an unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct CoreRoleParseError(pub String);
