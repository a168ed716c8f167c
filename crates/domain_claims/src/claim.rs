//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use infra_store::Record;

use crate::attachment::Attachment;

/// Monthly hours policy bounds
pub const MIN_HOURS: u32 = 1;
pub const MAX_HOURS: u32 = 180;

/// Hourly rate policy bounds
pub const MIN_HOURLY_RATE: Decimal = dec!(50);
pub const MAX_HOURLY_RATE: Decimal = dec!(2000);

/// Free-text notes length bound
pub const MAX_NOTES_LEN: usize = 250;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Submitted, waiting for coordinator verification
    Pending,
    /// Verified by a coordinator, waiting for manager approval
    Verified,
    /// Approved by a manager; enters payment reporting
    Approved,
    /// Rejected by a coordinator or manager
    Rejected,
}

impl ClaimStatus {
    /// Terminal states admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Verified => "Verified",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ClaimStatus::Pending),
            "verified" => Ok(ClaimStatus::Verified),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            other => Err(format!("unknown claim status: {other}")),
        }
    }
}

/// Lecturer identity snapshot
///
/// Denormalized from the user record at submission time so later account
/// edits never retroactively alter historical claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecturerRef {
    pub name: String,
    pub email: String,
}

/// A lecturer's monthly hours submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Submitting lecturer, snapshotted at creation
    pub lecturer: LecturerRef,
    /// Hours worked this month (1-180)
    pub hours_worked: u32,
    /// Rate copied from the lecturer at creation, immutable thereafter
    pub hourly_rate: Decimal,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// Lifecycle status; the only mutable field
    pub status: ClaimStatus,
    /// Created timestamp, immutable
    pub created_at: DateTime<Utc>,
    /// Supporting documents, immutable once created
    pub attachments: Vec<Attachment>,
}

impl Claim {
    /// The monetizable total, recomputed on every read
    ///
    /// Never stored independently; hours and rate are the source of truth.
    pub fn total(&self) -> Decimal {
        Decimal::from(self.hours_worked) * self.hourly_rate
    }
}

impl Record for Claim {
    type Id = ClaimId;
    const KIND: &'static str = "claim";

    fn id(&self) -> ClaimId {
        self.id
    }
}
