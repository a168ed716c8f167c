//! Claim DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_claims::projections::{
    CoordinatorDashboard, LecturerDashboard, ManagerDashboard,
};
use domain_claims::{Attachment, Claim, ClaimStatus};

/// One proposed attachment: original name plus base64 content
#[derive(Debug, Deserialize)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub content_base64: String,
}

/// Lecturer claim submission
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClaimRequest {
    #[validate(range(min = 1, max = 180))]
    pub hours_worked: u32,
    #[validate(length(max = 250))]
    pub notes: Option<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentUpload>,
}

#[derive(Debug, Serialize)]
pub struct AttachmentResponse {
    pub file_name: String,
    pub stored_as: String,
    pub size: u64,
}

impl From<Attachment> for AttachmentResponse {
    fn from(attachment: Attachment) -> Self {
        Self {
            file_name: attachment.file_name,
            stored_as: attachment.stored_as,
            size: attachment.size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: String,
    pub lecturer_name: String,
    pub lecturer_email: String,
    pub hours_worked: u32,
    pub hourly_rate: Decimal,
    /// Always hours x rate, recomputed at response time
    pub total: Decimal,
    pub notes: Option<String>,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<AttachmentResponse>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        let total = claim.total();
        Self {
            id: claim.id.to_string(),
            lecturer_name: claim.lecturer.name,
            lecturer_email: claim.lecturer.email,
            hours_worked: claim.hours_worked,
            hourly_rate: claim.hourly_rate,
            total,
            notes: claim.notes,
            status: claim.status,
            created_at: claim.created_at,
            attachments: claim.attachments.into_iter().map(Into::into).collect(),
        }
    }
}

/// History filters: status plus an inclusive creation-date range
#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    pub status: Option<ClaimStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct CoordinatorDashboardResponse {
    pub pending: Vec<ClaimResponse>,
    pub pending_count: usize,
    pub rejected_count: usize,
    pub oldest_pending: Option<DateTime<Utc>>,
}

impl From<CoordinatorDashboard> for CoordinatorDashboardResponse {
    fn from(dashboard: CoordinatorDashboard) -> Self {
        Self {
            pending: dashboard.pending.into_iter().map(Into::into).collect(),
            pending_count: dashboard.pending_count,
            rejected_count: dashboard.rejected_count,
            oldest_pending: dashboard.oldest_pending,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ManagerDashboardResponse {
    pub verified: Vec<ClaimResponse>,
    pub verified_count: usize,
    pub total_awaiting: Decimal,
}

impl From<ManagerDashboard> for ManagerDashboardResponse {
    fn from(dashboard: ManagerDashboard) -> Self {
        Self {
            verified: dashboard.verified.into_iter().map(Into::into).collect(),
            verified_count: dashboard.verified_count,
            total_awaiting: dashboard.total_awaiting,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LecturerDashboardResponse {
    pub claims: Vec<ClaimResponse>,
    pub pending_count: usize,
    pub approved_count: usize,
    pub total_approved: Decimal,
}

impl From<LecturerDashboard> for LecturerDashboardResponse {
    fn from(dashboard: LecturerDashboard) -> Self {
        Self {
            claims: dashboard.claims.into_iter().map(Into::into).collect(),
            pending_count: dashboard.pending_count,
            approved_count: dashboard.approved_count,
            total_approved: dashboard.total_approved,
        }
    }
}
