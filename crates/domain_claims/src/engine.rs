//! Claim lifecycle engine
//!
//! The engine owns the transition table and its concurrency discipline: a
//! transition loads the claim, validates the (status, action, role) triple
//! against the table, and writes the new status back, all under the per-claim
//! lock. The actor's role is an explicit parameter; there is no ambient
//! authorization context.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Role, UserId};
use infra_store::JsonStore;

use crate::activity::ActivityLog;
use crate::attachment::Attachment;
use crate::claim::{
    Claim, ClaimStatus, LecturerRef, MAX_HOURLY_RATE, MAX_HOURS, MAX_NOTES_LEN, MIN_HOURLY_RATE,
    MIN_HOURS,
};
use crate::error::ClaimError;
use crate::projections::{self, HistoryFilter, ReportRow};
use crate::upload::UploadPolicy;

/// The authenticated actor behind a core call
///
/// Supplied by the session collaborator; the core trusts this identity and
/// does not re-authenticate.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
    pub email: String,
}

/// A role-authorized claim action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimAction {
    Verify,
    Approve,
    Reject,
}

impl ClaimAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimAction::Verify => "verify",
            ClaimAction::Approve => "approve",
            ClaimAction::Reject => "reject",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            ClaimAction::Verify => "Verified",
            ClaimAction::Approve => "Approved",
            ClaimAction::Reject => "Rejected",
        }
    }
}

impl std::fmt::Display for ClaimAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The submitting lecturer's profile fields the claim snapshots
#[derive(Debug, Clone)]
pub struct LecturerProfile {
    pub name: String,
    pub email: String,
    pub hourly_rate: Decimal,
}

/// A proposed attachment: name and declared length only
#[derive(Debug, Clone)]
pub struct ProposedFile {
    pub file_name: String,
    pub size: u64,
}

/// Validated submission input
#[derive(Debug, Clone, Default)]
pub struct ClaimDraft {
    pub hours_worked: u32,
    pub notes: Option<String>,
    pub files: Vec<ProposedFile>,
}

/// Returns the target status for a transition, or `InvalidTransition`
///
/// This is the entire authorization table. Anything not listed - wrong role,
/// wrong source status, terminal source - is refused without touching the
/// claim; state is never silently coerced.
pub fn transition_target(
    from: ClaimStatus,
    action: ClaimAction,
    actor: Role,
) -> Result<ClaimStatus, ClaimError> {
    match (from, action, actor) {
        (ClaimStatus::Pending, ClaimAction::Verify, Role::Coordinator) => Ok(ClaimStatus::Verified),
        (ClaimStatus::Pending, ClaimAction::Reject, Role::Coordinator) => Ok(ClaimStatus::Rejected),
        (ClaimStatus::Verified, ClaimAction::Approve, Role::Manager) => Ok(ClaimStatus::Approved),
        (ClaimStatus::Verified, ClaimAction::Reject, Role::Manager) => Ok(ClaimStatus::Rejected),
        _ => Err(ClaimError::InvalidTransition {
            from,
            action,
            role: actor,
        }),
    }
}

/// The state machine governing claim status, shared by every role dashboard
pub struct ClaimEngine {
    claims: Arc<JsonStore<Claim>>,
    activity: ActivityLog,
    upload_policy: UploadPolicy,
}

impl ClaimEngine {
    pub fn new(
        claims: Arc<JsonStore<Claim>>,
        activity: ActivityLog,
        upload_policy: UploadPolicy,
    ) -> Self {
        Self {
            claims,
            activity,
            upload_policy,
        }
    }

    /// Lecturer submits a new claim
    ///
    /// Field ranges and every proposed file are validated before anything is
    /// written: a single rejected attachment fails the whole submission, so
    /// no partial attachment set is ever persisted. Zero-length files are
    /// excluded here without consulting the upload guard.
    pub async fn submit(
        &self,
        actor: &Actor,
        lecturer: &LecturerProfile,
        draft: ClaimDraft,
    ) -> Result<Claim, ClaimError> {
        if actor.role != Role::Lecturer {
            return Err(ClaimError::Forbidden { role: actor.role });
        }

        if !(MIN_HOURS..=MAX_HOURS).contains(&draft.hours_worked) {
            return Err(ClaimError::validation(format!(
                "policy allows between {MIN_HOURS} and {MAX_HOURS} hours per month, got {}",
                draft.hours_worked
            )));
        }
        if lecturer.hourly_rate < MIN_HOURLY_RATE || lecturer.hourly_rate > MAX_HOURLY_RATE {
            return Err(ClaimError::validation(format!(
                "hourly rate must be between {MIN_HOURLY_RATE} and {MAX_HOURLY_RATE}, got {}",
                lecturer.hourly_rate
            )));
        }
        if let Some(notes) = &draft.notes {
            if notes.len() > MAX_NOTES_LEN {
                return Err(ClaimError::validation(format!(
                    "notes cannot be longer than {MAX_NOTES_LEN} characters"
                )));
            }
        }

        let files: Vec<&ProposedFile> = draft.files.iter().filter(|f| f.size > 0).collect();
        for file in &files {
            self.upload_policy.check(&file.file_name, file.size)?;
        }

        let id = ClaimId::new_v7();
        let attachments: Vec<Attachment> = files
            .iter()
            .map(|f| Attachment::assign(id, f.file_name.clone(), f.size))
            .collect();

        let claim = Claim {
            id,
            lecturer: LecturerRef {
                name: lecturer.name.clone(),
                email: lecturer.email.clone(),
            },
            hours_worked: draft.hours_worked,
            hourly_rate: lecturer.hourly_rate,
            notes: draft.notes,
            status: ClaimStatus::Pending,
            created_at: Utc::now(),
            attachments,
        };

        self.claims.upsert(claim.clone()).await?;
        self.activity
            .record(actor, format!("Submitted claim {id}"))
            .await?;

        tracing::info!(claim = %id, lecturer = %lecturer.email, "claim submitted");
        Ok(claim)
    }

    /// Applies a role-authorized status transition
    ///
    /// Serializable per claim id: the per-claim lock is held across load,
    /// table check and write, so of two concurrent attempts exactly one wins
    /// and the loser observes `InvalidTransition` against the winner's state.
    pub async fn transition(
        &self,
        actor: &Actor,
        claim_id: ClaimId,
        action: ClaimAction,
    ) -> Result<Claim, ClaimError> {
        let _guard = self.claims.lock(claim_id).await;

        let mut claim = self.claims.get(claim_id).await?;
        let target = transition_target(claim.status, action, actor.role)?;

        claim.status = target;
        self.claims.upsert(claim.clone()).await?;
        self.activity
            .record(actor, format!("{} claim {claim_id}", action.past_tense()))
            .await?;

        tracing::info!(
            claim = %claim_id,
            action = %action,
            role = %actor.role,
            status = %target,
            "claim transitioned"
        );
        Ok(claim)
    }

    pub async fn claim(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        Ok(self.claims.get(id).await?)
    }

    pub async fn all_claims(&self) -> Vec<Claim> {
        self.claims.all().await
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.upload_policy
    }

    // ------------------------------------------------------------------
    // Read-side projections; pure recomputations over the store snapshot
    // ------------------------------------------------------------------

    pub async fn history(&self, filter: &HistoryFilter) -> Vec<Claim> {
        projections::history(&self.claims.all().await, filter)
    }

    pub async fn report_rows(&self) -> Vec<ReportRow> {
        projections::report_rows(&self.claims.all().await)
    }

    pub async fn coordinator_dashboard(&self) -> projections::CoordinatorDashboard {
        projections::coordinator_dashboard(&self.claims.all().await)
    }

    pub async fn manager_dashboard(&self) -> projections::ManagerDashboard {
        projections::manager_dashboard(&self.claims.all().await)
    }

    pub async fn lecturer_dashboard(&self, email: &str) -> projections::LecturerDashboard {
        projections::lecturer_dashboard(&self.claims.all().await, email)
    }

    pub async fn overview(&self) -> projections::PipelineOverview {
        projections::overview(&self.claims.all().await)
    }
}
