//! Read-side projections
//!
//! Every view a role dashboard consumes is a pure recomputation over the
//! claims snapshot; nothing here is cached or persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::claim::{Claim, ClaimStatus};

/// Optional history filters; date bounds are inclusive on the creation date
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub status: Option<ClaimStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// One HR payment-report line: a lecturer's approved hours and amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub lecturer_name: String,
    pub email: String,
    pub total_hours: u64,
    pub total_amount: Decimal,
}

/// Coordinator landing view
#[derive(Debug, Clone, Serialize)]
pub struct CoordinatorDashboard {
    pub pending: Vec<Claim>,
    pub pending_count: usize,
    pub rejected_count: usize,
    pub oldest_pending: Option<DateTime<Utc>>,
}

/// Manager landing view
#[derive(Debug, Clone, Serialize)]
pub struct ManagerDashboard {
    pub verified: Vec<Claim>,
    pub verified_count: usize,
    pub total_awaiting: Decimal,
}

/// Lecturer landing view: own claims only
#[derive(Debug, Clone, Serialize)]
pub struct LecturerDashboard {
    pub claims: Vec<Claim>,
    pub pending_count: usize,
    pub approved_count: usize,
    pub total_approved: Decimal,
}

/// HR pipeline summary counts
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PipelineOverview {
    pub total_claims: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
}

/// Claims awaiting coordinator verification, newest first
pub fn pending_queue(claims: &[Claim]) -> Vec<Claim> {
    by_status_newest_first(claims, ClaimStatus::Pending)
}

/// Claims awaiting manager approval, newest first
pub fn verified_queue(claims: &[Claim]) -> Vec<Claim> {
    by_status_newest_first(claims, ClaimStatus::Verified)
}

/// All claims, optionally filtered, newest first
pub fn history(claims: &[Claim], filter: &HistoryFilter) -> Vec<Claim> {
    let mut matched: Vec<Claim> = claims
        .iter()
        .filter(|c| filter.status.map_or(true, |status| c.status == status))
        .filter(|c| {
            filter
                .from
                .map_or(true, |from| c.created_at.date_naive() >= from)
        })
        .filter(|c| filter.to.map_or(true, |to| c.created_at.date_naive() <= to))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}

/// Approved claims grouped per lecturer, descending by summed amount
pub fn report_rows(claims: &[Claim]) -> Vec<ReportRow> {
    let mut groups: BTreeMap<(String, String), (u64, Decimal)> = BTreeMap::new();
    for claim in claims.iter().filter(|c| c.status == ClaimStatus::Approved) {
        let key = (claim.lecturer.name.clone(), claim.lecturer.email.clone());
        let entry = groups.entry(key).or_insert((0, Decimal::ZERO));
        entry.0 += u64::from(claim.hours_worked);
        entry.1 += claim.total();
    }

    let mut rows: Vec<ReportRow> = groups
        .into_iter()
        .map(|((lecturer_name, email), (total_hours, total_amount))| ReportRow {
            lecturer_name,
            email,
            total_hours,
            total_amount,
        })
        .collect();
    rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    rows
}

pub fn coordinator_dashboard(claims: &[Claim]) -> CoordinatorDashboard {
    let pending = pending_queue(claims);
    let oldest_pending = pending.iter().map(|c| c.created_at).min();
    CoordinatorDashboard {
        pending_count: pending.len(),
        rejected_count: count_status(claims, ClaimStatus::Rejected),
        oldest_pending,
        pending,
    }
}

pub fn manager_dashboard(claims: &[Claim]) -> ManagerDashboard {
    let verified = verified_queue(claims);
    let total_awaiting = verified.iter().map(Claim::total).sum();
    ManagerDashboard {
        verified_count: verified.len(),
        total_awaiting,
        verified,
    }
}

pub fn lecturer_dashboard(claims: &[Claim], email: &str) -> LecturerDashboard {
    let mut mine: Vec<Claim> = claims
        .iter()
        .filter(|c| c.lecturer.email.eq_ignore_ascii_case(email))
        .cloned()
        .collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let pending_count = mine.iter().filter(|c| c.status == ClaimStatus::Pending).count();
    let approved: Vec<&Claim> = mine
        .iter()
        .filter(|c| c.status == ClaimStatus::Approved)
        .collect();
    let total_approved = approved.iter().map(|c| c.total()).sum();

    LecturerDashboard {
        pending_count,
        approved_count: approved.len(),
        total_approved,
        claims: mine,
    }
}

pub fn overview(claims: &[Claim]) -> PipelineOverview {
    PipelineOverview {
        total_claims: claims.len(),
        approved_count: count_status(claims, ClaimStatus::Approved),
        rejected_count: count_status(claims, ClaimStatus::Rejected),
    }
}

fn by_status_newest_first(claims: &[Claim], status: ClaimStatus) -> Vec<Claim> {
    let mut matched: Vec<Claim> = claims
        .iter()
        .filter(|c| c.status == status)
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}

fn count_status(claims: &[Claim], status: ClaimStatus) -> usize {
    claims.iter().filter(|c| c.status == status).count()
}
