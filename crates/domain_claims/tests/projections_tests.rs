//! Tests for the read-side projections

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::ClaimId;
use domain_claims::projections::{
    coordinator_dashboard, history, lecturer_dashboard, manager_dashboard, overview,
    pending_queue, report_rows, verified_queue,
};
use domain_claims::{Claim, ClaimStatus, HistoryFilter, LecturerRef};

fn claim(
    name: &str,
    email: &str,
    hours: u32,
    rate: Decimal,
    status: ClaimStatus,
    days_ago: i64,
) -> Claim {
    let base = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
    Claim {
        id: ClaimId::new(),
        lecturer: LecturerRef {
            name: name.to_string(),
            email: email.to_string(),
        },
        hours_worked: hours,
        hourly_rate: rate,
        notes: None,
        status,
        created_at: base - Duration::days(days_ago),
        attachments: Vec::new(),
    }
}

fn sample_claims() -> Vec<Claim> {
    vec![
        claim("Thandi Nkosi", "thandi@uni.ac.za", 10, dec!(350), ClaimStatus::Pending, 0),
        claim("Thandi Nkosi", "thandi@uni.ac.za", 8, dec!(350), ClaimStatus::Approved, 5),
        claim("Thandi Nkosi", "thandi@uni.ac.za", 12, dec!(350), ClaimStatus::Approved, 9),
        claim("Sipho Dlamini", "sipho@uni.ac.za", 20, dec!(500), ClaimStatus::Approved, 3),
        claim("Sipho Dlamini", "sipho@uni.ac.za", 4, dec!(500), ClaimStatus::Verified, 1),
        claim("Lindiwe Zulu", "lindiwe@uni.ac.za", 30, dec!(100), ClaimStatus::Rejected, 2),
        claim("Lindiwe Zulu", "lindiwe@uni.ac.za", 15, dec!(100), ClaimStatus::Pending, 7),
    ]
}

// ============================================================================
// Queues
// ============================================================================

#[test]
fn test_pending_queue_is_newest_first() {
    let queue = pending_queue(&sample_claims());
    assert_eq!(queue.len(), 2);
    assert!(queue[0].created_at > queue[1].created_at);
    assert!(queue.iter().all(|c| c.status == ClaimStatus::Pending));
}

#[test]
fn test_verified_queue_only_contains_verified() {
    let queue = verified_queue(&sample_claims());
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].lecturer.email, "sipho@uni.ac.za");
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_history_unfiltered_returns_everything_newest_first() {
    let claims = sample_claims();
    let all = history(&claims, &HistoryFilter::default());
    assert_eq!(all.len(), claims.len());
    for pair in all.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[test]
fn test_history_filters_by_status() {
    let approved = history(
        &sample_claims(),
        &HistoryFilter {
            status: Some(ClaimStatus::Approved),
            ..Default::default()
        },
    );
    assert_eq!(approved.len(), 3);
}

#[test]
fn test_history_date_range_is_inclusive() {
    let claims = sample_claims();
    let filter = HistoryFilter {
        status: None,
        from: Some(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()),
        to: Some(NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()),
    };
    let ranged = history(&claims, &filter);
    // days_ago 3..=5 fall inside the window
    assert_eq!(ranged.len(), 2);
    for c in &ranged {
        let date = c.created_at.date_naive();
        assert!(date >= filter.from.unwrap() && date <= filter.to.unwrap());
    }
}

// ============================================================================
// HR report
// ============================================================================

#[test]
fn test_report_groups_approved_by_lecturer() {
    let rows = report_rows(&sample_claims());

    assert_eq!(rows.len(), 2);

    // Sipho: 20h x 500 = 10000; Thandi: (8 + 12)h x 350 = 7000
    assert_eq!(rows[0].lecturer_name, "Sipho Dlamini");
    assert_eq!(rows[0].total_hours, 20);
    assert_eq!(rows[0].total_amount, dec!(10000));

    assert_eq!(rows[1].lecturer_name, "Thandi Nkosi");
    assert_eq!(rows[1].total_hours, 20);
    assert_eq!(rows[1].total_amount, dec!(7000));
}

#[test]
fn test_report_ignores_non_approved_claims() {
    let rows = report_rows(&sample_claims());
    assert!(rows.iter().all(|r| r.email != "lindiwe@uni.ac.za"));
}

#[test]
fn test_report_is_empty_without_approvals() {
    let claims = vec![claim(
        "Thandi Nkosi",
        "thandi@uni.ac.za",
        10,
        dec!(350),
        ClaimStatus::Pending,
        0,
    )];
    assert!(report_rows(&claims).is_empty());
}

// ============================================================================
// Dashboards
// ============================================================================

#[test]
fn test_coordinator_dashboard_counts() {
    let dashboard = coordinator_dashboard(&sample_claims());
    assert_eq!(dashboard.pending_count, 2);
    assert_eq!(dashboard.rejected_count, 1);
    // Oldest pending is the 7-days-ago claim
    let oldest = dashboard.oldest_pending.unwrap();
    assert_eq!(
        oldest,
        dashboard
            .pending
            .iter()
            .map(|c| c.created_at)
            .min()
            .unwrap()
    );
}

#[test]
fn test_manager_dashboard_sums_awaiting_total() {
    let dashboard = manager_dashboard(&sample_claims());
    assert_eq!(dashboard.verified_count, 1);
    assert_eq!(dashboard.total_awaiting, dec!(2000));
}

#[test]
fn test_lecturer_dashboard_sees_only_own_claims() {
    let dashboard = lecturer_dashboard(&sample_claims(), "thandi@uni.ac.za");
    assert_eq!(dashboard.claims.len(), 3);
    assert_eq!(dashboard.pending_count, 1);
    assert_eq!(dashboard.approved_count, 2);
    assert_eq!(dashboard.total_approved, dec!(7000));
}

#[test]
fn test_lecturer_dashboard_email_match_is_case_insensitive() {
    let dashboard = lecturer_dashboard(&sample_claims(), "THANDI@UNI.AC.ZA");
    assert_eq!(dashboard.claims.len(), 3);
}

#[test]
fn test_overview_counts() {
    let summary = overview(&sample_claims());
    assert_eq!(summary.total_claims, 7);
    assert_eq!(summary.approved_count, 3);
    assert_eq!(summary.rejected_count, 1);
}
