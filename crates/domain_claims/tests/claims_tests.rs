//! Comprehensive tests for the claim lifecycle domain

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, Role, UserId};
use domain_claims::{
    engine::transition_target, Actor, ClaimAction, ClaimDraft, ClaimEngine, ClaimError,
    ClaimStatus, ActivityLog, LecturerProfile, ProposedFile, UploadPolicy,
};
use infra_store::JsonStore;

async fn engine(dir: &tempfile::TempDir) -> ClaimEngine {
    engine_with_policy(dir, UploadPolicy::default()).await
}

async fn engine_with_policy(dir: &tempfile::TempDir, policy: UploadPolicy) -> ClaimEngine {
    let claims = Arc::new(
        JsonStore::open(dir.path().join("claims.json"))
            .await
            .unwrap(),
    );
    let activity = ActivityLog::new(Arc::new(
        JsonStore::open(dir.path().join("activity.json"))
            .await
            .unwrap(),
    ));
    ClaimEngine::new(claims, activity, policy)
}

fn lecturer_actor() -> Actor {
    Actor {
        id: UserId::new(),
        role: Role::Lecturer,
        email: "thandi@uni.ac.za".to_string(),
    }
}

fn actor(role: Role) -> Actor {
    Actor {
        id: UserId::new(),
        role,
        email: format!("{}@uni.ac.za", role.as_str().to_ascii_lowercase()),
    }
}

fn profile() -> LecturerProfile {
    LecturerProfile {
        name: "Thandi Nkosi".to_string(),
        email: "thandi@uni.ac.za".to_string(),
        hourly_rate: dec!(350),
    }
}

fn draft(hours: u32) -> ClaimDraft {
    ClaimDraft {
        hours_worked: hours,
        notes: None,
        files: Vec::new(),
    }
}

// ============================================================================
// Transition table
// ============================================================================

mod transition_table {
    use super::*;

    #[test]
    fn test_only_the_four_table_rows_succeed() {
        let statuses = [
            ClaimStatus::Pending,
            ClaimStatus::Verified,
            ClaimStatus::Approved,
            ClaimStatus::Rejected,
        ];
        let actions = [
            ClaimAction::Verify,
            ClaimAction::Approve,
            ClaimAction::Reject,
        ];

        for from in statuses {
            for action in actions {
                for role in Role::all() {
                    let result = transition_target(from, action, role);
                    let expected = match (from, action, role) {
                        (ClaimStatus::Pending, ClaimAction::Verify, Role::Coordinator) => {
                            Some(ClaimStatus::Verified)
                        }
                        (ClaimStatus::Pending, ClaimAction::Reject, Role::Coordinator) => {
                            Some(ClaimStatus::Rejected)
                        }
                        (ClaimStatus::Verified, ClaimAction::Approve, Role::Manager) => {
                            Some(ClaimStatus::Approved)
                        }
                        (ClaimStatus::Verified, ClaimAction::Reject, Role::Manager) => {
                            Some(ClaimStatus::Rejected)
                        }
                        _ => None,
                    };
                    match expected {
                        Some(target) => assert_eq!(result.unwrap(), target),
                        None => assert!(
                            result.unwrap_err().is_invalid_transition(),
                            "({from:?}, {action:?}, {role:?}) must be refused"
                        ),
                    }
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for from in [ClaimStatus::Approved, ClaimStatus::Rejected] {
            for action in [
                ClaimAction::Verify,
                ClaimAction::Approve,
                ClaimAction::Reject,
            ] {
                for role in Role::all() {
                    assert!(transition_target(from, action, role).is_err());
                }
            }
        }
    }

    #[test]
    fn test_manager_cannot_approve_a_pending_claim() {
        let err =
            transition_target(ClaimStatus::Pending, ClaimAction::Approve, Role::Manager)
                .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::InvalidTransition {
                from: ClaimStatus::Pending,
                action: ClaimAction::Approve,
                role: Role::Manager,
            }
        ));
    }
}

// ============================================================================
// Submission
// ============================================================================

mod submission {
    use super::*;

    #[tokio::test]
    async fn test_submit_creates_pending_claim_with_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        let claim = engine
            .submit(&lecturer_actor(), &profile(), draft(10))
            .await
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.hours_worked, 10);
        assert_eq!(claim.hourly_rate, dec!(350));
        assert_eq!(claim.total(), dec!(3500));
        assert_eq!(claim.lecturer.name, "Thandi Nkosi");
        assert_eq!(claim.lecturer.email, "thandi@uni.ac.za");
    }

    #[tokio::test]
    async fn test_only_lecturers_may_submit() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        for role in [Role::Coordinator, Role::Manager, Role::Hr] {
            let err = engine
                .submit(&actor(role), &profile(), draft(10))
                .await
                .unwrap_err();
            assert!(matches!(err, ClaimError::Forbidden { .. }));
        }
        assert!(engine.all_claims().await.is_empty());
    }

    #[tokio::test]
    async fn test_hours_out_of_range_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        for hours in [0, 181, 500] {
            let err = engine
                .submit(&lecturer_actor(), &profile(), draft(hours))
                .await
                .unwrap_err();
            assert!(matches!(err, ClaimError::Validation(_)), "hours={hours}");
        }
        // Boundary values are accepted
        assert!(engine
            .submit(&lecturer_actor(), &profile(), draft(1))
            .await
            .is_ok());
        assert!(engine
            .submit(&lecturer_actor(), &profile(), draft(180))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_rate_out_of_range_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        for rate in [dec!(49.99), dec!(2000.01), dec!(0)] {
            let mut profile = profile();
            profile.hourly_rate = rate;
            let err = engine
                .submit(&lecturer_actor(), &profile, draft(10))
                .await
                .unwrap_err();
            assert!(matches!(err, ClaimError::Validation(_)), "rate={rate}");
        }
    }

    #[tokio::test]
    async fn test_overlong_notes_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        let mut draft = draft(10);
        draft.notes = Some("x".repeat(251));
        let err = engine
            .submit(&lecturer_actor(), &profile(), draft)
            .await
            .unwrap_err();
        assert!(matches!(err, ClaimError::Validation(_)));
    }

    #[tokio::test]
    async fn test_zero_byte_files_are_skipped_without_guard() {
        let tmp = tempfile::tempdir().unwrap();
        // A policy that rejects everything: if the guard saw the empty file,
        // submission would fail
        let engine = engine_with_policy(&tmp, UploadPolicy::new(0, Vec::<String>::new())).await;

        let mut draft = draft(10);
        draft.files = vec![ProposedFile {
            file_name: "empty.pdf".to_string(),
            size: 0,
        }];

        let claim = engine
            .submit(&lecturer_actor(), &profile(), draft)
            .await
            .unwrap();
        assert!(claim.attachments.is_empty());
    }

    #[tokio::test]
    async fn test_oversize_file_rejects_whole_submission() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine_with_policy(&tmp, UploadPolicy::new(1024, ["pdf"])).await;

        let mut bad = draft(10);
        bad.files = vec![
            ProposedFile {
                file_name: "fine.pdf".to_string(),
                size: 100,
            },
            ProposedFile {
                file_name: "huge.pdf".to_string(),
                size: 10_000,
            },
        ];

        let err = engine
            .submit(&lecturer_actor(), &profile(), bad)
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("huge.pdf"));
        assert!(message.contains("1024"));

        // Nothing persisted, not even the acceptable attachment
        assert!(engine.all_claims().await.is_empty());
    }

    #[tokio::test]
    async fn test_accepted_files_get_unique_storage_names() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        let mut draft = draft(10);
        draft.files = vec![
            ProposedFile {
                file_name: "timesheet.pdf".to_string(),
                size: 100,
            },
            ProposedFile {
                file_name: "timesheet.pdf".to_string(),
                size: 200,
            },
        ];

        let claim = engine
            .submit(&lecturer_actor(), &profile(), draft)
            .await
            .unwrap();
        assert_eq!(claim.attachments.len(), 2);
        assert_ne!(claim.attachments[0].stored_as, claim.attachments[1].stored_as);
        assert!(claim.attachments.iter().all(|a| a.claim_id == claim.id));
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn test_full_pipeline_scenario() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        // Lecturer submits 10 hours at rate 350
        let claim = engine
            .submit(&lecturer_actor(), &profile(), draft(10))
            .await
            .unwrap();
        assert_eq!(claim.total(), dec!(3500));
        assert_eq!(claim.status, ClaimStatus::Pending);

        // Coordinator verifies
        let claim = engine
            .transition(&actor(Role::Coordinator), claim.id, ClaimAction::Verify)
            .await
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Verified);

        // Manager approves
        let claim = engine
            .transition(&actor(Role::Manager), claim.id, ClaimAction::Approve)
            .await
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Approved);

        // The claim now appears in the HR report, grouped by lecturer
        let rows = engine.report_rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lecturer_name, "Thandi Nkosi");
        assert_eq!(rows[0].email, "thandi@uni.ac.za");
        assert_eq!(rows[0].total_hours, 10);
        assert_eq!(rows[0].total_amount, dec!(3500));
    }

    #[tokio::test]
    async fn test_transition_changes_nothing_but_status() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        let mut submitted_draft = draft(12);
        submitted_draft.notes = Some("extra tutorials".to_string());
        let before = engine
            .submit(&lecturer_actor(), &profile(), submitted_draft)
            .await
            .unwrap();

        let after = engine
            .transition(&actor(Role::Coordinator), before.id, ClaimAction::Verify)
            .await
            .unwrap();

        assert_eq!(after.hours_worked, before.hours_worked);
        assert_eq!(after.hourly_rate, before.hourly_rate);
        assert_eq!(after.lecturer, before.lecturer);
        assert_eq!(after.notes, before.notes);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.status, ClaimStatus::Verified);
    }

    #[tokio::test]
    async fn test_invalid_transition_leaves_claim_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        let claim = engine
            .submit(&lecturer_actor(), &profile(), draft(10))
            .await
            .unwrap();

        // Manager tries to approve a still-pending claim
        let err = engine
            .transition(&actor(Role::Manager), claim.id, ClaimAction::Approve)
            .await
            .unwrap_err();
        assert!(err.is_invalid_transition());

        assert_eq!(engine.claim(claim.id).await.unwrap().status, ClaimStatus::Pending);
    }

    #[tokio::test]
    async fn test_terminal_claims_never_move_again() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        let claim = engine
            .submit(&lecturer_actor(), &profile(), draft(10))
            .await
            .unwrap();
        engine
            .transition(&actor(Role::Coordinator), claim.id, ClaimAction::Reject)
            .await
            .unwrap();

        for action in [
            ClaimAction::Verify,
            ClaimAction::Approve,
            ClaimAction::Reject,
        ] {
            for role in Role::all() {
                let result = engine
                    .transition(&actor(role), claim.id, action)
                    .await;
                assert!(result.is_err());
            }
        }
        assert_eq!(
            engine.claim(claim.id).await.unwrap().status,
            ClaimStatus::Rejected
        );
    }

    #[tokio::test]
    async fn test_unknown_claim_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        let err = engine
            .transition(&actor(Role::Coordinator), ClaimId::new(), ClaimAction::Verify)
            .await
            .unwrap_err();
        assert!(matches!(err, ClaimError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_transitions_are_journaled_per_actor() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = engine(&tmp).await;

        let coordinator = actor(Role::Coordinator);
        let claim = engine
            .submit(&lecturer_actor(), &profile(), draft(10))
            .await
            .unwrap();
        engine
            .transition(&coordinator, claim.id, ClaimAction::Verify)
            .await
            .unwrap();

        let entries = engine.activity().recent_for(coordinator.id, 10).await;
        assert_eq!(entries.len(), 1);
        assert!(entries[0].message.starts_with("Verified claim"));
        assert_eq!(entries[0].role, Role::Coordinator);
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_verify_and_reject_have_one_winner() {
        for _ in 0..10 {
            let tmp = tempfile::tempdir().unwrap();
            let engine = Arc::new(engine(&tmp).await);

            let claim = engine
                .submit(&lecturer_actor(), &profile(), draft(10))
                .await
                .unwrap();

            let verify = {
                let engine = Arc::clone(&engine);
                let id = claim.id;
                tokio::spawn(async move {
                    engine
                        .transition(&actor(Role::Coordinator), id, ClaimAction::Verify)
                        .await
                })
            };
            let reject = {
                let engine = Arc::clone(&engine);
                let id = claim.id;
                tokio::spawn(async move {
                    engine
                        .transition(&actor(Role::Coordinator), id, ClaimAction::Reject)
                        .await
                })
            };

            let verify = verify.await.unwrap();
            let reject = reject.await.unwrap();

            // Exactly one attempt wins; the loser sees InvalidTransition
            let verify_won = verify.is_ok();
            assert_ne!(verify_won, reject.is_ok());
            let loser = if verify_won { reject } else { verify };
            assert!(loser.unwrap_err().is_invalid_transition());

            // The persisted status matches the winner's target
            let final_status = engine.claim(claim.id).await.unwrap().status;
            if verify_won {
                assert_eq!(final_status, ClaimStatus::Verified);
            } else {
                assert_eq!(final_status, ClaimStatus::Rejected);
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_unrelated_claims_process_concurrently() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = Arc::new(engine(&tmp).await);

        let mut ids = Vec::new();
        for _ in 0..8 {
            let claim = engine
                .submit(&lecturer_actor(), &profile(), draft(10))
                .await
                .unwrap();
            ids.push(claim.id);
        }

        let mut handles = Vec::new();
        for id in ids.clone() {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                engine
                    .transition(&actor(Role::Coordinator), id, ClaimAction::Verify)
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for id in ids {
            assert_eq!(engine.claim(id).await.unwrap().status, ClaimStatus::Verified);
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use super::*;
    use chrono::Utc;
    use domain_claims::{Claim, LecturerRef};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_total_is_always_hours_times_rate(
            hours in 1u32..=180,
            rate_cents in 5_000i64..=200_000,
        ) {
            let rate = Decimal::new(rate_cents, 2);
            let claim = Claim {
                id: ClaimId::new(),
                lecturer: LecturerRef {
                    name: "Lecturer".to_string(),
                    email: "lecturer@uni.ac.za".to_string(),
                },
                hours_worked: hours,
                hourly_rate: rate,
                notes: None,
                status: ClaimStatus::Pending,
                created_at: Utc::now(),
                attachments: Vec::new(),
            };

            let expected = Decimal::from(hours) * rate;
            // Recomputed identically regardless of how many times read
            prop_assert_eq!(claim.total(), expected);
            prop_assert_eq!(claim.total(), claim.total());
        }

        #[test]
        fn prop_terminal_states_refuse_every_action(
            action_idx in 0usize..3,
            role_idx in 0usize..4,
        ) {
            let action = [ClaimAction::Verify, ClaimAction::Approve, ClaimAction::Reject][action_idx];
            let role = Role::all()[role_idx];
            for from in [ClaimStatus::Approved, ClaimStatus::Rejected] {
                prop_assert!(transition_target(from, action, role).is_err());
            }
        }
    }
}
