//! Claim Lifecycle Domain
//!
//! This crate implements the monthly claim pipeline from submission through
//! verification, approval and payment reporting.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending --Verify(Coordinator)--> Verified --Approve(Manager)--> Approved
//!    |                                |
//!    +--Reject(Coordinator)--+        +--Reject(Manager)--+
//!                            v                            v
//!                        Rejected                     Rejected
//! ```
//!
//! Approved and Rejected are terminal. Every transition is authorized against
//! the actor's role explicitly and serialized per claim id, so two concurrent
//! attempts on the same claim yield exactly one winner.

pub mod activity;
pub mod attachment;
pub mod claim;
pub mod engine;
pub mod error;
pub mod projections;
pub mod upload;

pub use activity::{ActivityEntry, ActivityLog};
pub use attachment::Attachment;
pub use claim::{Claim, ClaimStatus, LecturerRef};
pub use engine::{Actor, ClaimAction, ClaimDraft, ClaimEngine, LecturerProfile, ProposedFile};
pub use error::ClaimError;
pub use projections::{HistoryFilter, ReportRow};
pub use upload::{UploadPolicy, UploadViolation};
