//! User Directory Domain
//!
//! This crate implements lecturer registration, credential verification and
//! the HR approval gate: a lecturer account created by self-registration is
//! inert until a human-resources actor activates it.
//!
//! # Account Lifecycle
//!
//! ```text
//! Register -> Unapproved --Approve(HR)--> Approved
//! ```
//!
//! Approval is never revoked; there is no suspend operation.

pub mod directory;
pub mod error;
pub mod password;
pub mod user;

pub use directory::{UserDirectory, UserUpdate, DEFAULT_HOURLY_RATE};
pub use error::UserError;
pub use user::User;
