//! Core Kernel - Foundational types for the contract monthly claims pipeline
//!
//! This crate provides the building blocks shared by every domain module:
//! - Strongly-typed entity identifiers
//! - The closed set of actor roles
//!
//! Error taxonomies live with the code that raises them: the store, the user
//! directory and the claims engine each define their own error enum.

pub mod identifiers;
pub mod role;

pub use identifiers::{ActivityId, ClaimId, UserId};
pub use role::Role;
