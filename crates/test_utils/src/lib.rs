//! Shared test utilities for the claims pipeline
//!
//! Builders construct entities with sensible defaults so tests specify only
//! the fields they care about; fixtures provide fixed, predictable values.

pub mod builders;
pub mod fixtures;

pub use builders::{TestClaimBuilder, TestUserBuilder};
