//! Fixed test values
//!
//! Predictable names, credentials and timestamps shared across suites.

use chrono::{DateTime, TimeZone, Utc};

pub const LECTURER_NAME: &str = "Thandi Nkosi";
pub const LECTURER_EMAIL: &str = "thandi@uni.ac.za";
pub const PASSWORD: &str = "s3cret-pass";

/// Fixed reference timestamp (Mar 15, 2025, noon UTC)
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
}

/// A timestamp a number of days before the reference point
pub fn days_before_base(days: i64) -> DateTime<Utc> {
    base_time() - chrono::Duration::days(days)
}
