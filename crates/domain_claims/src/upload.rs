//! Upload guard
//!
//! Pure validation policy deciding whether a proposed file attachment may be
//! accepted: no I/O, no mutation, deterministic for the same inputs. Rejection
//! reasons are attributable to the specific violated rule so the caller can
//! report the exact constraint per file.
//!
//! Zero-length files are the caller's concern and never reach the guard.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attachment::extension;

const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// The rule a proposed upload violated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadViolation {
    #[error("{file_name}: {size} bytes exceeds the {limit}-byte limit")]
    TooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },

    #[error("{file_name}: file type '{extension}' is not allowed")]
    ExtensionNotAllowed {
        file_name: String,
        extension: String,
    },
}

/// Configured attachment acceptance policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Maximum accepted size in bytes
    pub max_bytes: u64,
    /// Accepted extensions, lowercased, without the leading dot
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES, ["pdf", "docx", "xlsx"])
    }
}

impl UploadPolicy {
    pub fn new(
        max_bytes: u64,
        allowed_extensions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            max_bytes,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.into().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Decides whether a proposed attachment may be accepted
    pub fn check(&self, file_name: &str, size: u64) -> Result<(), UploadViolation> {
        if size > self.max_bytes {
            return Err(UploadViolation::TooLarge {
                file_name: file_name.to_string(),
                size,
                limit: self.max_bytes,
            });
        }

        let ext = extension(file_name).unwrap_or_default();
        if !self.allowed_extensions.iter().any(|allowed| *allowed == ext) {
            return Err(UploadViolation::ExtensionNotAllowed {
                file_name: file_name.to_string(),
                extension: if ext.is_empty() { "(none)".to_string() } else { format!(".{ext}") },
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_file() {
        let policy = UploadPolicy::default();
        assert!(policy.check("timesheet.pdf", 1024).is_ok());
        assert!(policy.check("TIMESHEET.PDF", 1024).is_ok());
    }

    #[test]
    fn test_oversize_reason_names_size_and_limit() {
        let policy = UploadPolicy::new(100, ["pdf"]);
        let violation = policy.check("big.pdf", 101).unwrap_err();
        assert!(matches!(
            violation,
            UploadViolation::TooLarge {
                size: 101,
                limit: 100,
                ..
            }
        ));
        let message = violation.to_string();
        assert!(message.contains("big.pdf"));
        assert!(message.contains("101"));
        assert!(message.contains("100"));
    }

    #[test]
    fn test_disallowed_extension_reason_names_type() {
        let policy = UploadPolicy::default();
        let violation = policy.check("malware.exe", 10).unwrap_err();
        assert!(matches!(
            violation,
            UploadViolation::ExtensionNotAllowed { .. }
        ));
        assert!(violation.to_string().contains(".exe"));
    }

    #[test]
    fn test_missing_extension_is_disallowed() {
        let policy = UploadPolicy::default();
        assert!(policy.check("noextension", 10).is_err());
    }

    #[test]
    fn test_size_rule_is_checked_before_extension() {
        let policy = UploadPolicy::new(100, ["pdf"]);
        let violation = policy.check("big.exe", 500).unwrap_err();
        assert!(matches!(violation, UploadViolation::TooLarge { .. }));
    }

    #[test]
    fn test_deterministic() {
        let policy = UploadPolicy::default();
        let first = policy.check("a.docx", 42);
        let second = policy.check("a.docx", 42);
        assert_eq!(first, second);
    }
}
