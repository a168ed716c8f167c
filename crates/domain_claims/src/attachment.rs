//! Attachment metadata
//!
//! The core records metadata only; raw bytes live with the file storage
//! collaborator under the storage-assigned name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::ClaimId;

/// A supporting document attached to a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Owning claim
    pub claim_id: ClaimId,
    /// Filename as uploaded
    pub file_name: String,
    /// Collision-free name assigned by storage
    pub stored_as: String,
    /// Declared size in bytes
    pub size: u64,
}

impl Attachment {
    /// Creates the metadata record and assigns the unique storage name
    ///
    /// The storage name keeps the original extension so downloads carry a
    /// usable type: `{uuid}{.ext}`.
    pub fn assign(claim_id: ClaimId, file_name: impl Into<String>, size: u64) -> Self {
        let file_name = file_name.into();
        let unique = Uuid::new_v4().simple();
        let stored_as = match extension(&file_name) {
            Some(ext) => format!("{unique}.{ext}"),
            None => unique.to_string(),
        };
        Self {
            claim_id,
            file_name,
            stored_as,
            size,
        }
    }
}

/// Lowercased extension of a filename, if it has one
pub(crate) fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}
