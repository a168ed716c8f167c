//! File storage collaborator
//!
//! Persists attachment bytes under the storage-assigned unique name and
//! retrieves them for download. The core only ever sees metadata.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::ApiError;

/// Attachment byte storage
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persists `bytes` under the assigned unique name
    async fn save(&self, stored_as: &str, bytes: &[u8]) -> Result<(), ApiError>;

    /// Retrieves the bytes previously saved under `stored_as`
    async fn load(&self, stored_as: &str) -> Result<Vec<u8>, ApiError>;
}

/// Local-disk adapter keeping every attachment in one directory
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, stored_as: &str) -> Result<PathBuf, ApiError> {
        // Stored names are store-assigned UUIDs; anything path-like is hostile
        if stored_as.is_empty()
            || stored_as.contains('/')
            || stored_as.contains('\\')
            || stored_as.contains("..")
        {
            return Err(ApiError::BadRequest("invalid attachment name".to_string()));
        }
        Ok(self.root.join(stored_as))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, stored_as: &str, bytes: &[u8]) -> Result<(), ApiError> {
        let path = self.resolve(stored_as)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ApiError::Internal(format!("attachment storage fault: {e}")))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ApiError::Internal(format!("attachment storage fault: {e}")))?;
        Ok(())
    }

    async fn load(&self, stored_as: &str) -> Result<Vec<u8>, ApiError> {
        let path = self.resolve(stored_as)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ApiError::NotFound(format!("attachment not found: {stored_as}")))
            }
            Err(e) => Err(ApiError::Internal(format!("attachment storage fault: {e}"))),
        }
    }
}
