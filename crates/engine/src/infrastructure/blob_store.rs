//! Local-disk blob store for uploaded character images.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::infrastructure::ports::{BlobError, BlobStorePort};

/// Writes blobs under `root` and serves them from `public_url`.
pub struct LocalBlobStore {
    root: PathBuf,
    public_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_url: &str) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Keys are single file names: no separators, no leading dot.
fn validate_key(key: &str) -> Result<(), BlobError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(BlobError::InvalidKey(key.to_string()))
    }
}

#[async_trait]
impl BlobStorePort for LocalBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        validate_key(key)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| BlobError::WriteFailed(e.to_string()))?;
        tokio::fs::write(self.root.join(key), &bytes)
            .await
            .map_err(|e| BlobError::WriteFailed(e.to_string()))?;

        tracing::debug!(key = %key, size = bytes.len(), content_type = %content_type, "Stored blob");
        Ok(format!("{}/{}", self.public_url, key))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        validate_key(key)?;

        match tokio::fs::remove_file(self.root.join(key)).await {
            Ok(()) => {
                tracing::debug!(key = %key, "Removed blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BlobError::DeleteFailed(e.to_string())),
        }
    }
}
