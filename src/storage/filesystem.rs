//! Filesystem signature store

use crate::core::order::OrderId;
use crate::core::store::{SignatureStore, SignatureUpload};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes signature images as `<directory>/<order_id>.<ext>`
///
/// Returned references are relative (`signatures/<file>`), so the media root
/// can move without rewriting stored orders.
#[derive(Debug, Clone)]
pub struct FsSignatureStore {
    directory: PathBuf,
}

impl FsSignatureStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Remove images stored for this order under another extension
    async fn remove_stale(&self, order_id: &OrderId, keep: &str) -> Result<()> {
        let prefix = format!("{}.", order_id);
        let mut entries = tokio::fs::read_dir(&self.directory).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&prefix) && name != keep {
                tokio::fs::remove_file(entry.path()).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SignatureStore for FsSignatureStore {
    async fn save(&self, order_id: &OrderId, upload: SignatureUpload) -> Result<String> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .with_context(|| format!("creating {}", self.directory.display()))?;

        let file_name = format!("{}.{}", order_id, upload.extension());
        let path = self.directory.join(&file_name);

        tokio::fs::write(&path, &upload.bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        if let Err(e) = self.remove_stale(order_id, &file_name).await {
            tracing::warn!(order_id = %order_id, error = %e, "could not remove previous signature");
        }

        tracing::debug!(
            order_id = %order_id,
            path = %path.display(),
            bytes = upload.bytes.len(),
            "signature written"
        );

        Ok(format!("signatures/{}", file_name))
    }
}
