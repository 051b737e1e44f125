//! Filesystem blob store.
//!
//! Each container is a directory under the configured root and each blob a
//! file named by its key. Uploads are written to a hidden temp file and
//! renamed over the target, so a replaced blob is never observed half
//! written. The content type is kept in a `<key>.meta.json` sidecar.

use crate::config::DEFAULT_MAX_BLOB_BYTES;
use crate::error::{DownloadError, SyncError, SyncResult};
use crate::store::BlobStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use upcycle_types::{BlobRef, ItemId};
use uuid::Uuid;

/// Filesystem blob store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsBlobStoreConfig {
    /// Directory holding one subdirectory per container.
    pub root: PathBuf,
    /// Store-wide download cap, applied on top of the per-call limit.
    #[serde(default = "default_max_blob_bytes")]
    pub max_blob_bytes: u64,
}

impl FsBlobStoreConfig {
    /// Config rooted at `root` with the default download cap.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_blob_bytes: DEFAULT_MAX_BLOB_BYTES,
        }
    }
}

fn default_max_blob_bytes() -> u64 {
    DEFAULT_MAX_BLOB_BYTES
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlobMeta {
    content_type: String,
}

/// Blob store backed by a local directory tree.
pub struct FsBlobStore {
    config: FsBlobStoreConfig,
}

impl FsBlobStore {
    pub fn new(config: FsBlobStoreConfig) -> Self {
        Self { config }
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Returns the content type recorded for a blob, if the blob exists.
    pub async fn content_type(&self, container: &ItemId, key: &BlobRef) -> SyncResult<Option<String>> {
        let (dir, _) = self.blob_path(container, key)?;
        match fs::read(dir.join(meta_name(key))).await {
            Ok(raw) => {
                let meta: BlobMeta = serde_json::from_slice(&raw)?;
                Ok(Some(meta.content_type))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DownloadError::Transport(format!("failed to read metadata: {e}")).into()),
        }
    }

    fn blob_path(&self, container: &ItemId, key: &BlobRef) -> SyncResult<(PathBuf, PathBuf)> {
        check_segment(container.as_str())?;
        check_segment(key.as_str())?;
        let dir = self.config.root.join(container.as_str());
        let file = dir.join(key.as_str());
        Ok((dir, file))
    }
}

/// Rejects keys that would escape their directory.
fn check_segment(segment: &str) -> SyncResult<()> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.starts_with('.')
        || segment.contains(['/', '\\'])
    {
        return Err(SyncError::Upload(format!("invalid blob path segment {segment:?}")));
    }
    Ok(())
}

fn meta_name(key: &BlobRef) -> String {
    format!("{key}.meta.json")
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn upload_blob(
        &self,
        container: &ItemId,
        key: &BlobRef,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> SyncResult<()> {
        let (dir, file) = self.blob_path(container, key)?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| SyncError::Upload(format!("failed to create container: {e}")))?;

        let tmp = dir.join(format!(".{key}.{}.tmp", Uuid::new_v4().simple()));
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| SyncError::Upload(format!("failed to write blob: {e}")))?;
        if let Err(e) = fs::rename(&tmp, &file).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(SyncError::Upload(format!("failed to move blob into place: {e}")));
        }

        let meta = BlobMeta {
            content_type: content_type.to_string(),
        };
        fs::write(dir.join(meta_name(key)), serde_json::to_vec(&meta)?)
            .await
            .map_err(|e| SyncError::Upload(format!("failed to write metadata: {e}")))?;

        debug!("Wrote {} bytes to {:?}", bytes.len(), file);
        Ok(())
    }

    async fn download_blob(
        &self,
        container: &ItemId,
        key: &BlobRef,
        max_bytes: u64,
    ) -> SyncResult<Vec<u8>> {
        let (_, file) = self
            .blob_path(container, key)
            .map_err(|e| DownloadError::Transport(e.to_string()))?;

        let metadata = match fs::metadata(&file).await {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DownloadError::NotFound {
                    container: container.to_string(),
                    key: key.to_string(),
                }
                .into());
            }
            Err(e) => {
                return Err(DownloadError::Transport(format!("failed to stat blob: {e}")).into());
            }
        };
        let max = max_bytes.min(self.config.max_blob_bytes);
        if metadata.len() > max {
            return Err(DownloadError::TooLarge {
                size: metadata.len(),
                max,
            }
            .into());
        }

        fs::read(&file)
            .await
            .map_err(|e| DownloadError::Transport(format!("failed to read blob: {e}")).into())
    }
}
