//! Item persistence protocol.
//!
//! Saving an item is a multi-step, eventually consistent sequence over two
//! stores that share no transaction:
//!
//! 1. [`ItemPersistence::save`] writes the record (create on first save,
//!    update by id afterwards).
//! 2. [`ItemPersistence::save_blob`] uploads the image under the item's id,
//!    then updates the record with the blob name.
//!
//! If step 2's record update fails after the upload succeeded, the blob is
//! stored but the record does not reference it. Nothing here retries or
//! repairs that state; callers decide whether to retry.

use crate::codec;
use crate::config::SyncConfig;
use crate::error::{DownloadError, SyncError, SyncResult};
use crate::store::{AuthProvider, BlobStore, DocumentStore};
use std::sync::Arc;
use tracing::{debug, info, warn};
use upcycle_model::Item;

/// Orchestrates record and blob writes for single items.
///
/// Holds no per-item state. Concurrent calls for the same item must be
/// coordinated by the caller.
pub struct ItemPersistence {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    auth: Arc<dyn AuthProvider>,
    config: SyncConfig,
}

impl ItemPersistence {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        auth: Arc<dyn AuthProvider>,
        config: SyncConfig,
    ) -> Self {
        Self {
            documents,
            blobs,
            auth,
            config,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Writes the item's record, attributing it to the current principal.
    ///
    /// An unsaved item is created and receives the store-assigned id; a
    /// saved item is updated in place. Fails with
    /// [`SyncError::AuthRequired`] before touching the store if nobody is
    /// signed in.
    pub async fn save(&self, item: &mut Item) -> SyncResult<()> {
        let Some(owner) = self.auth.current_principal() else {
            warn!("Refusing to save item without an authenticated principal");
            return Err(SyncError::AuthRequired);
        };
        item.set_owner(owner);

        let data = item.to_record().to_value();
        let collection = self.config.collection.as_str();

        match item.id().cloned() {
            Some(id) => {
                self.documents
                    .update_record(collection, &id, data)
                    .await
                    .inspect_err(|e| warn!("Failed to update record {}: {}", id, e))?;
                debug!("Updated record {} in {}", id, collection);
            }
            None => {
                let id = self
                    .documents
                    .create_record(collection, data)
                    .await
                    .inspect_err(|e| warn!("Failed to create record in {}: {}", collection, e))?;
                info!("Created record {} in {}", id, collection);
                item.assign_id(id);
            }
        }
        Ok(())
    }

    /// Uploads the item's image and records its blob name.
    ///
    /// Requires a prior successful [`save`](Self::save). The first upload
    /// generates a blob name; later uploads reuse it so the stored blob is
    /// replaced in place. The record is only updated after the upload
    /// succeeds.
    pub async fn save_blob(&self, item: &mut Item) -> SyncResult<()> {
        let Some(id) = item.id().cloned() else {
            warn!("Refusing to upload image for an item that has no record");
            return Err(SyncError::NotPersisted);
        };

        let bytes = codec::encode_jpeg(&item.image, self.config.jpeg_quality)
            .inspect_err(|e| warn!("Cannot encode image for item {}: {}", id, e))?;
        let blob_ref = item.ensure_blob_ref().clone();

        self.blobs
            .upload_blob(&id, &blob_ref, bytes, &self.config.content_type)
            .await
            .inspect_err(|e| warn!("Upload of blob {} for item {} failed: {}", blob_ref, id, e))?;
        debug!("Uploaded blob {} for item {}", blob_ref, id);

        let data = item.to_record().to_value();
        self.documents
            .update_record(&self.config.collection, &id, data)
            .await
            .inspect_err(|e| {
                warn!(
                    "Blob {} uploaded but record {} was not updated: {}",
                    blob_ref, id, e
                )
            })?;
        info!("Item {} now references blob {}", id, blob_ref);
        Ok(())
    }

    /// Downloads the item's image into [`Item::image`].
    ///
    /// On any failure the image already held by the item is left as it was.
    pub async fn load_blob(&self, item: &mut Item) -> SyncResult<()> {
        let Some(id) = item.id() else {
            return Err(SyncError::NotPersisted);
        };
        let Some(blob_ref) = item.blob_ref() else {
            return Err(DownloadError::NotFound {
                container: id.to_string(),
                key: String::new(),
            }
            .into());
        };

        let max = self.config.max_blob_bytes;
        let bytes = self
            .blobs
            .download_blob(id, blob_ref, max)
            .await
            .inspect_err(|e| warn!("Download of blob {} for item {} failed: {}", blob_ref, id, e))?;

        let size = bytes.len() as u64;
        if size > max {
            return Err(DownloadError::TooLarge { size, max }.into());
        }
        codec::validate_image(&bytes)?;

        debug!("Loaded {} byte image for item {}", size, id);
        item.image = bytes;
        Ok(())
    }

    /// Saves the record and then, if the item holds an image, the blob.
    ///
    /// Strictly sequential; stops at the first failure.
    pub async fn save_all(&self, item: &mut Item) -> SyncResult<()> {
        self.save(item).await?;
        if item.image.is_empty() {
            return Ok(());
        }
        self.save_blob(item).await
    }
}
