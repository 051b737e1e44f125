//! Remote store abstractions.
//!
//! The sync core talks to two independently consistent services: a document
//! store holding one structured record per item, and a blob store holding one
//! binary payload per item. Both are injected as trait objects so the
//! persistence protocol and collection sync never reach for a global client.

use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use upcycle_types::{BlobRef, ItemId, PrincipalId};

/// A record as delivered by the document store: the store key plus raw fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: ItemId,
    pub data: Value,
}

/// Structured record storage with server-pushed change notification.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a record and returns the id the store assigned to it.
    async fn create_record(&self, collection: &str, data: Value) -> SyncResult<ItemId>;

    /// Writes a record at `id`. Callers assume upsert semantics.
    async fn update_record(&self, collection: &str, id: &ItemId, data: Value) -> SyncResult<()>;

    /// Opens a live subscription to `collection`.
    ///
    /// The first push carries the current state; later pushes carry the full
    /// record set after every remote change.
    async fn subscribe(&self, collection: &str) -> SyncResult<Subscription>;
}

/// Named binary payload storage addressed by container and key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` under `container`/`key`, replacing any existing blob.
    async fn upload_blob(
        &self,
        container: &ItemId,
        key: &BlobRef,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> SyncResult<()>;

    /// Reads the blob at `container`/`key`. Blobs larger than `max_bytes`
    /// fail with [`DownloadError::TooLarge`](crate::DownloadError::TooLarge).
    async fn download_blob(
        &self,
        container: &ItemId,
        key: &BlobRef,
        max_bytes: u64,
    ) -> SyncResult<Vec<u8>>;
}

/// Read-only view of the authentication provider.
pub trait AuthProvider: Send + Sync {
    /// The principal currently signed in, if any.
    fn current_principal(&self) -> Option<PrincipalId>;
}

type Push = SyncResult<Vec<Document>>;

/// Receiving half of a document-store subscription.
///
/// Yields full record sets in delivery order. After the first error it
/// yields nothing further.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Push>,
    failed: bool,
}

/// Sending half of a subscription, held by a [`DocumentStore`] implementation.
#[derive(Debug, Clone)]
pub struct SnapshotSender {
    tx: mpsc::UnboundedSender<Push>,
}

impl Subscription {
    /// Creates a connected sender/subscription pair.
    pub fn channel() -> (SnapshotSender, Subscription) {
        let (tx, rx) = mpsc::unbounded_channel();
        (SnapshotSender { tx }, Subscription { rx, failed: false })
    }

    /// Waits for the next push. Returns `None` once the store closes the
    /// subscription or after an error has been delivered.
    pub async fn next(&mut self) -> Option<Push> {
        if self.failed {
            return None;
        }
        let push = self.rx.recv().await?;
        if push.is_err() {
            self.failed = true;
            self.rx.close();
        }
        Some(push)
    }
}

impl SnapshotSender {
    /// Delivers a full record set. Returns false if the subscriber is gone.
    pub fn push(&self, documents: Vec<Document>) -> bool {
        self.tx.send(Ok(documents)).is_ok()
    }

    /// Delivers the terminal error for this subscription.
    pub fn fail(self, reason: impl Into<String>) {
        let _ = self.tx.send(Err(SyncError::Subscription(reason.into())));
    }

    /// Whether the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
