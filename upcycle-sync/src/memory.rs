//! In-process store adapters.
//!
//! Complete implementations of the store traits backed by process memory.
//! Every call is recorded so tests can assert exactly what reached a store,
//! and writes, uploads, downloads and subscriptions can be made to fail.

use crate::error::{DownloadError, SyncError, SyncResult};
use crate::store::{AuthProvider, BlobStore, Document, DocumentStore, SnapshotSender, Subscription};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use upcycle_types::{BlobRef, ItemId, PrincipalId};
use uuid::Uuid;

/// A call that reached a [`MemoryDocumentStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentCall {
    Create { collection: String, data: Value },
    Update { collection: String, id: ItemId, data: Value },
    Subscribe { collection: String },
}

#[derive(Default)]
struct DocumentState {
    collections: HashMap<String, Vec<Document>>,
    subscribers: HashMap<String, Vec<SnapshotSender>>,
    calls: Vec<DocumentCall>,
    fail_writes: bool,
    fail_subscribe: bool,
}

impl DocumentState {
    fn upsert(&mut self, collection: &str, id: ItemId, data: Value) {
        let docs = self.collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => doc.data = data,
            None => docs.push(Document { id, data }),
        }
        self.notify(collection);
    }

    fn notify(&mut self, collection: &str) {
        let docs = self.collections.get(collection).cloned().unwrap_or_default();
        if let Some(subs) = self.subscribers.get_mut(collection) {
            subs.retain(|s| s.push(docs.clone()));
        }
    }
}

/// Document store holding collections in memory, in insertion order.
#[derive(Default)]
pub struct MemoryDocumentStore {
    state: Mutex<DocumentState>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent creates and updates fail with [`SyncError::Write`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    /// Makes subsequent subscribe calls fail.
    pub fn set_fail_subscribe(&self, fail: bool) {
        self.state.lock().unwrap().fail_subscribe = fail;
    }

    /// Writes raw fields at `id` as another client would, notifying subscribers.
    pub fn insert_raw(&self, collection: &str, id: ItemId, data: Value) {
        self.state.lock().unwrap().upsert(collection, id, data);
    }

    /// Ends every open subscription on `collection` with an error.
    pub fn fail_subscribers(&self, collection: &str, reason: &str) {
        let subs = self
            .state
            .lock()
            .unwrap()
            .subscribers
            .remove(collection)
            .unwrap_or_default();
        for sub in subs {
            sub.fail(reason);
        }
    }

    /// Current records of `collection`.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get(&self, collection: &str, id: &ItemId) -> Option<Value> {
        self.documents(collection)
            .into_iter()
            .find(|d| &d.id == id)
            .map(|d| d.data)
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<DocumentCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of create and update calls received.
    pub fn write_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| !matches!(c, DocumentCall::Subscribe { .. }))
            .count()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_record(&self, collection: &str, data: Value) -> SyncResult<ItemId> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(DocumentCall::Create {
            collection: collection.to_string(),
            data: data.clone(),
        });
        if state.fail_writes {
            return Err(SyncError::Write("injected write failure".to_string()));
        }
        let id = ItemId::parse(Uuid::new_v4().simple().to_string())
            .map_err(|e| SyncError::Write(e.to_string()))?;
        state.upsert(collection, id.clone(), data);
        Ok(id)
    }

    async fn update_record(&self, collection: &str, id: &ItemId, data: Value) -> SyncResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(DocumentCall::Update {
            collection: collection.to_string(),
            id: id.clone(),
            data: data.clone(),
        });
        if state.fail_writes {
            return Err(SyncError::Write("injected write failure".to_string()));
        }
        state.upsert(collection, id.clone(), data);
        Ok(())
    }

    async fn subscribe(&self, collection: &str) -> SyncResult<Subscription> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(DocumentCall::Subscribe {
            collection: collection.to_string(),
        });
        if state.fail_subscribe {
            return Err(SyncError::Subscription("injected subscribe failure".to_string()));
        }
        let (sender, subscription) = Subscription::channel();
        let current = state.collections.get(collection).cloned().unwrap_or_default();
        sender.push(current);
        state
            .subscribers
            .entry(collection.to_string())
            .or_default()
            .push(sender);
        Ok(subscription)
    }
}

/// A call that reached a [`MemoryBlobStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobCall {
    Upload { container: String, key: String, len: usize },
    Download { container: String, key: String },
}

/// A stored blob and its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
struct BlobState {
    blobs: HashMap<(String, String), StoredBlob>,
    calls: Vec<BlobCall>,
    fail_uploads: bool,
    fail_downloads: bool,
}

/// Blob store holding payloads in memory.
#[derive(Default)]
pub struct MemoryBlobStore {
    state: Mutex<BlobState>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.state.lock().unwrap().fail_uploads = fail;
    }

    pub fn set_fail_downloads(&self, fail: bool) {
        self.state.lock().unwrap().fail_downloads = fail;
    }

    /// Stores a blob directly, bypassing the call log.
    pub fn put(&self, container: &str, key: &str, bytes: Vec<u8>) {
        self.state.lock().unwrap().blobs.insert(
            (container.to_string(), key.to_string()),
            StoredBlob {
                bytes,
                content_type: "application/octet-stream".to_string(),
            },
        );
    }

    pub fn get(&self, container: &str, key: &str) -> Option<StoredBlob> {
        self.state
            .lock()
            .unwrap()
            .blobs
            .get(&(container.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of blobs stored across all containers.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn calls(&self) -> Vec<BlobCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload_blob(
        &self,
        container: &ItemId,
        key: &BlobRef,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> SyncResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BlobCall::Upload {
            container: container.to_string(),
            key: key.to_string(),
            len: bytes.len(),
        });
        if state.fail_uploads {
            return Err(SyncError::Upload("injected upload failure".to_string()));
        }
        state.blobs.insert(
            (container.to_string(), key.to_string()),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn download_blob(
        &self,
        container: &ItemId,
        key: &BlobRef,
        max_bytes: u64,
    ) -> SyncResult<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BlobCall::Download {
            container: container.to_string(),
            key: key.to_string(),
        });
        if state.fail_downloads {
            return Err(DownloadError::Transport("injected download failure".to_string()).into());
        }
        let blob = state
            .blobs
            .get(&(container.to_string(), key.to_string()))
            .ok_or_else(|| DownloadError::NotFound {
                container: container.to_string(),
                key: key.to_string(),
            })?;
        let size = blob.bytes.len() as u64;
        if size > max_bytes {
            return Err(DownloadError::TooLarge { size, max: max_bytes }.into());
        }
        Ok(blob.bytes.clone())
    }
}

/// Authentication provider with a settable principal.
#[derive(Debug, Default)]
pub struct StaticAuth {
    principal: Mutex<Option<PrincipalId>>,
}

impl StaticAuth {
    pub fn signed_in(principal: PrincipalId) -> Self {
        Self {
            principal: Mutex::new(Some(principal)),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, principal: PrincipalId) {
        *self.principal.lock().unwrap() = Some(principal);
    }

    pub fn sign_out(&self) {
        *self.principal.lock().unwrap() = None;
    }
}

impl AuthProvider for StaticAuth {
    fn current_principal(&self) -> Option<PrincipalId> {
        self.principal.lock().unwrap().clone()
    }
}
