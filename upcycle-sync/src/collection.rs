//! Live mirror of one document-store collection.
//!
//! Every push from the store replaces the whole list. There is no diffing:
//! readers get a fresh immutable snapshot per rebuild and compare snapshots
//! themselves if they need finer-grained changes.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::store::{Document, DocumentStore};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error, info};
use upcycle_model::Item;

/// An immutable list of items in push order.
pub type ItemSnapshot = Arc<Vec<Item>>;

/// Server-pushed mirror of all items in a collection.
///
/// At most one subscription task writes the list at a time. It is cancelled
/// when its [`SyncHandle`] or the `Items` is dropped, or when `start` is
/// called again.
pub struct Items {
    store: Arc<dyn DocumentStore>,
    collection: String,
    snapshot: Arc<watch::Sender<ItemSnapshot>>,
    current: Mutex<Option<AbortHandle>>,
}

impl Items {
    pub fn new(store: Arc<dyn DocumentStore>, config: &SyncConfig) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            store,
            collection: config.collection.clone(),
            snapshot: Arc::new(snapshot),
            current: Mutex::new(None),
        }
    }

    /// The collection being mirrored.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The current list. Empty until the first push arrives.
    pub fn snapshot(&self) -> ItemSnapshot {
        self.snapshot.borrow().clone()
    }

    /// A receiver notified after every rebuild.
    pub fn watch(&self) -> watch::Receiver<ItemSnapshot> {
        self.snapshot.subscribe()
    }

    /// Replaces the list with items built from `documents`, preserving order.
    /// Returns the new length.
    pub fn apply_push(&self, documents: Vec<Document>) -> usize {
        rebuild(&self.snapshot, documents)
    }

    /// Opens the subscription and keeps the list current in a background task.
    ///
    /// Fails immediately if the store refuses the subscription. A later
    /// subscription error ends the task, leaves the last list in place and is
    /// returned from [`SyncHandle::join`]. Resubscribing is up to the caller;
    /// a successful restart cancels the previous task first.
    pub async fn start(&self) -> SyncResult<SyncHandle> {
        let mut subscription = self
            .store
            .subscribe(&self.collection)
            .await
            .inspect_err(|e| error!("Failed to subscribe to {}: {}", self.collection, e))?;
        info!("Subscribed to {}", self.collection);

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.take() {
            debug!("Cancelling previous subscription to {}", self.collection);
            previous.abort();
        }

        let snapshot = Arc::clone(&self.snapshot);
        let collection = self.collection.clone();
        let task = tokio::spawn(async move {
            while let Some(push) = subscription.next().await {
                match push {
                    Ok(documents) => {
                        let len = rebuild(&snapshot, documents);
                        debug!("Rebuilt {} with {} items", collection, len);
                    }
                    Err(e) => {
                        error!("Subscription to {} failed: {}", collection, e);
                        return Err(e);
                    }
                }
            }
            info!("Subscription to {} closed", collection);
            Ok(())
        });

        *current = Some(task.abort_handle());
        Ok(SyncHandle { task })
    }
}

impl Drop for Items {
    fn drop(&mut self) {
        if let Some(task) = self.current.lock().unwrap_or_else(PoisonError::into_inner).take() {
            task.abort();
        }
    }
}

fn rebuild(snapshot: &watch::Sender<ItemSnapshot>, documents: Vec<Document>) -> usize {
    let items: Vec<Item> = documents
        .into_iter()
        .map(|doc| Item::from_document(doc.id, &doc.data))
        .collect();
    let len = items.len();
    snapshot.send_replace(Arc::new(items));
    len
}

/// Handle to a running collection subscription. Dropping it cancels the
/// subscription.
#[derive(Debug)]
pub struct SyncHandle {
    task: JoinHandle<SyncResult<()>>,
}

impl SyncHandle {
    /// Cancels the subscription task.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the subscription to end and returns its error, if any.
    pub async fn join(mut self) -> SyncResult<()> {
        match (&mut self.task).await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(SyncError::Subscription(format!("sync task panicked: {e}"))),
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
