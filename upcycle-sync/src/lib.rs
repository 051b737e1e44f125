//! Sync core for UpcycleBuddy listings.
//!
//! Keeps listing items consistent with two independent remote services:
//! a document store holding one structured record per item and a blob store
//! holding one image per item.
//!
//! # Components
//!
//! - **Stores**: [`DocumentStore`], [`BlobStore`] and [`AuthProvider`]
//!   abstract the remote services; implementations are injected.
//! - **Persistence**: [`ItemPersistence`] saves a record, uploads an image
//!   and links the two, in that order.
//! - **Collection sync**: [`Items`] mirrors a whole collection from the
//!   store's push notifications.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use upcycle_model::Item;
//! use upcycle_sync::memory::{MemoryBlobStore, MemoryDocumentStore, StaticAuth};
//! use upcycle_sync::{ItemPersistence, SyncConfig};
//! use upcycle_types::PrincipalId;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let persistence = ItemPersistence::new(
//!     Arc::new(MemoryDocumentStore::new()),
//!     Arc::new(MemoryBlobStore::new()),
//!     Arc::new(StaticAuth::signed_in(PrincipalId::parse("uid-1").unwrap())),
//!     SyncConfig::default(),
//! );
//!
//! let mut item = Item::new();
//! item.name = "Oak chair".to_string();
//! persistence.save(&mut item).await.unwrap();
//! assert!(item.id().is_some());
//! # }
//! ```

pub mod codec;
mod collection;
mod config;
mod error;
pub mod fs;
pub mod memory;
mod persistence;
pub mod store;

pub use collection::{ItemSnapshot, Items, SyncHandle};
pub use config::{SyncConfig, DEFAULT_MAX_BLOB_BYTES};
pub use error::{DownloadError, SyncError, SyncResult};
pub use fs::{FsBlobStore, FsBlobStoreConfig};
pub use persistence::ItemPersistence;
pub use store::{AuthProvider, BlobStore, Document, DocumentStore, SnapshotSender, Subscription};
