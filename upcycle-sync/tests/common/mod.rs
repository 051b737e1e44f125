#![allow(dead_code)]

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use upcycle_sync::memory::{MemoryBlobStore, MemoryDocumentStore, StaticAuth};
use upcycle_sync::{ItemPersistence, ItemSnapshot, SyncConfig};
use upcycle_types::PrincipalId;

pub struct Harness {
    pub docs: Arc<MemoryDocumentStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub auth: Arc<StaticAuth>,
    pub persistence: ItemPersistence,
}

pub fn harness() -> Harness {
    harness_with_config(SyncConfig::default())
}

/// Routes `tracing` output through the test harness; set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn harness_with_config(config: SyncConfig) -> Harness {
    init_tracing();
    let docs = Arc::new(MemoryDocumentStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let auth = Arc::new(StaticAuth::signed_in(principal("uid-alice")));
    let persistence = ItemPersistence::new(docs.clone(), blobs.clone(), auth.clone(), config);
    Harness {
        docs,
        blobs,
        auth,
        persistence,
    }
}

pub fn principal(id: &str) -> PrincipalId {
    PrincipalId::parse(id).unwrap()
}

/// A small solid-colour PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([180, 90, 30]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
        .unwrap();
    buf
}

pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xFF, 0xD8])
}

/// Waits for the next published snapshot.
pub async fn next_snapshot(rx: &mut watch::Receiver<ItemSnapshot>) -> ItemSnapshot {
    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("timed out waiting for snapshot")
        .expect("snapshot sender dropped");
    rx.borrow_and_update().clone()
}
