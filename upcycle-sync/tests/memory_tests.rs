use serde_json::json;
use upcycle_sync::memory::{DocumentCall, MemoryBlobStore, MemoryDocumentStore, StaticAuth};
use upcycle_sync::{AuthProvider, BlobStore, DocumentStore, DownloadError, SyncError};
use upcycle_types::{BlobRef, ItemId, PrincipalId};

// ── StaticAuth ──────────────────────────────────────────────────

#[test]
fn static_auth_sign_in_and_out() {
    let auth = StaticAuth::signed_out();
    assert!(auth.current_principal().is_none());

    auth.sign_in(PrincipalId::parse("uid-1").unwrap());
    assert_eq!(auth.current_principal().unwrap().as_str(), "uid-1");

    auth.sign_out();
    assert!(auth.current_principal().is_none());
}

// ── MemoryDocumentStore ─────────────────────────────────────────

#[tokio::test]
async fn create_generates_distinct_ids() {
    let store = MemoryDocumentStore::new();
    let a = store.create_record("items", json!({"name": "a"})).await.unwrap();
    let b = store.create_record("items", json!({"name": "b"})).await.unwrap();

    assert_ne!(a, b);
    let docs = store.documents("items");
    assert_eq!(docs[0].id, a);
    assert_eq!(docs[1].id, b);
}

#[tokio::test]
async fn update_missing_id_upserts() {
    let store = MemoryDocumentStore::new();
    let id = ItemId::parse("fresh").unwrap();
    store.update_record("items", &id, json!({"name": "x"})).await.unwrap();
    assert_eq!(store.get("items", &id).unwrap()["name"], "x");
}

#[tokio::test]
async fn subscribe_is_logged_and_pushes_current_state() {
    let store = MemoryDocumentStore::new();
    store.insert_raw("items", ItemId::parse("a").unwrap(), json!({}));

    let mut sub = store.subscribe("items").await.unwrap();

    assert_eq!(sub.next().await.unwrap().unwrap().len(), 1);
    assert_eq!(
        store.calls(),
        vec![DocumentCall::Subscribe {
            collection: "items".to_string()
        }]
    );
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn failed_writes_are_still_logged() {
    let store = MemoryDocumentStore::new();
    store.set_fail_writes(true);
    let err = store.create_record("items", json!({})).await.unwrap_err();
    assert!(matches!(err, SyncError::Write(_)));
    assert_eq!(store.write_count(), 1);
    assert!(store.documents("items").is_empty());
}

// ── MemoryBlobStore ─────────────────────────────────────────────

#[tokio::test]
async fn blob_download_respects_cap() {
    let store = MemoryBlobStore::new();
    let id = ItemId::parse("c").unwrap();
    let key = BlobRef::parse("k").unwrap();
    store.upload_blob(&id, &key, vec![0; 10], "image/jpeg").await.unwrap();

    let err = store.download_blob(&id, &key, 9).await.unwrap_err();
    assert!(matches!(
        err,
        SyncError::Download(DownloadError::TooLarge { size: 10, max: 9 })
    ));
    assert_eq!(store.download_blob(&id, &key, 10).await.unwrap().len(), 10);
}

#[tokio::test]
async fn blob_upload_failure_stores_nothing() {
    let store = MemoryBlobStore::new();
    store.set_fail_uploads(true);
    let err = store
        .upload_blob(
            &ItemId::parse("c").unwrap(),
            &BlobRef::generate(),
            vec![1],
            "image/jpeg",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Upload(_)));
    assert!(store.is_empty());
    assert_eq!(store.calls().len(), 1);
}
