use upcycle_sync::{DownloadError, SyncConfig, SyncError, DEFAULT_MAX_BLOB_BYTES};

// ── SyncConfig ──────────────────────────────────────────────────

#[test]
fn default_config() {
    let cfg = SyncConfig::default();
    assert_eq!(cfg.collection, "items");
    assert_eq!(cfg.content_type, "image/jpeg");
    assert_eq!(cfg.max_blob_bytes, 25 * 1024 * 1024);
    assert_eq!(cfg.max_blob_bytes, DEFAULT_MAX_BLOB_BYTES);
    assert_eq!(cfg.jpeg_quality, 50);
}

#[test]
fn partial_config_fills_defaults() {
    let cfg: SyncConfig = serde_json::from_str(r#"{"collection": "teams"}"#).unwrap();
    assert_eq!(cfg.collection, "teams");
    assert_eq!(cfg.content_type, "image/jpeg");
    assert_eq!(cfg.max_blob_bytes, DEFAULT_MAX_BLOB_BYTES);
}

#[test]
fn config_serde_roundtrip() {
    let cfg = SyncConfig {
        jpeg_quality: 80,
        ..Default::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let back: SyncConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

// ── SyncError ───────────────────────────────────────────────────

#[test]
fn error_display() {
    assert_eq!(SyncError::AuthRequired.to_string(), "authentication required");
    let err = SyncError::Write("offline".into());
    assert!(err.to_string().contains("offline"));
    let err: SyncError = DownloadError::TooLarge { size: 10, max: 5 }.into();
    assert!(err.to_string().contains("10"));
}

#[test]
fn is_not_found_only_for_missing_blobs() {
    let missing: SyncError = DownloadError::NotFound {
        container: "c".into(),
        key: "k".into(),
    }
    .into();
    assert!(missing.is_not_found());
    assert!(!SyncError::Upload("x".into()).is_not_found());
    let transport: SyncError = DownloadError::Transport("reset".into()).into();
    assert!(!transport.is_not_found());
}
