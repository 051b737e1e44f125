use serde::{Deserialize, Serialize};

/// Default cap on downloaded blob size.
pub const DEFAULT_MAX_BLOB_BYTES: u64 = 25 * 1024 * 1024; // 25 MiB

/// Configuration shared by the persistence protocol and collection sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Document-store collection holding item records.
    pub collection: String,
    /// Content type attached to uploaded images.
    pub content_type: String,
    /// Largest blob `load_blob` will accept.
    pub max_blob_bytes: u64,
    /// JPEG quality (1-100) used when re-encoding images for upload.
    pub jpeg_quality: u8,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            collection: "items".to_string(),
            content_type: "image/jpeg".to_string(),
            max_blob_bytes: DEFAULT_MAX_BLOB_BYTES,
            jpeg_quality: 50,
        }
    }
}
