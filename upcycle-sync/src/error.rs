//! Error types for the sync layer.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No authenticated principal to attribute the write to.
    #[error("authentication required")]
    AuthRequired,

    /// The item has no store-assigned id yet.
    #[error("item has not been saved")]
    NotPersisted,

    /// Record create or update failed.
    #[error("record write failed: {0}")]
    Write(String),

    /// The live subscription failed. Reported once.
    #[error("subscription failed: {0}")]
    Subscription(String),

    /// Blob upload failed.
    #[error("blob upload failed: {0}")]
    Upload(String),

    /// Blob download failed.
    #[error("blob download failed: {0}")]
    Download(#[from] DownloadError),

    /// The image payload could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SyncError {
    /// Returns true if the error means the requested blob does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::Download(DownloadError::NotFound { .. }))
    }
}

/// Ways a blob download can fail.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("no blob {key:?} in container {container:?}")]
    NotFound { container: String, key: String },

    /// The blob exceeds the caller's size cap. Never truncated.
    #[error("blob is {size} bytes, limit is {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("{0}")]
    Transport(String),
}
