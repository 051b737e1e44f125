//! Core type definitions for the UpcycleBuddy sync core.
//!
//! This crate defines the small, store-agnostic value types shared by the
//! model and sync crates:
//! - Store-assigned record identifiers and generated blob names
//! - Principal identifiers from the authentication boundary
//! - Geographic coordinates and epoch-second timestamps

mod coordinate;
mod ids;
mod timestamp;

pub use coordinate::Coordinate;
pub use ids::{BlobRef, ItemId, PrincipalId};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
