//! Image payload encoding for the blob store.
//!
//! Uploaded images are always re-encoded as JPEG so the blob store holds one
//! format regardless of what the presentation layer captured.

use crate::error::{SyncError, SyncResult};
use image::codecs::jpeg::JpegEncoder;
use image::ColorType;

/// Re-encodes an in-memory image as JPEG at `quality` (clamped to 1..=100).
pub fn encode_jpeg(image: &[u8], quality: u8) -> SyncResult<Vec<u8>> {
    if image.is_empty() {
        return Err(SyncError::Encoding("image payload is empty".to_string()));
    }

    let decoded = image::load_from_memory(image)
        .map_err(|e| SyncError::Encoding(format!("cannot decode image: {e}")))?;
    let rgb = decoded.to_rgb8();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
        .map_err(|e| SyncError::Encoding(format!("cannot encode JPEG: {e}")))?;
    Ok(out)
}

/// Checks that downloaded bytes decode as an image.
pub fn validate_image(bytes: &[u8]) -> SyncResult<()> {
    image::load_from_memory(bytes)
        .map(|_| ())
        .map_err(|e| SyncError::Encoding(format!("downloaded blob is not an image: {e}")))
}
