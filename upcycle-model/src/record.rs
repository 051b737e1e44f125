use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The structured record stored for one item, keyed out-of-band by its id.
///
/// Field names are the document-store wire names. `created_at` is epoch
/// seconds. Empty strings stand for "not set" in `blob_ref` and `owner_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemRecord {
    pub name: String,
    pub location_label: String,
    pub longitude: f64,
    pub latitude: f64,
    pub blob_ref: String,
    pub created_at: f64,
    pub owner_id: String,
}

impl ItemRecord {
    /// Reads a record from raw document fields.
    ///
    /// Never fails: a missing or wrongly-typed field falls back to its zero
    /// value, and a non-object document yields an all-default record.
    pub fn from_value(data: &Value) -> Self {
        Self {
            name: get_str(data, "name"),
            location_label: get_str(data, "locationLabel"),
            longitude: get_number(data, "longitude"),
            latitude: get_number(data, "latitude"),
            blob_ref: get_str(data, "blobRef"),
            created_at: get_number(data, "createdAt"),
            owner_id: get_str(data, "ownerId"),
        }
    }

    /// Serializes to the raw document fields written to the store.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "locationLabel": self.location_label,
            "longitude": self.longitude,
            "latitude": self.latitude,
            "blobRef": self.blob_ref,
            "createdAt": self.created_at,
            "ownerId": self.owner_id,
        })
    }
}

fn get_str(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn get_number(data: &Value, key: &str) -> f64 {
    data.get(key)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .unwrap_or_default()
}
