use serde_json::Value;
use upcycle_types::{BlobRef, Coordinate, ItemId, PrincipalId, Timestamp};

use crate::{ItemAnnotation, ItemRecord};

/// Location label used when a place lookup returns a place without a name.
pub const UNNAMED_PLACE: &str = "<place unnamed>";

/// How far an item has progressed through the save protocol.
///
/// Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PersistenceStatus {
    /// No record exists yet.
    Unsaved,
    /// A record exists but no image has been uploaded.
    SavedNoBlob,
    /// A record exists and points at an uploaded image.
    SavedWithBlob,
}

/// A place chosen through an external autocomplete or geocoding provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceSelection {
    pub name: Option<String>,
    pub coordinate: Coordinate,
}

/// One listing.
///
/// Fields edited by the presentation layer are public. Identity and
/// attribution (`id`, `blob_ref`, `owner_id`) are only changed through the
/// methods below, which enforce assign-once semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: Option<ItemId>,
    pub name: String,
    pub location_label: String,
    pub coordinate: Coordinate,
    blob_ref: Option<BlobRef>,
    created_at: Timestamp,
    owner_id: Option<PrincipalId>,
    /// Transient image bytes. Never part of the record.
    pub image: Vec<u8>,
}

impl Item {
    /// Creates a new, unsaved item stamped with the current time.
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            location_label: String::new(),
            coordinate: Coordinate::default(),
            blob_ref: None,
            created_at: Timestamp::now(),
            owner_id: None,
            image: Vec::new(),
        }
    }

    /// Rebuilds an item from a stored record's raw fields.
    ///
    /// Missing or malformed fields take their zero values. The image is
    /// left empty until it is loaded separately.
    pub fn from_document(id: ItemId, data: &Value) -> Self {
        let mut item = Self::from_record(&ItemRecord::from_value(data));
        item.id = Some(id);
        item
    }

    /// Rebuilds an unsaved item from a record.
    pub fn from_record(record: &ItemRecord) -> Self {
        Self {
            id: None,
            name: record.name.clone(),
            location_label: record.location_label.clone(),
            coordinate: Coordinate::new(record.latitude, record.longitude),
            blob_ref: BlobRef::parse(record.blob_ref.as_str()).ok(),
            created_at: Timestamp::from_epoch_seconds(record.created_at).unwrap_or_default(),
            owner_id: PrincipalId::parse(record.owner_id.as_str()).ok(),
            image: Vec::new(),
        }
    }

    /// The persisted-record shape of this item.
    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            name: self.name.clone(),
            location_label: self.location_label.clone(),
            longitude: self.coordinate.longitude,
            latitude: self.coordinate.latitude,
            blob_ref: self
                .blob_ref
                .as_ref()
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
            created_at: self.created_at.epoch_seconds(),
            owner_id: self
                .owner_id
                .as_ref()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn id(&self) -> Option<&ItemId> {
        self.id.as_ref()
    }

    pub fn blob_ref(&self) -> Option<&BlobRef> {
        self.blob_ref.as_ref()
    }

    pub fn owner_id(&self) -> Option<&PrincipalId> {
        self.owner_id.as_ref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn status(&self) -> PersistenceStatus {
        match (&self.id, &self.blob_ref) {
            (None, _) => PersistenceStatus::Unsaved,
            (Some(_), None) => PersistenceStatus::SavedNoBlob,
            (Some(_), Some(_)) => PersistenceStatus::SavedWithBlob,
        }
    }

    /// Records the store-assigned id. Returns false, leaving the item
    /// untouched, if an id was already assigned.
    pub fn assign_id(&mut self, id: ItemId) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id);
        true
    }

    /// Returns the blob name, generating one first if the item has none.
    pub fn ensure_blob_ref(&mut self) -> &BlobRef {
        self.blob_ref.get_or_insert_with(BlobRef::generate)
    }

    /// Attributes the item to `owner`, replacing any previous owner.
    pub fn set_owner(&mut self, owner: PrincipalId) {
        self.owner_id = Some(owner);
    }

    /// Applies a place lookup result to the location fields.
    pub fn apply_place(&mut self, place: PlaceSelection) {
        self.location_label = place.name.unwrap_or_else(|| UNNAMED_PLACE.to_string());
        self.coordinate = place.coordinate;
    }

    pub fn annotation(&self) -> ItemAnnotation<'_> {
        ItemAnnotation {
            title: &self.name,
            subtitle: &self.location_label,
            coordinate: self.coordinate,
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}
