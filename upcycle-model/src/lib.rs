//! Listing entity model for the UpcycleBuddy sync core.
//!
//! Defines the types the persistence protocol and collection sync operate on:
//! - [`Item`] — one listing plus its transient image payload
//! - [`ItemRecord`] — the persisted-record shape written to the document store
//! - [`PersistenceStatus`] — how far an item has progressed through saving
//! - [`ItemAnnotation`] — read-only display projection for map-style consumers
//! - [`PlaceSelection`] — a `(name, coordinate)` pair from a place lookup
//!
//! The binary payload never appears in an [`ItemRecord`]; only its blob name does.

mod annotation;
mod item;
mod record;

pub use annotation::ItemAnnotation;
pub use item::{Item, PersistenceStatus, PlaceSelection, UNNAMED_PLACE};
pub use record::ItemRecord;
