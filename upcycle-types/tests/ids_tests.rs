use upcycle_types::{BlobRef, ItemId, PrincipalId};

// ── ItemId ──────────────────────────────────────────────────────

#[test]
fn item_id_rejects_empty() {
    assert!(ItemId::parse("").is_err());
}

#[test]
fn item_id_roundtrips_display_and_parse() {
    let id = ItemId::parse("abc123").unwrap();
    assert_eq!(id.to_string(), "abc123");
    assert_eq!("abc123".parse::<ItemId>().unwrap(), id);
    assert_eq!(id.as_str(), "abc123");
}

#[test]
fn item_id_serializes_as_plain_string() {
    let id = ItemId::parse("doc-9").unwrap();
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"doc-9\"");
}

// ── BlobRef ─────────────────────────────────────────────────────

#[test]
fn generated_blob_refs_are_unique() {
    let a = BlobRef::generate();
    let b = BlobRef::generate();
    assert_ne!(a, b);
}

#[test]
fn generated_blob_ref_is_uppercase_uuid() {
    let r = BlobRef::generate();
    assert_eq!(r.as_str().len(), 36);
    assert_eq!(r.as_str(), r.as_str().to_uppercase());
    assert!(uuid::Uuid::parse_str(r.as_str()).is_ok());
}

#[test]
fn blob_ref_rejects_empty() {
    assert!(BlobRef::parse("").is_err());
    assert!("".parse::<BlobRef>().is_err());
}

// ── PrincipalId ─────────────────────────────────────────────────

#[test]
fn principal_id_parse() {
    let p = PrincipalId::parse("uid-1").unwrap();
    assert_eq!(p.as_str(), "uid-1");
    assert!(PrincipalId::parse("").is_err());
}
