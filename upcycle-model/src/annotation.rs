use upcycle_types::Coordinate;

/// Read-only view of an [`Item`](crate::Item) for map pins and list rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemAnnotation<'a> {
    /// The listing name.
    pub title: &'a str,
    /// The human-readable place label.
    pub subtitle: &'a str,
    pub coordinate: Coordinate,
}
