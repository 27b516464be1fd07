//! Entity trait defining the core abstraction for all stored records

use chrono::{DateTime, Utc};

/// Base trait for every record kept by a data service.
///
/// All entities have:
/// - id: numeric identifier assigned by the store on creation
/// - created_at: creation timestamp, used for stable ordering
/// - unique keys: field values that no two records may share
pub trait Entity: Clone + Send + Sync + 'static {
    /// The resource name used in error messages (e.g., "book", "author")
    fn resource_name_singular() -> &'static str;

    /// Get the identifier of this record (0 until the store assigns one)
    fn id(&self) -> u64;

    /// Set the identifier; called by the store on creation
    fn assign_id(&mut self, id: u64);

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Values of the fields that must be unique across all records of this type.
    ///
    /// `None` values are skipped, so optional unique fields (an absent ISBN)
    /// never collide.
    fn unique_keys(&self) -> Vec<(&'static str, Option<String>)> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Shelf {
        id: u64,
        label: Option<String>,
        created_at: DateTime<Utc>,
    }

    impl Entity for Shelf {
        fn resource_name_singular() -> &'static str {
            "shelf"
        }

        fn id(&self) -> u64 {
            self.id
        }

        fn assign_id(&mut self, id: u64) {
            self.id = id;
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn unique_keys(&self) -> Vec<(&'static str, Option<String>)> {
            vec![("label", self.label.clone())]
        }
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(Shelf::resource_name_singular(), "shelf");
    }

    #[test]
    fn test_assign_id() {
        let mut shelf = Shelf {
            id: 0,
            label: None,
            created_at: Utc::now(),
        };
        shelf.assign_id(3);
        assert_eq!(shelf.id(), 3);
        assert_eq!(shelf.unique_keys(), vec![("label", None)]);
    }
}
