//! Service trait for record persistence

use crate::core::entity::Entity;
use crate::core::error::BookshelfResult;
use async_trait::async_trait;

/// Predicate over stored records, used by bulk deletes
pub type RecordFilter<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Service trait for managing one entity type
///
/// Implementations provide atomic single-record writes: a create or update
/// either fully succeeds or leaves the store untouched, and unique keys are
/// checked under the same lock as the write. Nothing here coordinates writes
/// across several records.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Persist a new record, assigning it an id
    async fn create(&self, entity: T) -> BookshelfResult<T>;

    /// Get a record by id
    async fn get(&self, id: u64) -> BookshelfResult<Option<T>>;

    /// List all records, in id order
    async fn list(&self) -> BookshelfResult<Vec<T>>;

    /// Replace an existing record
    async fn update(&self, entity: T) -> BookshelfResult<T>;

    /// Delete a record, returning it if it existed
    async fn delete(&self, id: u64) -> BookshelfResult<Option<T>>;

    /// Delete every record matching the filter, returning how many went
    async fn delete_where(&self, filter: RecordFilter<'_, T>) -> BookshelfResult<usize>;
}
