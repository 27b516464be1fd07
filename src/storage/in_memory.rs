//! In-memory implementation of DataService for development and tests

use crate::core::entity::Entity;
use crate::core::error::{BookshelfError, BookshelfResult, StorageError};
use crate::core::service::{DataService, RecordFilter};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory data service
///
/// Records live in a `BTreeMap` keyed by id behind a `RwLock`; ids come from
/// a monotonically increasing sequence starting at 1 and are never reused.
#[derive(Clone)]
pub struct InMemoryDataService<T: Entity> {
    records: Arc<RwLock<BTreeMap<u64, T>>>,
    sequence: Arc<AtomicU64>,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create an empty service
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            sequence: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Find a unique key of `candidate` already held by another record
    fn conflicting_key(records: &BTreeMap<u64, T>, candidate: &T) -> Option<&'static str> {
        let keys = candidate.unique_keys();
        records
            .values()
            .filter(|existing| existing.id() != candidate.id())
            .find_map(|existing| {
                existing
                    .unique_keys()
                    .into_iter()
                    .zip(keys.iter())
                    .find(|((_, held), (_, wanted))| held.is_some() && held == wanted)
                    .map(|((field, _), _)| field)
            })
    }

    fn unique_violation(field: &str) -> BookshelfError {
        StorageError::UniqueViolation {
            entity_type: T::resource_name_singular().to_string(),
            field: field.to_string(),
        }
        .into()
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> BookshelfError {
    StorageError::Unavailable {
        message: format!("Failed to acquire lock: {}", e),
    }
    .into()
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, mut entity: T) -> BookshelfResult<T> {
        let mut records = self.records.write().map_err(poisoned)?;

        entity.assign_id(0);
        if let Some(field) = Self::conflicting_key(&records, &entity) {
            return Err(Self::unique_violation(field));
        }

        let id = self.sequence.fetch_add(1, Ordering::SeqCst);
        entity.assign_id(id);
        records.insert(id, entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: u64) -> BookshelfResult<Option<T>> {
        let records = self.records.read().map_err(poisoned)?;

        Ok(records.get(&id).cloned())
    }

    async fn list(&self) -> BookshelfResult<Vec<T>> {
        let records = self.records.read().map_err(poisoned)?;

        Ok(records.values().cloned().collect())
    }

    async fn update(&self, entity: T) -> BookshelfResult<T> {
        let mut records = self.records.write().map_err(poisoned)?;

        if !records.contains_key(&entity.id()) {
            return Err(BookshelfError::not_found(
                T::resource_name_singular(),
                entity.id(),
            ));
        }
        if let Some(field) = Self::conflicting_key(&records, &entity) {
            return Err(Self::unique_violation(field));
        }

        records.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: u64) -> BookshelfResult<Option<T>> {
        let mut records = self.records.write().map_err(poisoned)?;

        Ok(records.remove(&id))
    }

    async fn delete_where(&self, filter: RecordFilter<'_, T>) -> BookshelfResult<usize> {
        let mut records = self.records.write().map_err(poisoned)?;

        let before = records.len();
        records.retain(|_, record| !filter(record));

        Ok(before - records.len())
    }
}
