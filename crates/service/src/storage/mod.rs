//! Storage abstractions for service layer
//!
//! A collection is an ordered list of records of one type. Every mutation is a
//! whole-collection read-modify-write; lookups are linear scans in list order.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod json_file_store;
pub mod memory;

pub use json_file_store::JsonFileStore;
pub use memory::MemoryStore;

/// Record matcher used by lookups and mutations.
pub type Predicate<'a, R> = &'a (dyn Fn(&R) -> bool + Send + Sync);

/// Whole-collection persistence for one record type.
///
/// Reads may run concurrently with each other; a mutation holds the collection
/// exclusively from the read until the write has landed.
#[async_trait]
pub trait RecordStore<R>: Send + Sync
where
    R: Clone + Send + Sync + 'static,
{
    /// Name used in logs and error messages, e.g. `users`.
    fn collection(&self) -> &str;

    /// Every record, in insertion order.
    async fn load_all(&self) -> Result<Vec<R>, ServiceError>;

    /// Replace the whole collection.
    async fn save_all(&self, records: Vec<R>) -> Result<(), ServiceError>;

    /// First record matching `pred`.
    async fn find_one(&self, pred: Predicate<'_, R>) -> Result<Option<R>, ServiceError> {
        Ok(self.load_all().await?.into_iter().find(|r| pred(r)))
    }

    /// Append `record` unless an existing record matches `conflict`.
    async fn append_unless(&self, record: R, conflict: Predicate<'_, R>) -> Result<R, ServiceError>;

    /// Append `record` unconditionally.
    async fn append(&self, record: R) -> Result<R, ServiceError> {
        self.append_unless(record, &|_: &R| false).await
    }

    /// Replace the first record matching `target`. Fails with `Conflict` when any
    /// other record matches `conflict`. `None` when nothing matched `target`.
    async fn replace(
        &self,
        target: Predicate<'_, R>,
        record: R,
        conflict: Predicate<'_, R>,
    ) -> Result<Option<R>, ServiceError>;

    /// Remove and return the first record matching `pred`.
    async fn remove_one(&self, pred: Predicate<'_, R>) -> Result<Option<R>, ServiceError>;
}

pub(crate) fn append_in<R: Clone>(
    collection: &str,
    records: &mut Vec<R>,
    record: R,
    conflict: Predicate<'_, R>,
) -> Result<R, ServiceError> {
    if records.iter().any(|r| conflict(r)) {
        return Err(ServiceError::Conflict(format!("{collection}: record already exists")));
    }
    records.push(record.clone());
    Ok(record)
}

pub(crate) fn replace_in<R: Clone>(
    collection: &str,
    records: &mut [R],
    target: Predicate<'_, R>,
    record: R,
    conflict: Predicate<'_, R>,
) -> Result<Option<R>, ServiceError> {
    let Some(idx) = records.iter().position(|r| target(r)) else {
        return Ok(None);
    };
    if records.iter().enumerate().any(|(i, r)| i != idx && conflict(r)) {
        return Err(ServiceError::Conflict(format!("{collection}: record already exists")));
    }
    records[idx] = record.clone();
    Ok(Some(record))
}

pub(crate) fn remove_in<R>(records: &mut Vec<R>, pred: Predicate<'_, R>) -> Option<R> {
    let idx = records.iter().position(|r| pred(r))?;
    Some(records.remove(idx))
}
