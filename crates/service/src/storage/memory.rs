use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{append_in, remove_in, replace_in, Predicate, RecordStore};
use crate::errors::ServiceError;

/// In-memory collection for tests and doc examples. Same ordering and
/// conflict semantics as the file store, nothing is persisted.
pub struct MemoryStore<R> {
    collection: String,
    records: RwLock<Vec<R>>,
}

impl<R> MemoryStore<R> {
    pub fn new(collection: &str) -> Self {
        Self::with_records(collection, Vec::new())
    }

    pub fn with_records(collection: &str, records: Vec<R>) -> Self {
        Self { collection: collection.to_string(), records: RwLock::new(records) }
    }
}

#[async_trait]
impl<R> RecordStore<R> for MemoryStore<R>
where
    R: Clone + Send + Sync + 'static,
{
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn load_all(&self) -> Result<Vec<R>, ServiceError> {
        Ok(self.records.read().await.clone())
    }

    async fn save_all(&self, records: Vec<R>) -> Result<(), ServiceError> {
        *self.records.write().await = records;
        Ok(())
    }

    async fn append_unless(&self, record: R, conflict: Predicate<'_, R>) -> Result<R, ServiceError> {
        let mut records = self.records.write().await;
        append_in(&self.collection, &mut records, record, conflict)
    }

    async fn replace(
        &self,
        target: Predicate<'_, R>,
        record: R,
        conflict: Predicate<'_, R>,
    ) -> Result<Option<R>, ServiceError> {
        let mut records = self.records.write().await;
        replace_in(&self.collection, &mut records, target, record, conflict)
    }

    async fn remove_one(&self, pred: Predicate<'_, R>) -> Result<Option<R>, ServiceError> {
        let mut records = self.records.write().await;
        Ok(remove_in(&mut records, pred))
    }
}
