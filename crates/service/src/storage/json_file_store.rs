use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{
    fs,
    io::AsyncWriteExt,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::timeout,
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::{append_in, remove_in, replace_in, Predicate, RecordStore};
use crate::errors::ServiceError;

/// JSON file-backed collection of records.
///
/// The file holds a single JSON array. Every mutation re-reads the file under
/// the exclusive lock, applies the change and writes the whole array to a
/// temp file that is then renamed over the original, so readers never observe
/// a half-written collection.
pub struct JsonFileStore<R> {
    collection: String,
    file_path: PathBuf,
    lock: RwLock<()>,
    lock_timeout: Duration,
    _record: PhantomData<fn() -> R>,
}

impl<R> JsonFileStore<R>
where
    R: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Open the collection at `path`. Creates the file with an empty array if
    /// missing; an existing file must parse or opening fails.
    pub async fn open<P: Into<PathBuf>>(
        collection: &str,
        path: P,
        lock_timeout: Duration,
    ) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| ServiceError::Io(e.to_string()))?;
            }
        }

        let store = Self {
            collection: collection.to_string(),
            file_path,
            lock: RwLock::new(()),
            lock_timeout,
            _record: PhantomData,
        };

        match fs::metadata(&store.file_path).await {
            Ok(_) => {
                let records = store.read_records().await?;
                debug!(collection = %store.collection, count = records.len(), "collection opened");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                store.write_records(&[]).await?;
                debug!(collection = %store.collection, path = %store.file_path.display(), "collection created");
            }
            Err(e) => return Err(ServiceError::Io(e.to_string())),
        }

        Ok(Arc::new(store))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn read_guard(&self) -> Result<RwLockReadGuard<'_, ()>, ServiceError> {
        timeout(self.lock_timeout, self.lock.read()).await.map_err(|_| {
            warn!(collection = %self.collection, timeout_ms = self.lock_timeout.as_millis() as u64, "read lock timed out");
            ServiceError::ResourceBusy(self.collection.clone())
        })
    }

    async fn write_guard(&self) -> Result<RwLockWriteGuard<'_, ()>, ServiceError> {
        timeout(self.lock_timeout, self.lock.write()).await.map_err(|_| {
            warn!(collection = %self.collection, timeout_ms = self.lock_timeout.as_millis() as u64, "write lock timed out");
            ServiceError::ResourceBusy(self.collection.clone())
        })
    }

    async fn read_records(&self) -> Result<Vec<R>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ServiceError::Io(e.to_string())),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice::<Vec<R>>(&bytes).map_err(|e| {
            error!(collection = %self.collection, path = %self.file_path.display(), err = %e, "collection file is corrupt");
            ServiceError::StorageCorrupt { collection: self.collection.clone(), reason: e.to_string() }
        })
    }

    async fn write_records(&self, records: &[R]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(records).map_err(|e| ServiceError::Io(e.to_string()))?;
        let file_name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.collection.clone());
        let tmp_path = self.file_path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

        let result = async {
            let mut file = fs::File::create(&tmp_path).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&tmp_path, &self.file_path).await
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path).await;
            error!(collection = %self.collection, err = %e, "failed to persist collection");
            return Err(ServiceError::Io(e.to_string()));
        }
        debug!(collection = %self.collection, count = records.len(), "collection persisted");
        Ok(())
    }

    /// Run `f` over the freshly loaded collection while holding the exclusive
    /// lock. The collection is rewritten only when `f` returns `Ok(Some(_))`.
    pub async fn mutate<T, F>(&self, f: F) -> Result<Option<T>, ServiceError>
    where
        T: Send,
        F: FnOnce(&mut Vec<R>) -> Result<Option<T>, ServiceError> + Send,
    {
        let _guard = self.write_guard().await?;
        let mut records = self.read_records().await?;
        let out = f(&mut records)?;
        if out.is_some() {
            self.write_records(&records).await?;
        }
        Ok(out)
    }
}

#[async_trait]
impl<R> RecordStore<R> for JsonFileStore<R>
where
    R: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn load_all(&self) -> Result<Vec<R>, ServiceError> {
        let _guard = self.read_guard().await?;
        self.read_records().await
    }

    async fn save_all(&self, records: Vec<R>) -> Result<(), ServiceError> {
        let _guard = self.write_guard().await?;
        self.write_records(&records).await
    }

    async fn append_unless(&self, record: R, conflict: Predicate<'_, R>) -> Result<R, ServiceError> {
        let _guard = self.write_guard().await?;
        let mut records = self.read_records().await?;
        let appended = append_in(&self.collection, &mut records, record, conflict)?;
        self.write_records(&records).await?;
        Ok(appended)
    }

    async fn replace(
        &self,
        target: Predicate<'_, R>,
        record: R,
        conflict: Predicate<'_, R>,
    ) -> Result<Option<R>, ServiceError> {
        let collection = self.collection.clone();
        self.mutate(move |records| replace_in(&collection, records, target, record, conflict))
            .await
    }

    async fn remove_one(&self, pred: Predicate<'_, R>) -> Result<Option<R>, ServiceError> {
        self.mutate(move |records| Ok(remove_in(records, pred))).await
    }
}
