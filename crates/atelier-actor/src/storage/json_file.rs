use super::Storage;
use crate::entity::ActorEntity;
use crate::error::StorageError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File-backed backend: all records are kept in memory and mirrored to a single JSON
/// array on disk.
///
/// Every mutation rewrites the whole document through a temporary sibling file that is
/// then renamed over the original, so a crash mid-write leaves the previous snapshot
/// intact. If the write fails, the in-memory copy is rolled back.
pub struct JsonFileStorage<T: ActorEntity> {
    path: PathBuf,
    records: HashMap<T::Id, T>,
}

impl<T> JsonFileStorage<T>
where
    T: ActorEntity + Serialize + DeserializeOwned,
{
    /// Opens (or lazily creates) the store at `path`. A missing or empty file is an
    /// empty store; the file is only written on the first mutation.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => {
                let rows: Vec<T> = serde_json::from_slice(&bytes)?;
                rows.into_iter().map(|row| (row.id().clone(), row)).collect()
            }
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), records = records.len(), "JSON store opened");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self) -> Result<(), StorageError> {
        let bytes = {
            let mut rows: Vec<&T> = self.records.values().collect();
            rows.sort_by_key(|row| row.id().to_string());
            serde_json::to_vec_pretty(&rows)?
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, &bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl<T> Storage<T> for JsonFileStorage<T>
where
    T: ActorEntity + Serialize + DeserializeOwned,
{
    async fn insert(&mut self, item: T) -> Result<(), StorageError> {
        let id = item.id().clone();
        if self.records.contains_key(&id) {
            return Err(StorageError::Conflict(id.to_string()));
        }
        self.records.insert(id.clone(), item);
        if let Err(e) = self.flush().await {
            warn!(%id, error = %e, "insert not persisted, rolling back");
            self.records.remove(&id);
            return Err(e);
        }
        Ok(())
    }

    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, StorageError> {
        Ok(self.records.get(id).cloned())
    }

    async fn replace(&mut self, item: T) -> Result<(), StorageError> {
        let id = item.id().clone();
        let previous = match self.records.get_mut(&id) {
            Some(slot) => std::mem::replace(slot, item),
            None => return Err(StorageError::Missing(id.to_string())),
        };
        if let Err(e) = self.flush().await {
            warn!(%id, error = %e, "replace not persisted, rolling back");
            self.records.insert(id, previous);
            return Err(e);
        }
        Ok(())
    }

    async fn remove(&mut self, id: &T::Id) -> Result<bool, StorageError> {
        let Some(previous) = self.records.remove(id) else {
            return Ok(false);
        };
        if let Err(e) = self.flush().await {
            warn!(%id, error = %e, "remove not persisted, rolling back");
            self.records.insert(id.clone(), previous);
            return Err(e);
        }
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.records.values().cloned().collect())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
