use super::Storage;
use crate::entity::ActorEntity;
use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;

/// In-memory backend keyed by record ID.
pub struct MemoryStorage<T: ActorEntity> {
    records: HashMap<T::Id, T>,
}

impl<T: ActorEntity> MemoryStorage<T> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<T: ActorEntity> Default for MemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: ActorEntity> Storage<T> for MemoryStorage<T> {
    async fn insert(&mut self, item: T) -> Result<(), StorageError> {
        let id = item.id().clone();
        if self.records.contains_key(&id) {
            return Err(StorageError::Conflict(id.to_string()));
        }
        self.records.insert(id, item);
        Ok(())
    }

    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, StorageError> {
        Ok(self.records.get(id).cloned())
    }

    async fn replace(&mut self, item: T) -> Result<(), StorageError> {
        match self.records.get_mut(item.id()) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => Err(StorageError::Missing(item.id().to_string())),
        }
    }

    async fn remove(&mut self, id: &T::Id) -> Result<bool, StorageError> {
        Ok(self.records.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.records.values().cloned().collect())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
