//! # Storage Backends
//!
//! A `ResourceActor` keeps no state of its own beyond the channel; records live in a
//! [`Storage`] backend that the actor owns exclusively. Because only the actor task
//! touches the backend, implementations need no locking.
//!
//! - [`MemoryStorage`]: a `HashMap`, lost on shutdown.
//! - [`JsonFileStorage`]: every record in one JSON document, rewritten on each change.
//!
//! A failed write must leave the backend exactly as it was before the call.

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::entity::ActorEntity;
use crate::error::StorageError;
use async_trait::async_trait;

/// Persistence boundary for one record type.
#[async_trait]
pub trait Storage<T: ActorEntity>: Send + Sync {
    /// Stores a new record. Fails with [`StorageError::Conflict`] if the ID is taken.
    async fn insert(&mut self, item: T) -> Result<(), StorageError>;

    /// Fetches a record by ID.
    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, StorageError>;

    /// Overwrites an existing record. Fails with [`StorageError::Missing`] if absent.
    async fn replace(&mut self, item: T) -> Result<(), StorageError>;

    /// Removes a record, returning whether it existed.
    async fn remove(&mut self, id: &T::Id) -> Result<bool, StorageError>;

    /// Every stored record, in no particular order.
    async fn list(&self) -> Result<Vec<T>, StorageError>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
