//! # Generic Actor Server
//!
//! `ResourceActor` is the server half of the framework. It owns the receiver end of the
//! channel and a [`Storage`] backend, and processes requests one at a time. Because the
//! run loop is the only code that ever touches the backend, no `Mutex` or `RwLock` is
//! needed and read-modify-write requests cannot interleave.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::storage::{MemoryStorage, Storage};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` (in-memory) or `ResourceActor::with_storage()`
///    returns the actor and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(32, ProductId::generate);
/// tokio::spawn(actor.run(()));
/// let id = client.create(params).await?;
/// ```
///
/// # Operations
///
/// * **Create**: generate an ID, build the record, run `on_create`, insert into storage.
/// * **Get**: fetch a clone from storage.
/// * **List**: fetch every record and sort with `listing_order`.
/// * **Update**: fetch, run `on_update` on the copy, replace in storage, return the copy.
/// * **Delete**: fetch, run `on_delete`, remove from storage.
/// * **Action**: fetch, run `handle_action` on the copy, replace in storage, return the result.
///
/// Hooks always run on a copy; the stored record only changes once storage accepts the
/// new version, so a failed hook or failed write leaves state untouched.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    storage: Box<dyn Storage<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an actor backed by [`MemoryStorage`].
    ///
    /// * `buffer_size` - capacity of the MPSC channel; callers wait when it is full.
    /// * `next_id_fn` - produces the ID of every newly created record.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        Self::with_storage(buffer_size, MemoryStorage::new(), next_id_fn)
    }

    /// Creates an actor backed by the given storage.
    pub fn with_storage(
        buffer_size: usize,
        storage: impl Storage<T> + 'static,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            storage: Box::new(storage),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook, so dependencies created after the actor
    /// can still be wired in before the loop starts.
    pub async fn run(mut self, context: T::Context) {
        // "Product" rather than "atelier::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.storage.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();
                    let result = self.create(id, params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.storage.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let result = self.storage.fetch(&id).await.map_err(FrameworkError::from);
                    match &result {
                        Ok(item) => debug!(entity_type, %id, found = item.is_some(), "Get"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Get failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { respond_to } => {
                    let result = self.storage.list().await.map_err(FrameworkError::from);
                    let result = result.map(|mut items| {
                        items.sort_by(|a, b| a.listing_order(b));
                        items
                    });
                    match &result {
                        Ok(items) => debug!(entity_type, count = items.len(), "List"),
                        Err(e) => warn!(entity_type, error = %e, "List failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.storage.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.storage.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        item.on_create(context).await.map_err(entity_error)?;
        self.storage.insert(item).await?;
        Ok(id)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut item = self.load(id).await?;
        item.on_update(update, context).await.map_err(entity_error)?;
        self.storage.replace(item.clone()).await?;
        Ok(item)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let item = self.load(id).await?;
        item.on_delete(context).await.map_err(entity_error)?;
        self.storage.remove(id).await?;
        Ok(())
    }

    async fn action(
        &mut self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut item = self.load(id).await?;
        let result = item
            .handle_action(action, context)
            .await
            .map_err(entity_error)?;
        self.storage.replace(item).await?;
        Ok(result)
    }

    async fn load(&self, id: &T::Id) -> Result<T, FrameworkError> {
        self.storage
            .fetch(id)
            .await?
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}
