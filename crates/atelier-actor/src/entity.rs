//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a record type implements to be managed by the
//! generic [`ResourceActor`](crate::ResourceActor). It names the DTOs used to create and
//! update the record, the custom actions it understands, the context injected at
//! runtime, and its error type.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.
//! - [`ActorEntity::listing_order`] defaults to "no particular order".

use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by a `ResourceActor`.
///
/// The associated types tie each payload to its entity: a `Product` actor only accepts
/// `ProductCreate`, and the compiler rejects anything else.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await other clients. The `Context` type is
/// handed to `run()` and then passed to every hook ("late binding" of dependencies).
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g., Uuid newtype, u64).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum of record-specific operations that go beyond CRUD.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per entity; it is boxed into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) on the way out.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The primary key of this record. Storage backends index by it.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from a freshly generated ID and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Ordering applied to `list` responses.
    fn listing_order(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the record is first stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload to the record.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom action. Any change made to `self` is persisted by the actor
    /// when the handler returns `Ok`.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
