//! # Atelier Actor
//!
//! A small **resource actor** toolkit: one Tokio task owns a collection of records and
//! serves Create / Get / List / Update / Delete requests plus record-specific
//! **Actions** over a channel. Callers hold a cheap, cloneable [`ResourceClient`].
//!
//! ## Why an actor?
//!
//! - **No interleaving**: requests are processed one at a time, so a read-modify-write
//!   action (for example "append an image to this product's gallery") is atomic with
//!   respect to every other caller without any lock.
//! - **One writer**: only the actor touches the [`Storage`] backend, which keeps
//!   backends trivial.
//! - **Uniform API**: the run loop is written once and works for every
//!   [`ActorEntity`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): domain record, its DTOs and hooks.
//! 2. **Runtime** ([`ResourceActor`]): message loop, ID generation, persistence.
//! 3. **Storage** ([`storage`]): [`MemoryStorage`] or [`JsonFileStorage`].
//! 4. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async calls.
//!
//! ## Example
//!
//! ```rust
//! use atelier_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! #[derive(Clone, Debug)]
//! struct Spool {
//!     id: u32,
//!     thread: String,
//! }
//!
//! #[derive(Debug)]
//! struct SpoolCreate {
//!     thread: String,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("spool error")]
//! struct SpoolError;
//!
//! #[async_trait]
//! impl ActorEntity for Spool {
//!     type Id = u32;
//!     type Create = SpoolCreate;
//!     type Update = String;
//!     type Action = ();
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = SpoolError;
//!
//!     fn id(&self) -> &u32 {
//!         &self.id
//!     }
//!
//!     fn from_create_params(id: u32, params: SpoolCreate) -> Result<Self, SpoolError> {
//!         Ok(Self { id, thread: params.thread })
//!     }
//!
//!     async fn on_update(&mut self, thread: String, _: &()) -> Result<(), SpoolError> {
//!         self.thread = thread;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), SpoolError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let counter = AtomicU32::new(1);
//!     let (actor, client) =
//!         ResourceActor::<Spool>::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(SpoolCreate { thread: "cotton".into() }).await.unwrap();
//!     let spool = client.update(id, "silk".into()).await.unwrap();
//!     assert_eq!(spool.thread, "silk");
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run(context)` rather than `new()`, so actors that need
//! each other's clients can all be constructed first and wired afterwards.
//!
//! ## Testing
//!
//! The [`mock`] module provides clients whose requests are answered by the test itself.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod storage;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::{FrameworkError, StorageError};
pub use message::{ResourceRequest, Response};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
