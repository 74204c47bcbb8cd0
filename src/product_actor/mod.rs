//! # Product Actor
//!
//! The product repository: a [`ResourceActor`] that owns every [`Product`] and serves
//! CRUD plus the gallery [`ProductAction`]s.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](atelier_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for gallery editing
//! - [`new()`] / [`with_storage()`] - factories returning the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use atelier::clients::ProductClient;
//! use atelier::model::{NewImage, ProductCreate};
//! use atelier::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_product(ProductCreate {
//!             title: "Canvas tote".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     client.add_image(id, NewImage::new("https://example.com/tote.jpg")).await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::{Product, ProductId};
use atelier_actor::{ResourceActor, ResourceClient, Storage};

/// Creates an in-memory Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size, ProductId::generate)
}

/// Creates a Product actor over the given storage backend.
pub fn with_storage(
    buffer_size: usize,
    storage: impl Storage<Product> + 'static,
) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::with_storage(buffer_size, storage, ProductId::generate)
}
