//! Typed clients over the generic [`ResourceClient`](atelier_actor::ResourceClient).

pub mod product_client;

pub use atelier_actor::ActorClient;
pub use product_client::*;
