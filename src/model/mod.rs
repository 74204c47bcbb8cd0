//! Catalog data types: products, their costs, derived totals and image galleries.
//!
//! These are plain serde structs; [`Product`] additionally implements
//! [`ActorEntity`](atelier_actor::ActorEntity) in [`crate::product_actor`].

pub mod costs;
pub mod gallery;
pub mod product;
pub mod validation;

pub use costs::*;
pub use gallery::*;
pub use product::*;
pub use validation::*;
