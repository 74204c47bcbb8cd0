//! # Atelier
//!
//! Product costing catalog for a small apparel workshop: each product carries a cost
//! breakdown, a suggested price derived from it, and an image gallery.
//!
//! ## Modules
//!
//! - **[pricing]**: the pricing engine, a pure function from [`ProductCosts`](model::ProductCosts)
//!   to [`ProductTotals`](model::ProductTotals).
//! - **[model]**: serde data types ([`Product`](model::Product), gallery, costs).
//! - **[product_actor]**: the product repository, a resource actor built on
//!   [`atelier_actor`].
//! - **[clients]**: [`ProductClient`](clients::ProductClient), the typed API callers use.
//! - **[state]**: [`CatalogState`](state::CatalogState), a cached view for front ends.
//! - **[stats]**: catalog totals.
//! - **[settings]** and **[lifecycle]**: configuration and startup/shutdown.
//!
//! ## Testing
//!
//! See [`atelier_actor::mock`] for utilities to test clients without spawning an actor.

pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod pricing;
pub mod product_actor;
pub mod settings;
pub mod state;
pub mod stats;
