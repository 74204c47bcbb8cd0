//! # System Lifecycle
//!
//! Starts the product actor over the configured storage and shuts it down again.
//!
//! ## Shutdown
//!
//! 1. **Drop all clients**: closes the sender side of the channel. Clones held by a
//!    [`CatalogState`](crate::state::CatalogState) count too.
//! 2. **Actor detects closure**: `receiver.recv()` returns `None` after the queued
//!    requests are served.
//! 3. **Await completion**: [`CatalogSystem::shutdown`] waits for the task.
//!
//! With the `json_file` backend every mutation is already on disk when its request
//! returns, so shutdown has nothing left to flush.

pub mod catalog_system;

pub use catalog_system::*;
