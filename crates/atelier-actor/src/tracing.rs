//! # Observability
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! The actor run loop emits one event per request, carrying `entity_type` and the record
//! `id` as structured fields; clients add an `#[instrument]` span per call. With
//! `RUST_LOG=debug` the request payloads are logged once, at the actor:
//!
//! ```text
//! DEBUG Create entity_type="Product" params=ProductCreate { title: "Lino dress", .. }
//!  INFO Created entity_type="Product" id=4f1c… size=1
//! DEBUG Action entity_type="Product" id=4f1c… action=AddImage(..)
//!  INFO Action ok entity_type="Product" id=4f1c…
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes compact, structured logging.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"info"` or
/// `"atelier=debug"`) is used. Calling this twice is harmless: the second
/// subscriber is simply not installed.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
