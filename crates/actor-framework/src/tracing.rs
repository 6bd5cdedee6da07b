//! # Observability
//!
//! Every actor logs through `tracing` with structured fields: `entity_type` and `id` on each
//! request, `size` on create/delete and shutdown. [`setup_tracing`] installs the subscriber.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle only: actor start/stop, orders started, ready, paid
//! RUST_LOG=debug cargo run    # plus every request payload and every cooked unit
//! RUST_LOG=kitchen_engine::order_actor=debug cargo run
//! ```
//!
//! The compact formatter prints spans inline (`order_processing:add_dish: ...`) and hides the
//! module path; the `entity_type` field already says which actor is talking.

/// Initializes the global tracing subscriber, filtered by `RUST_LOG`.
///
/// Call once per process. Falls back to `info` when `RUST_LOG` is unset.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
