//! # Observability & Tracing
//!
//! Structured logging for repositories and the code built on them.
//!
//! The subscriber uses the compact format and hides the module prefix
//! (`with_target(false)`); actor log lines carry an `entity_type` field
//! instead, so the short form still says which collection spoke.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Repository started` and `Shutdown` with the final size
//! - **Writes** (`info`): `Inserted`, `Updated`, `Deleted` with the entity id
//! - **Reads** (`debug`): `FindById`, `FindAll`, `FindFirst`, `Search` with the params
//! - **Failures** (`warn`): update/delete of a missing id
//!
//! ```bash
//! RUST_LOG=info cargo run -p users-sample
//! RUST_LOG=repository_framework=debug cargo run -p users-sample
//! ```
//!
//! With `RUST_LOG=debug` a signup looks like:
//!
//! ```text
//! DEBUG signup: Signup called email="ada@example.com"
//! DEBUG signup:find_first: Sending request
//! DEBUG FindFirst entity_type="UserEntity" found=false
//! DEBUG signup:insert: Sending request id="6f0c..."
//! INFO Inserted entity_type="UserEntity" id="6f0c..." size=1
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, filtered by `RUST_LOG`.
///
/// Does nothing when a subscriber is already installed, so tests may call it
/// repeatedly.
pub fn setup_tracing() {
    install(EnvFilter::from_default_env());
}

/// Like [`setup_tracing`], but `RUST_LOG` falls back to `default_filter`
/// (e.g. `"info"` from configuration) when unset.
pub fn setup_tracing_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    install(filter);
}

fn install(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
