//! HTTP adapter for redeemd
//!
//! Thin translation layer between the transport and the authorization gate:
//! it extracts the gate's inputs from a request, renders the verdict as a
//! plain-text response, and on `Authorized` streams the file bytes in
//! fixed-size chunks. All decision logic lives in `redeemd-gate`.

mod config;
mod handler;
mod response;
mod stream;

pub use config::ServerConfig;
pub use handler::{router, AppState};

use redeemd_core::Result;
use redeemd_gate::{AuthorizationGate, FsResolver, SharedSecretVerifier};
use redeemd_store::FileStore;
use std::sync::Arc;
use tracing::info;

/// Wire up the store, resolver, and gate from a validated config and serve
/// until the process is stopped. Store-open and bind failures are fatal.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let config = config.validate()?;

    let store = Arc::new(FileStore::open(&config.store)?);
    let resolver = Arc::new(FsResolver::new(&config.root).map_err(|e| {
        redeemd_core::Error::file_system(&config.root, "open serving root", e)
    })?);
    let admin = Arc::new(SharedSecretVerifier::new(config.admin_key.clone()));

    let gate = AuthorizationGate::new(store, resolver, admin);
    let app = router(AppState::new(gate));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .map_err(|e| {
            redeemd_core::Error::configuration(format!(
                "failed to bind {}: {e}",
                config.listen
            ))
        })?;

    info!(
        listen = %config.listen,
        root = %config.root.display(),
        store = %config.store.display(),
        "redeemd serving"
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| redeemd_core::Error::configuration(format!("server error: {e}")))?;

    Ok(())
}
