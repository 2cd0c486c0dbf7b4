//! Application state with a shared `PlaygroundService`.
//!
//! [`AppState`] wraps the service in `Arc<tokio::sync::Mutex<>>` for use with
//! axum handlers. Handlers await the lock instead of blocking the runtime,
//! and holding it across a store write keeps saves and clears strictly
//! one at a time.

use std::sync::Arc;

use timetravel_core::DraftPolicy;
use timetravel_storage::{InMemoryStore, SqliteStore};

use crate::config::ServerConfig;
use crate::service::{DynStore, PlaygroundService};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The shared playground session.
    pub service: Arc<tokio::sync::Mutex<PlaygroundService>>,
}

impl AppState {
    /// Creates a session backed by the SQLite database in `config`.
    pub fn new(config: &ServerConfig) -> Self {
        let store = SqliteStore::new(&config.db_path, config.store.clone());
        Self::with_store(Box::new(store), config.edit_policy)
    }

    /// Creates a session over a fresh in-memory store (for testing).
    pub fn in_memory() -> Self {
        Self::with_store(Box::new(InMemoryStore::new()), DraftPolicy::default())
    }

    /// Creates a session over `store` and loads it.
    ///
    /// A store that fails to load is logged and leaves the session not
    /// ready; `POST /playground/reload` retries.
    pub fn with_store(store: DynStore, policy: DraftPolicy) -> Self {
        let mut service = PlaygroundService::new(store, policy);
        if let Err(e) = service.initialize() {
            tracing::error!(error = %e, "snapshot store failed to load; saving is disabled");
        }
        AppState {
            service: Arc::new(tokio::sync::Mutex::new(service)),
        }
    }
}
