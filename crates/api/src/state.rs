use std::sync::Arc;

use pagelock_core::host::LockHost;
use pagelock_db::lock_store::LockStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc` or a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pagelock_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Host CMS collaborator (field registry and page tree).
    pub host: Arc<dyn LockHost>,
}

impl AppState {
    /// A fresh lock store for the current request. Its cache lives and dies
    /// with the request.
    pub fn lock_store(&self) -> LockStore {
        LockStore::new(self.pool.clone(), Arc::clone(&self.host))
    }
}
