//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{InMemoryStore, PayrollService};

/// Shared application state.
///
/// Holds the loaded statutory configuration and the payroll service used by
/// the stateful endpoints.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    service: PayrollService,
}

impl AppState {
    /// Creates state with an empty in-memory store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, InMemoryStore::new())
    }

    /// Creates state over the given in-memory store.
    pub fn with_store(config: ConfigLoader, store: InMemoryStore) -> Self {
        let service = PayrollService::in_memory(Arc::new(config.config().clone()), store);
        Self {
            config: Arc::new(config),
            service,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}
