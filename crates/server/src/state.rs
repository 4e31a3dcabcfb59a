//! Application state shared across handlers.

use sortstash_core::config::AppConfig;
use sortstash_store::DataStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Data store.
    pub store: Arc<dyn DataStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Panics
    ///
    /// Panics if the auth configuration is invalid (out-of-range bcrypt
    /// cost); startup is the right place to fail fast on that.
    pub fn new(config: AppConfig, store: Arc<dyn DataStore>) -> Self {
        if let Err(error) = config.auth.validate() {
            panic!("Invalid auth configuration: {error}");
        }

        Self {
            config: Arc::new(config),
            store,
        }
    }
}
