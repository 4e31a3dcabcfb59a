//! Server test utilities.

use sortstash_core::config::{AppConfig, StoreConfig};
use sortstash_server::{create_router, AppState};
use sortstash_store::{DataStore, SqliteStore};
use std::sync::Arc;
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server backed by a temporary SQLite database.
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("sortstash.db");

        let store: Arc<dyn DataStore> = Arc::new(
            SqliteStore::new(&db_path)
                .await
                .expect("Failed to create data store"),
        );

        // Test config uses the minimum bcrypt cost so account endpoints stay fast.
        let mut config = AppConfig::for_testing();
        config.store = StoreConfig::Sqlite { path: db_path };

        let state = AppState::new(config, store);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying store.
    pub fn store(&self) -> Arc<dyn DataStore> {
        self.state.store.clone()
    }
}
