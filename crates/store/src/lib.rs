//! Persistence layer for the sortstash array service.
//!
//! This crate provides the service's data model behind repository traits:
//! - User accounts with password hashes and the current session-token hash
//! - One stored integer sequence per user
//! - The append-only per-user request history

pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{DataStore, SqliteStore};

use sortstash_core::config::StoreConfig;
use std::sync::Arc;

/// Create a data store from configuration.
pub async fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn DataStore>> {
    match config {
        StoreConfig::Sqlite { path } => {
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn DataStore>)
        }
    }
}
