//! HTTP API server for the sortstash array service.
//!
//! This crate provides the service's HTTP surface:
//! - User registration, login, and password changes with bearer-token sessions
//! - Per-user integer-array storage (create, patch, fetch)
//! - The Shell sort operation over the stored array
//! - Per-user request history (list, clear)

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::CurrentUser;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
