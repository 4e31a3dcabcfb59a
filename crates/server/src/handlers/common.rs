//! Shared handler helpers.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use time::OffsetDateTime;
use uuid::Uuid;

/// Record a handled request in the caller's history.
///
/// Called after the endpoint's primary action and before the response is
/// returned. Fire-and-forget from the caller's perspective: a failed append
/// is logged, never surfaced.
pub async fn record_request(state: &AppState, user_id: Uuid, endpoint: &str) {
    if let Err(e) = state
        .store
        .append_entry(user_id, endpoint, OffsetDateTime::now_utc())
        .await
    {
        tracing::warn!(
            user_id = %user_id,
            endpoint,
            error = %e,
            "Failed to record request history"
        );
    }
}

/// Hash a password on the blocking pool.
///
/// bcrypt is intentionally slow (~100 ms at the default cost), so it must not
/// run on an async worker thread.
pub async fn hash_password(password: String, cost: u32) -> ApiResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {e}")))
}

/// Verify a password against its stored hash on the blocking pool.
pub async fn verify_password(password: String, password_hash: String) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("failed to verify password: {e}")))
}
