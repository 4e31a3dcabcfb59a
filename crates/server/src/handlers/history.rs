//! Request history endpoints.

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::handlers::common::record_request;
use crate::state::AppState;
use axum::extract::{Extension, State};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;

/// A single history entry as returned to the client.
#[derive(Debug, Serialize)]
pub struct HistoryEntryResponse {
    pub id: i64,
    pub endpoint: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Confirmation message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /requests_history - List the caller's history, newest first.
///
/// The listing is read before this call records itself, so a call never
/// appears in its own result; it shows up in the next one.
pub async fn list_history(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<HistoryEntryResponse>>> {
    let entries = state.store.list_entries(user.user_id).await?;
    let entries = entries
        .into_iter()
        .map(|e| HistoryEntryResponse {
            id: e.entry_id,
            endpoint: e.endpoint,
            timestamp: e.created_at,
        })
        .collect();

    record_request(&state, user.user_id, "GET /requests_history").await;

    Ok(Json(entries))
}

/// DELETE /requests_history - Delete all of the caller's history entries.
///
/// The deletion itself is recorded afterwards, so it becomes the sole
/// surviving entry.
pub async fn clear_history(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<MessageResponse>> {
    let removed = state.store.clear_entries(user.user_id).await?;
    tracing::debug!(user_id = %user.user_id, removed, "Request history cleared");

    record_request(&state, user.user_id, "DELETE /requests_history").await;

    Ok(Json(MessageResponse {
        message: "Request history deleted".to_string(),
    }))
}
