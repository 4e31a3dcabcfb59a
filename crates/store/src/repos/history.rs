//! Request history repository.

use crate::error::StoreResult;
use crate::models::HistoryRow;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

/// Repository for the append-only per-user request history.
#[async_trait]
pub trait HistoryRepo: Send + Sync {
    /// Append an entry for a handled request.
    async fn append_entry(
        &self,
        user_id: Uuid,
        endpoint: &str,
        created_at: OffsetDateTime,
    ) -> StoreResult<()>;

    /// List the user's entries, newest first (timestamp descending, entry id
    /// descending as tie-break).
    async fn list_entries(&self, user_id: Uuid) -> StoreResult<Vec<HistoryRow>>;

    /// Delete all of the user's entries, returning how many were removed.
    async fn clear_entries(&self, user_id: Uuid) -> StoreResult<u64>;
}
