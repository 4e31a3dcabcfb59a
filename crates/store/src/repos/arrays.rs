//! Per-user array repository.

use crate::error::StoreResult;
use crate::models::ArrayRow;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

/// Repository for the one-sequence-per-user array store.
#[async_trait]
pub trait ArrayRepo: Send + Sync {
    /// Insert or fully replace the user's stored sequence.
    async fn upsert_array(
        &self,
        user_id: Uuid,
        elements: &str,
        now: OffsetDateTime,
    ) -> StoreResult<()>;

    /// Get the user's stored sequence, if any.
    async fn get_array(&self, user_id: Uuid) -> StoreResult<Option<ArrayRow>>;
}
