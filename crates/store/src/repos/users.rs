//! User account repository.

use crate::error::StoreResult;
use crate::models::UserRow;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

/// Repository for user account operations.
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Create a user account.
    async fn create_user(&self, user: &UserRow) -> StoreResult<()>;

    /// Look up a user by username (case-sensitive, as stored).
    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<UserRow>>;

    /// Resolve a session token hash to its user, if any.
    async fn get_user_by_token_hash(&self, token_hash: &str) -> StoreResult<Option<UserRow>>;

    /// Replace the user's session token hash, invalidating the prior session.
    async fn update_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        updated_at: OffsetDateTime,
    ) -> StoreResult<()>;

    /// Replace the user's password hash and session token hash in one step.
    async fn update_credentials(
        &self,
        user_id: Uuid,
        password_hash: &str,
        token_hash: &str,
        updated_at: OffsetDateTime,
    ) -> StoreResult<()>;
}
