//! Database models mapping to the store schema.

use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User account record.
///
/// `token_hash` holds the SHA-256 of the user's current session token; the
/// raw token is never persisted. A user has exactly one live token at a time,
/// so rotating it overwrites this column and invalidates the prior session.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub token_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Stored integer sequence for a user (one row per user).
///
/// `elements` is the JSON-encoded sequence; it must round-trip values
/// exactly, including negatives and duplicates.
#[derive(Debug, Clone, FromRow)]
pub struct ArrayRow {
    pub user_id: Uuid,
    pub elements: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Request history entry.
#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    /// Monotonic per-store id (SQLite AUTOINCREMENT).
    pub entry_id: i64,
    pub user_id: Uuid,
    /// Endpoint label, e.g. "GET /array".
    pub endpoint: String,
    pub created_at: OffsetDateTime,
}
