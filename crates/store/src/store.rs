//! Data store trait and the SQLite implementation.

use crate::error::{StoreError, StoreResult};
use crate::repos::{ArrayRepo, HistoryRepo, UserRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined data store trait.
#[async_trait]
pub trait DataStore: UserRepo + ArrayRepo + HistoryRepo + Send + Sync {
    /// Create the schema if it does not exist yet.
    async fn migrate(&self) -> StoreResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> StoreResult<()>;
}

/// SQLite-based data store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Create a new SQLite store, running schema creation immediately.
    pub async fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Config(format!("cannot create {}: {e}", parent.display())))?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // persistent "database is locked" failures under axum concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Implement the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::{ArrayRow, HistoryRow, UserRow};
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[async_trait]
    impl UserRepo for SqliteStore {
        async fn create_user(&self, user: &UserRow) -> StoreResult<()> {
            if self.get_user_by_username(&user.username).await?.is_some() {
                return Err(StoreError::AlreadyExists(format!(
                    "username '{}' already exists",
                    user.username
                )));
            }

            sqlx::query(
                r#"
                INSERT INTO users (
                    user_id, username, password_hash, token_hash, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(user.user_id)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.token_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<UserRow>> {
            let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn get_user_by_token_hash(&self, token_hash: &str) -> StoreResult<Option<UserRow>> {
            let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE token_hash = ?")
                .bind(token_hash)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn update_token(
            &self,
            user_id: Uuid,
            token_hash: &str,
            updated_at: OffsetDateTime,
        ) -> StoreResult<()> {
            let result =
                sqlx::query("UPDATE users SET token_hash = ?, updated_at = ? WHERE user_id = ?")
                    .bind(token_hash)
                    .bind(updated_at)
                    .bind(user_id)
                    .execute(&self.pool)
                    .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!("user_id {user_id} not found")));
            }
            Ok(())
        }

        async fn update_credentials(
            &self,
            user_id: Uuid,
            password_hash: &str,
            token_hash: &str,
            updated_at: OffsetDateTime,
        ) -> StoreResult<()> {
            let result = sqlx::query(
                "UPDATE users SET password_hash = ?, token_hash = ?, updated_at = ? WHERE user_id = ?",
            )
            .bind(password_hash)
            .bind(token_hash)
            .bind(updated_at)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!("user_id {user_id} not found")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ArrayRepo for SqliteStore {
        async fn upsert_array(
            &self,
            user_id: Uuid,
            elements: &str,
            now: OffsetDateTime,
        ) -> StoreResult<()> {
            sqlx::query(
                r#"
                INSERT INTO user_arrays (user_id, elements, created_at, updated_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(user_id) DO UPDATE SET
                    elements = excluded.elements,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(user_id)
            .bind(elements)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_array(&self, user_id: Uuid) -> StoreResult<Option<ArrayRow>> {
            let row = sqlx::query_as::<_, ArrayRow>("SELECT * FROM user_arrays WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }
    }

    #[async_trait]
    impl HistoryRepo for SqliteStore {
        async fn append_entry(
            &self,
            user_id: Uuid,
            endpoint: &str,
            created_at: OffsetDateTime,
        ) -> StoreResult<()> {
            sqlx::query(
                "INSERT INTO request_history (user_id, endpoint, created_at) VALUES (?, ?, ?)",
            )
            .bind(user_id)
            .bind(endpoint)
            .bind(created_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn list_entries(&self, user_id: Uuid) -> StoreResult<Vec<HistoryRow>> {
            let rows = sqlx::query_as::<_, HistoryRow>(
                r#"
                SELECT * FROM request_history
                WHERE user_id = ?
                ORDER BY created_at DESC, entry_id DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn clear_entries(&self, user_id: Uuid) -> StoreResult<u64> {
            let result = sqlx::query("DELETE FROM request_history WHERE user_id = ?")
                .bind(user_id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        }
    }
}

const SCHEMA_SQL: &str = r#"
-- User accounts
CREATE TABLE IF NOT EXISTS users (
    user_id BLOB PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    -- SHA-256 of the current session token; unique across live sessions.
    token_hash TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);
CREATE INDEX IF NOT EXISTS idx_users_token_hash ON users(token_hash);

-- Per-user integer sequences (at most one row per user)
CREATE TABLE IF NOT EXISTS user_arrays (
    user_id BLOB PRIMARY KEY REFERENCES users(user_id) ON DELETE CASCADE,
    elements TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Append-only request history
CREATE TABLE IF NOT EXISTS request_history (
    entry_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id BLOB NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    endpoint TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_request_history_user ON request_history(user_id, created_at DESC);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRow;
    use time::OffsetDateTime;
    use uuid::Uuid;

    async fn test_store() -> (tempfile::TempDir, SqliteStore) {
        let temp = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(temp.path().join("sortstash.db"))
            .await
            .unwrap();
        (temp, store)
    }

    fn user_row(username: &str, token_hash: &str) -> UserRow {
        let now = OffsetDateTime::now_utc();
        UserRow {
            user_id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: "$2b$04$placeholderplaceholderpla".to_string(),
            token_hash: token_hash.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_and_look_up_user() {
        let (_temp, store) = test_store().await;
        let user = user_row("alice", "hash-a");
        store.create_user(&user).await.unwrap();

        let by_name = store.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.user_id, user.user_id);

        let by_token = store.get_user_by_token_hash("hash-a").await.unwrap().unwrap();
        assert_eq!(by_token.user_id, user.user_id);

        assert!(store.get_user_by_username("bob").await.unwrap().is_none());
        assert!(store.get_user_by_token_hash("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let (_temp, store) = test_store().await;
        store.create_user(&user_row("alice", "hash-a")).await.unwrap();

        let err = store
            .create_user(&user_row("alice", "hash-b"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn username_lookup_is_case_sensitive() {
        let (_temp, store) = test_store().await;
        store.create_user(&user_row("Alice", "hash-a")).await.unwrap();
        assert!(store.get_user_by_username("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn token_rotation_invalidates_old_lookup() {
        let (_temp, store) = test_store().await;
        let user = user_row("alice", "hash-old");
        store.create_user(&user).await.unwrap();

        store
            .update_token(user.user_id, "hash-new", OffsetDateTime::now_utc())
            .await
            .unwrap();

        assert!(store.get_user_by_token_hash("hash-old").await.unwrap().is_none());
        let found = store
            .get_user_by_token_hash("hash-new")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, user.user_id);
    }

    #[tokio::test]
    async fn update_token_for_unknown_user_is_not_found() {
        let (_temp, store) = test_store().await;
        let err = store
            .update_token(Uuid::new_v4(), "hash", OffsetDateTime::now_utc())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_credentials_replaces_hash_and_token() {
        let (_temp, store) = test_store().await;
        let user = user_row("alice", "hash-old");
        store.create_user(&user).await.unwrap();

        store
            .update_credentials(
                user.user_id,
                "new-password-hash",
                "hash-new",
                OffsetDateTime::now_utc(),
            )
            .await
            .unwrap();

        let found = store
            .get_user_by_token_hash("hash-new")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.password_hash, "new-password-hash");
    }

    #[tokio::test]
    async fn upsert_array_creates_then_replaces() {
        let (_temp, store) = test_store().await;
        let user = user_row("alice", "hash-a");
        store.create_user(&user).await.unwrap();

        assert!(store.get_array(user.user_id).await.unwrap().is_none());

        let now = OffsetDateTime::now_utc();
        store.upsert_array(user.user_id, "[1,2,3]", now).await.unwrap();
        let row = store.get_array(user.user_id).await.unwrap().unwrap();
        assert_eq!(row.elements, "[1,2,3]");

        store.upsert_array(user.user_id, "[-7,0]", now).await.unwrap();
        let row = store.get_array(user.user_id).await.unwrap().unwrap();
        assert_eq!(row.elements, "[-7,0]");
    }

    #[tokio::test]
    async fn history_lists_newest_first_with_id_tiebreak() {
        let (_temp, store) = test_store().await;
        let user = user_row("alice", "hash-a");
        store.create_user(&user).await.unwrap();

        let base = OffsetDateTime::now_utc();
        store
            .append_entry(user.user_id, "POST /array/create", base)
            .await
            .unwrap();
        store
            .append_entry(user.user_id, "GET /array", base + time::Duration::seconds(1))
            .await
            .unwrap();
        // Same timestamp as the previous entry: the later insert must still
        // list first via the entry-id tie-break.
        store
            .append_entry(
                user.user_id,
                "POST /array/sort/shell",
                base + time::Duration::seconds(1),
            )
            .await
            .unwrap();

        let entries = store.list_entries(user.user_id).await.unwrap();
        let endpoints: Vec<&str> = entries.iter().map(|e| e.endpoint.as_str()).collect();
        assert_eq!(
            endpoints,
            vec!["POST /array/sort/shell", "GET /array", "POST /array/create"]
        );
        assert!(entries[0].entry_id > entries[1].entry_id);
    }

    #[tokio::test]
    async fn history_is_scoped_per_user() {
        let (_temp, store) = test_store().await;
        let alice = user_row("alice", "hash-a");
        let bob = user_row("bob", "hash-b");
        store.create_user(&alice).await.unwrap();
        store.create_user(&bob).await.unwrap();

        let now = OffsetDateTime::now_utc();
        store.append_entry(alice.user_id, "GET /array", now).await.unwrap();
        store.append_entry(bob.user_id, "PATCH /array", now).await.unwrap();

        let entries = store.list_entries(alice.user_id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].endpoint, "GET /array");

        let removed = store.clear_entries(alice.user_id).await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.list_entries(alice.user_id).await.unwrap().is_empty());
        assert_eq!(store.list_entries(bob.user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_on_empty_history_succeeds() {
        let (_temp, store) = test_store().await;
        let user = user_row("alice", "hash-a");
        store.create_user(&user).await.unwrap();
        assert_eq!(store.clear_entries(user.user_id).await.unwrap(), 0);
    }
}
