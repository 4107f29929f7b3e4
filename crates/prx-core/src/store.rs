use std::path::Path;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Row,
};

use crate::{
    domain::{ChatId, ForwardRecord, MessageId},
    errors::Error,
    Result,
};

/// Append-only correlation table mapping a group-side message id back to the
/// private chat it was forwarded from.
///
/// Rows are inserted exactly once, at the moment a user message has been
/// successfully forwarded into the group, and never updated or deleted. The
/// pool plus SQLite's own locking make concurrent lookups and inserts safe;
/// primary-key uniqueness rejects insert races.
#[derive(Clone)]
pub struct ForwardStore {
    pool: SqlitePool,
}

impl ForwardStore {
    /// Open (creating if missing) the database file backing the store.
    pub async fn open(path: &Path, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// In-memory store. A pool of one connection: each in-memory SQLite
    /// connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::new().in_memory(true))
            .await?;
        Ok(Self { pool })
    }

    /// Idempotently ensure the `forwards` table exists. Safe on every start;
    /// fails only on unrecoverable storage errors, which are fatal upstream.
    pub async fn initialize(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS forwards(
                 group_message_id  INTEGER PRIMARY KEY,
                 user_chat_id      INTEGER NOT NULL,
                 origin_message_id INTEGER NOT NULL
             )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Append a new record. A unique-violation on `group_message_id` maps to
    /// `Error::DuplicateKey`; under correct sequencing it never fires.
    pub async fn insert(
        &self,
        group_message_id: MessageId,
        user_chat_id: ChatId,
        origin_message_id: MessageId,
    ) -> Result<()> {
        let res = sqlx::query(
            "INSERT INTO forwards(group_message_id, user_chat_id, origin_message_id)
             VALUES (?, ?, ?)",
        )
        .bind(group_message_id.0)
        .bind(user_chat_id.0)
        .bind(origin_message_id.0)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(Error::DuplicateKey(group_message_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Point lookup by primary key. `None` means "not a bridged message" and
    /// is normal control flow for callers, not an error.
    pub async fn lookup(&self, group_message_id: MessageId) -> Result<Option<ForwardRecord>> {
        let row = sqlx::query(
            "SELECT user_chat_id, origin_message_id FROM forwards WHERE group_message_id = ?",
        )
        .bind(group_message_id.0)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(ForwardRecord {
            group_message_id,
            user_chat_id: ChatId(row.try_get("user_chat_id")?),
            origin_message_id: MessageId(row.try_get("origin_message_id")?),
        }))
    }
}
