use std::str::FromStr;
use std::sync::Arc;

use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow}, Pool, Sqlite, Transaction};

use super::Statements;
use crate::domain::error::TodoResult;

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> TodoResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `:memory:` is its own database, so in-memory
        // pools hold exactly one connection that is never recycled.
        let pool = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Scoped session: commit on success, rollback when dropped on any other path.
    async fn session(&self) -> TodoResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

const SQL: Statements = Statements {
    create_table: "CREATE TABLE IF NOT EXISTS todo (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        content TEXT NOT NULL
    )",
    create_index: "CREATE INDEX IF NOT EXISTS ix_todo_content ON todo (content)",
    insert: "INSERT INTO todo (content) VALUES (?1) RETURNING id, content",
    select_all: "SELECT id, content FROM todo ORDER BY id",
    select_by_id: "SELECT id, content FROM todo WHERE id = ?1 ORDER BY id",
    select_by_content: "SELECT id, content FROM todo WHERE content = ?1 ORDER BY id",
    exists: "SELECT 1 FROM todo WHERE id = ?1",
    delete: "DELETE FROM todo WHERE id = ?1 RETURNING id, content",
    update: "UPDATE todo SET content = ?2 WHERE id = ?1 RETURNING id, content",
};

sql_todo_repository!(SqliteTodoRepository, SqliteRow, SQL);
