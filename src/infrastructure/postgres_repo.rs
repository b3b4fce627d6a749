use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::{PgConnectOptions, PgPoolOptions, PgRow, PgSslMode}, Pool, Postgres, Transaction};

use super::Statements;
use crate::domain::error::TodoResult;

/// Matches the serverless backend's compute scale-down window.
pub const CONNECTION_RECYCLE: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub struct PostgresTodoRepository {
    pool: Arc<Pool<Postgres>>,
}

impl PostgresTodoRepository {
    pub async fn connect(database_url: &str) -> TodoResult<Self> {
        let mut options = PgConnectOptions::from_str(database_url)?;
        if requires_default_tls(database_url) {
            options = options.ssl_mode(PgSslMode::Require);
        }
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .max_lifetime(CONNECTION_RECYCLE)
            .connect_with(options)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }

    async fn session(&self) -> TodoResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }
}

/// TLS is mandatory unless the URL picks its own `sslmode`.
fn requires_default_tls(database_url: &str) -> bool {
    !database_url.contains("sslmode=")
}

// `id` is SERIAL (int4) in tables created by earlier deployments; every
// statement widens it so rows decode the same on either column width.
const SQL: Statements = Statements {
    create_table: "CREATE TABLE IF NOT EXISTS todo (
        id SERIAL PRIMARY KEY,
        content VARCHAR NOT NULL
    )",
    create_index: "CREATE INDEX IF NOT EXISTS ix_todo_content ON todo (content)",
    insert: "INSERT INTO todo (content) VALUES ($1) RETURNING id::BIGINT AS id, content",
    select_all: "SELECT id::BIGINT AS id, content FROM todo ORDER BY id",
    select_by_id: "SELECT id::BIGINT AS id, content FROM todo WHERE id = $1 ORDER BY id",
    select_by_content: "SELECT id::BIGINT AS id, content FROM todo WHERE content = $1 ORDER BY id",
    exists: "SELECT 1 FROM todo WHERE id = $1",
    delete: "DELETE FROM todo WHERE id = $1 RETURNING id::BIGINT AS id, content",
    update: "UPDATE todo SET content = $2 WHERE id = $1 RETURNING id::BIGINT AS id, content",
};

sql_todo_repository!(PostgresTodoRepository, PgRow, SQL);
