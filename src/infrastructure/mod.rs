/// SQL for one dialect. Row-returning statements yield `id` as a 64-bit
/// integer and `content`.
pub struct Statements {
    pub create_table: &'static str,
    pub create_index: &'static str,
    pub insert: &'static str,
    pub select_all: &'static str,
    pub select_by_id: &'static str,
    pub select_by_content: &'static str,
    pub exists: &'static str,
    pub delete: &'static str,
    pub update: &'static str,
}

/// Implements `TodoRepository` for a pool-backed repository that has a
/// `session()` method returning a transaction.
///
/// Delete and update issue their write as the first statement, so the
/// session takes the write lock up front instead of upgrading from a read.
macro_rules! sql_todo_repository {
    ($repo:ty, $row:ty, $sql:expr) => {
        #[async_trait::async_trait]
        impl $crate::domain::repository::TodoRepository for $repo {
            async fn init(&self) -> $crate::domain::error::TodoResult<()> {
                let mut tx = self.session().await?;
                sqlx::query($sql.create_table).execute(&mut *tx).await?;
                sqlx::query($sql.create_index).execute(&mut *tx).await?;
                tx.commit().await?;
                Ok(())
            }

            async fn create(&self, input: $crate::domain::todo::NewTodo) -> $crate::domain::error::TodoResult<$crate::domain::todo::Todo> {
                let mut tx = self.session().await?;
                let row = sqlx::query($sql.insert)
                    .bind(&input.content)
                    .fetch_one(&mut *tx)
                    .await?;
                let todo = row_to_todo(&row)?;
                tx.commit().await?;
                Ok(todo)
            }

            async fn list(&self) -> $crate::domain::error::TodoResult<Vec<$crate::domain::todo::Todo>> {
                <Self as $crate::domain::repository::TodoRepository>::filter(self, $crate::domain::todo::TodoFilter::All).await
            }

            async fn filter(&self, filter: $crate::domain::todo::TodoFilter) -> $crate::domain::error::TodoResult<Vec<$crate::domain::todo::Todo>> {
                use $crate::domain::todo::TodoFilter;
                let mut tx = self.session().await?;
                let rows = match &filter {
                    TodoFilter::All => sqlx::query($sql.select_all).fetch_all(&mut *tx).await?,
                    TodoFilter::ById(id) => sqlx::query($sql.select_by_id).bind(id.0).fetch_all(&mut *tx).await?,
                    TodoFilter::ByContent(content) => sqlx::query($sql.select_by_content).bind(content).fetch_all(&mut *tx).await?,
                };
                tx.commit().await?;
                Ok(rows.iter().map(row_to_todo).collect::<Result<Vec<_>, _>>()?)
            }

            async fn delete(&self, id: $crate::domain::todo::TodoId) -> $crate::domain::error::TodoResult<$crate::domain::todo::Todo> {
                let mut tx = self.session().await?;
                let row = sqlx::query($sql.delete)
                    .bind(id.0)
                    .fetch_optional(&mut *tx)
                    .await?;
                let Some(row) = row else { return Err($crate::domain::error::TodoError::NotFound(id)) };
                let todo = row_to_todo(&row)?;
                tx.commit().await?;
                Ok(todo)
            }

            async fn update(&self, id: $crate::domain::todo::TodoId, input: $crate::domain::todo::UpdateTodo) -> $crate::domain::error::TodoResult<$crate::domain::todo::Todo> {
                let mut tx = self.session().await?;
                if input.validate().is_err() {
                    // NotFound outranks the content check.
                    let exists = sqlx::query($sql.exists)
                        .bind(id.0)
                        .fetch_optional(&mut *tx)
                        .await?;
                    if exists.is_none() { return Err($crate::domain::error::TodoError::NotFound(id)); }
                    input.validate()?;
                }
                let row = sqlx::query($sql.update)
                    .bind(id.0)
                    .bind(&input.content)
                    .fetch_optional(&mut *tx)
                    .await?;
                let Some(row) = row else { return Err($crate::domain::error::TodoError::NotFound(id)) };
                let todo = row_to_todo(&row)?;
                tx.commit().await?;
                Ok(todo)
            }
        }

        fn row_to_todo(row: &$row) -> Result<$crate::domain::todo::Todo, sqlx::Error> {
            use sqlx::Row;
            Ok($crate::domain::todo::Todo {
                id: $crate::domain::todo::TodoId(row.try_get("id")?),
                content: row.try_get("content")?,
            })
        }
    };
}

pub mod postgres_repo;
pub mod sqlite_repo;

/// Storage backend selected from the scheme of a database URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Option<Self> {
        if database_url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else {
            None
        }
    }
}
