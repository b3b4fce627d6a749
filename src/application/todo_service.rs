use crate::domain::error::{TodoError, TodoResult};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{NewTodo, Todo, TodoFilter, TodoId, UpdateTodo};
use async_trait::async_trait;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: NewTodo) -> TodoResult<Todo>;
    async fn list(&self) -> TodoResult<Vec<Todo>>;
    async fn filter(&self, filter: TodoFilter) -> TodoResult<Vec<Todo>>;
    async fn delete(&self, id: TodoId) -> TodoResult<Todo>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Todo>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: NewTodo) -> TodoResult<Todo> {
        if let Some(id) = input.id {
            tracing::debug!(id, "ignoring client-supplied id");
        }
        let todo = self.repo.create(input).await?;
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    async fn list(&self) -> TodoResult<Vec<Todo>> {
        let todos = self.repo.list().await?;
        tracing::debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    async fn filter(&self, filter: TodoFilter) -> TodoResult<Vec<Todo>> {
        tracing::debug!(?filter, "filtering todos");
        self.repo.filter(filter).await
    }

    async fn delete(&self, id: TodoId) -> TodoResult<Todo> {
        let todo = self.repo.delete(id).await.inspect_err(log_rejection)?;
        tracing::info!(%id, "todo deleted");
        Ok(todo)
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Todo> {
        let todo = self.repo.update(id, input).await.inspect_err(log_rejection)?;
        tracing::info!(%id, "todo updated");
        Ok(todo)
    }
}

fn log_rejection(err: &TodoError) {
    match err {
        TodoError::NotFound(id) => tracing::warn!(%id, "todo not found"),
        TodoError::InvalidArgument(reason) => tracing::warn!(reason, "rejected update"),
        TodoError::Storage(_) => {}
    }
}
