use async_trait::async_trait;
use super::error::TodoResult;
use super::todo::{NewTodo, Todo, TodoFilter, TodoId, UpdateTodo};

/// Storage seam. Each call runs in its own session; nothing is cached between calls.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> TodoResult<()>;
    async fn create(&self, input: NewTodo) -> TodoResult<Todo>;
    async fn list(&self) -> TodoResult<Vec<Todo>>;
    async fn filter(&self, filter: TodoFilter) -> TodoResult<Vec<Todo>>;
    /// Returns the removed row, or `NotFound`.
    async fn delete(&self, id: TodoId) -> TodoResult<Todo>;
    /// Existence is checked before `input` is validated, so `NotFound` wins over `InvalidArgument`.
    async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Todo>;
}
