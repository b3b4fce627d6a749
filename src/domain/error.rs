use super::todo::TodoId;

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("todo {0} not found")]
    NotFound(TodoId),
    #[error("{0}")]
    InvalidArgument(&'static str),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type TodoResult<T> = Result<T, TodoError>;
