use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::TodoError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A persisted todo. `id` is assigned by storage and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub content: String,
}

/// Body accepted by create. A client-supplied `id` is tolerated but dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub id: Option<i64>,
    pub content: String,
}

impl NewTodo {
    pub fn new(content: impl Into<String>) -> Self { Self { id: None, content: content.into() } }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodo {
    pub content: String,
}

impl UpdateTodo {
    pub fn new(content: impl Into<String>) -> Self { Self { content: content.into() } }

    /// Repositories call this only after the target row is known to exist.
    pub fn validate(&self) -> Result<(), TodoError> {
        if self.content.is_empty() {
            return Err(TodoError::InvalidArgument("Content cannot be empty"));
        }
        Ok(())
    }
}

/// Exact-match selection over the todo table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoFilter {
    All,
    ById(TodoId),
    ByContent(String),
}

impl TodoFilter {
    /// `id` wins over `content`; with neither, everything matches.
    pub fn from_params(id: Option<i64>, content: Option<String>) -> Self {
        match (id, content) {
            (Some(id), _) => Self::ById(TodoId(id)),
            (None, Some(content)) => Self::ByContent(content),
            (None, None) => Self::All,
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::ById(id) => todo.id == *id,
            Self::ByContent(content) => todo.content == *content,
        }
    }
}
