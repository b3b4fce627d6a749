use axum::response::{IntoResponse, Response};
use ::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::error::TodoError;

/// JSON error body: `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody { pub detail: String }

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self { Self { status, detail: detail.into() } }

    /// Request shape could not be extracted (missing or mistyped parameter, bad body).
    pub fn unprocessable(detail: impl Into<String>) -> Self { Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail) }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Todo not found"),
            TodoError::InvalidArgument(reason) => Self::new(StatusCode::BAD_REQUEST, reason),
            TodoError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response { (self.status, axum::Json(ErrorBody { detail: self.detail })).into_response() }
}
