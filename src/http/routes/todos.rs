use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::{routing::{delete, get, post, put}, Json, Router};
use serde::Deserialize;

use crate::{
    application::todo_service::TodoService,
    domain::todo::{NewTodo, Todo, TodoFilter, TodoId, UpdateTodo},
    http::types::ApiError,
};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos/", post(create_todo::<S>).get(list_todos::<S>))
        .route("/todos", post(create_todo::<S>).get(list_todos::<S>))
        .route("/FilterMyData", get(filter_todos::<S>))
        .route("/deleteTodo", delete(delete_todo::<S>))
        .route("/Updatedata", put(update_todo::<S>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub id: Option<i64>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(rename = "Id")]
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    pub id: i64,
    pub content: String,
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, payload: Result<Json<NewTodo>, JsonRejection>) -> Result<Json<Todo>, ApiError> {
    let Json(payload) = payload.map_err(json_rejection)?;
    Ok(Json(state.service.create(payload).await?))
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

async fn filter_todos<S: TodoService>(State(state): State<AppState<S>>, params: Result<Query<FilterParams>, QueryRejection>) -> Result<Json<Vec<Todo>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    let filter = TodoFilter::from_params(params.id, params.content);
    Ok(Json(state.service.filter(filter).await?))
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, params: Result<Query<DeleteParams>, QueryRejection>) -> Result<Json<Todo>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    Ok(Json(state.service.delete(TodoId(params.id)).await?))
}

async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, params: Result<Query<UpdateParams>, QueryRejection>) -> Result<Json<Todo>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    Ok(Json(state.service.update(TodoId(params.id), UpdateTodo::new(params.content)).await?))
}

/// A missing or wrong `Content-Type` keeps axum's 415; any other body problem is 422.
fn json_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::new(rejection.status(), rejection.body_text()),
        other => ApiError::unprocessable(other.body_text()),
    }
}
