//! Todo CRUD handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tasklist_core::models::TodoResponse;
use tasklist_core::validate_title;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
}

/// GET / — all todos, newest first.
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TodoResponse>>, HttpAppError> {
    let todos = state.todos.list().await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// POST /api/post — validate the title, then insert. Validation failures
/// never reach the store.
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_title(&payload.title)?;
    let todo = state.todos.insert(payload.title).await?;
    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

/// PATCH /api/updateTodo/{id} — mark done.
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    state.todos.mark_done(&id).await?;
    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/deleteTodo/{id}
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    state.todos.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}
