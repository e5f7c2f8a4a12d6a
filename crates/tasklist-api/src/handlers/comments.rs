//! Comment creation handler.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tasklist_core::models::CommentResponse;
use tasklist_core::AppError;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub text: String,
}

/// POST /api/todo/{id}/comment
pub async fn post_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if payload.text.trim().is_empty() {
        return Err(AppError::InvalidInput("Comment text is required".to_string()).into());
    }

    let comment = state.comments.insert(&id, payload.text).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}
