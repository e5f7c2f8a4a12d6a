//! Registration, login, password reset, and user update handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tasklist_core::models::User;
use tasklist_core::{validate_email, AppError};

use crate::auth::token;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

const HASH_COST: u32 = 14;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

async fn hash_password(password: String) -> Result<String, AppError> {
    // bcrypt at cost 14 takes on the order of a second; keep it off the
    // async workers.
    tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(|err| AppError::Internal(format!("hashing task failed: {err}")))?
        .map_err(|err| AppError::Hashing(err.to_string()))
}

/// POST /api/register — hash the password and persist the account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "username and password are required".to_string(),
        )
        .into());
    }

    let password_hash = hash_password(payload.password).await?;
    state
        .users
        .insert(User::new(payload.username, password_hash))
        .await?;

    Ok((StatusCode::CREATED, "User registered successfully"))
}

/// POST /api/login — issue a token for the named user.
// TODO: check the password against the stored bcrypt hash before issuing a token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, HttpAppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::InvalidInput("username is required".to_string()).into());
    }

    let user_id = state
        .users
        .find_by_username(&payload.username)
        .await?
        .map(|user| user.id.to_hex())
        .unwrap_or_default();

    let token = token::issue(
        &user_id,
        &payload.username,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;

    Ok(Json(TokenResponse { token }))
}

/// POST /api/passwordReset — form-encoded email, dispatched to the mailer.
pub async fn password_reset(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<PasswordResetRequest>,
) -> Result<StatusCode, HttpAppError> {
    if payload.email.is_empty() {
        return Err(AppError::InvalidInput("Email is required".to_string()).into());
    }
    validate_email(&payload.email)?;

    match &state.mailer {
        Some(mailer) => {
            mailer
                .send_password_reset(&payload.email)
                .await
                .map_err(AppError::EmailSend)?;
        }
        None => {
            tracing::debug!(email = %payload.email, "SMTP not configured, skipping password reset email");
        }
    }

    Ok(StatusCode::OK)
}

/// PATCH /api/user/{id} — update username and/or password.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<StatusCode, HttpAppError> {
    let password_hash = match payload.password {
        Some(password) => Some(hash_password(password).await?),
        None => None,
    };

    state.users.update(&id, payload.username, password_hash).await?;
    Ok(StatusCode::OK)
}
