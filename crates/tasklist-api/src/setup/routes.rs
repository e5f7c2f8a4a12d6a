//! Route configuration and the middleware pipeline.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{delete, get, patch, post},
    Router,
};
use tasklist_core::Config;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{middleware::auth_middleware, AuthState};
use crate::handlers::{comments, health, todos, users};
use crate::middleware::{
    activity_log_middleware, rate_limit_middleware, request_log_middleware,
    time_budget_middleware, SlidingWindowLimiter,
};
use crate::state::AppState;

/// Build the router with every route behind the full pipeline.
///
/// Stage order is: rate-limit admission, request log, time budget, CORS,
/// auth gate, activity log, handler. Axum runs the last-added layer first,
/// so the layers below are stacked in reverse.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    let limiter = Arc::new(SlidingWindowLimiter::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
        config.rate_limit_max_clients,
    ));
    let auth_state = Arc::new(AuthState::accept_all());
    let time_budget = Duration::from_secs(config.request_timeout_secs);

    Router::new()
        .route("/", get(todos::list_todos))
        .route("/health", get(health::health_check))
        .route("/api/post", post(todos::create_todo))
        .route("/api/updateTodo/{id}", patch(todos::update_todo))
        .route("/api/deleteTodo/{id}", delete(todos::delete_todo))
        .route("/api/register", post(users::register))
        .route("/api/login", post(users::login))
        .route("/api/passwordReset", post(users::password_reset))
        .route("/api/user/{id}", patch(users::update_user))
        .route("/api/todo/{id}/comment", post(comments::post_comment))
        .layer(axum::middleware::from_fn(activity_log_middleware))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .layer(setup_cors())
        .layer(axum::middleware::from_fn_with_state(
            time_budget,
            time_budget_middleware,
        ))
        .layer(axum::middleware::from_fn(request_log_middleware))
        .layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ))
        .with_state(state)
}

/// Permissive CORS: any origin, the four verbs the API serves, and the
/// headers clients actually send.
fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
