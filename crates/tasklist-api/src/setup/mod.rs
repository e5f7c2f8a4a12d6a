//! Application initialization: database, state, routes.

pub mod routes;
pub mod server;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tasklist_core::Config;
use tasklist_db::{CommentRepository, TodoRepository, UserRepository};

use crate::services::email::EmailService;
use crate::state::AppState;

/// Connect to the database (fatal after bounded retries), wire up the
/// repositories, and build the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let client = tasklist_db::initialize(
        &config.mongo_uri,
        Duration::from_secs(config.db_server_selection_timeout_secs),
    )
    .await
    .context("database initialization failed")?;

    let state = Arc::new(AppState {
        todos: TodoRepository::new(&client),
        users: UserRepository::new(&client),
        comments: CommentRepository::new(&client),
        mailer: EmailService::from_config(&config),
        client,
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state.clone());
    Ok((state, router))
}
