//! Application state shared by handlers.

use mongodb::Client;
use tasklist_core::Config;
use tasklist_db::{CommentRepository, TodoRepository, UserRepository};

use crate::services::email::EmailService;

/// Aggregates the shared connection, repositories, and configuration.
/// Handlers extract it as `State<Arc<AppState>>`; the rate limiter and auth
/// gate carry their own state objects injected at router construction.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: Client,
    pub todos: TodoRepository,
    pub users: UserRepository,
    pub comments: CommentRepository,
    pub mailer: Option<EmailService>,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
