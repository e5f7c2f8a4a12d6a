//! HTTP handlers: thin translators between routes and the repositories.

pub mod comments;
pub mod health;
pub mod todos;
pub mod users;
