//! Data access layer: connection bootstrap and one repository per collection.

pub mod comments;
pub mod connection;
pub mod todos;
pub mod users;

pub use comments::CommentRepository;
pub use connection::{initialize, ping};
pub use todos::TodoRepository;
pub use users::UserRepository;

/// Name of the database holding all collections.
pub const DATABASE_NAME: &str = "tasklist";
