use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo item as stored in the `todos` collection.
///
/// `id` and `created_at` are store-assigned: callers supply the title only,
/// and the identifier is filled in from the insert result. `title` never
/// changes after creation; the only mutation is marking the item done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub done: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Build an unsaved candidate; the store assigns the identifier on insert.
    pub fn new(title: String) -> Self {
        Self {
            id: None,
            title,
            done: false,
            created_at: Utc::now(),
        }
    }
}

/// Todo as rendered in API responses (hex id instead of BSON ObjectId).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: todo.title,
            done: todo.done,
            created_at: todo.created_at,
        }
    }
}
