use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment attached to a todo, stored in the `comments` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "todoId")]
    pub todo_id: ObjectId,
    pub text: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(todo_id: ObjectId, text: String) -> Self {
        Self {
            id: ObjectId::new(),
            todo_id,
            text,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    #[serde(rename = "todoId")]
    pub todo_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_hex(),
            todo_id: comment.todo_id.to_hex(),
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}
