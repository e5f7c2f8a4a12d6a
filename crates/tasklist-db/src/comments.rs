//! Repository for the `comments` collection.

use mongodb::{Client, Collection};
use tasklist_core::models::Comment;
use tasklist_core::AppError;

use crate::todos::parse_object_id;
use crate::DATABASE_NAME;

const COLLECTION: &str = "comments";

#[derive(Clone)]
pub struct CommentRepository {
    collection: Collection<Comment>,
}

impl CommentRepository {
    pub fn new(client: &Client) -> Self {
        Self {
            collection: client.database(DATABASE_NAME).collection(COLLECTION),
        }
    }

    /// Attach a comment to the todo with the given id string.
    pub async fn insert(&self, todo_id: &str, text: String) -> Result<Comment, AppError> {
        let todo_id = parse_object_id(todo_id)?;
        let comment = Comment::new(todo_id, text);
        self.collection
            .insert_one(&comment)
            .await
            .map_err(AppError::Insert)?;
        Ok(comment)
    }
}
