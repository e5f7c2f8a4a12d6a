//! Repository for the `todos` collection.

use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use tasklist_core::models::Todo;
use tasklist_core::AppError;

use crate::DATABASE_NAME;

const COLLECTION: &str = "todos";

/// Typed CRUD access to todo documents.
///
/// Identifier strings are parsed at this boundary; anything that is not a
/// 24-hex ObjectId is rejected as `MalformedId` before any I/O happens.
/// Callers are expected to have validated titles already; the store does not
/// re-validate.
#[derive(Clone)]
pub struct TodoRepository {
    collection: Collection<Todo>,
}

impl TodoRepository {
    pub fn new(client: &Client) -> Self {
        Self {
            collection: client.database(DATABASE_NAME).collection(COLLECTION),
        }
    }

    /// All todos, newest first.
    pub async fn list(&self) -> Result<Vec<Todo>, AppError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(AppError::Query)?;
        cursor.try_collect().await.map_err(AppError::Query)
    }

    /// Insert a validated candidate and return it with its assigned id.
    pub async fn insert(&self, title: String) -> Result<Todo, AppError> {
        let mut todo = Todo::new(title);
        let result = self
            .collection
            .insert_one(&todo)
            .await
            .map_err(AppError::Insert)?;
        todo.id = result.inserted_id.as_object_id();
        Ok(todo)
    }

    /// Mark a todo done. The update is an unconditional `$set`, so repeating
    /// it on an already-done todo is a no-op.
    pub async fn mark_done(&self, id: &str) -> Result<(), AppError> {
        let object_id = parse_object_id(id)?;
        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, doc! { "$set": { "done": true } })
            .await
            .map_err(AppError::Update)?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound("Todo".to_string()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let object_id = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(AppError::Update)?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound("Todo".to_string()));
        }
        Ok(())
    }
}

pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::MalformedId(id.to_string()))
}
