//! Repository for the `users` collection.

use bson::doc;
use mongodb::{Client, Collection};
use tasklist_core::models::User;
use tasklist_core::AppError;

use crate::todos::parse_object_id;
use crate::DATABASE_NAME;

const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(client: &Client) -> Self {
        Self {
            collection: client.database(DATABASE_NAME).collection(COLLECTION),
        }
    }

    /// Persist a new account. The password must already be hashed.
    pub async fn insert(&self, user: User) -> Result<User, AppError> {
        self.collection
            .insert_one(&user)
            .await
            .map_err(AppError::Insert)?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(AppError::Query)
    }

    /// Update username and/or password hash. Absent fields are left untouched.
    pub async fn update(
        &self,
        id: &str,
        username: Option<String>,
        password_hash: Option<String>,
    ) -> Result<(), AppError> {
        let object_id = parse_object_id(id)?;

        let mut changes = doc! {};
        if let Some(username) = username {
            changes.insert("username", username);
        }
        if let Some(password_hash) = password_hash {
            changes.insert("password", password_hash);
        }
        if changes.is_empty() {
            return Ok(());
        }

        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, doc! { "$set": changes })
            .await
            .map_err(AppError::Update)?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }
        Ok(())
    }
}
