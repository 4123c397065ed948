//! User CRUD service over the credential store.
//!
//! Absent ids surface as `NotFound`; an update that collides with another
//! user's email surfaces as `Conflict`. Deletion is a hard delete.

use std::sync::Arc;

use crate::database::connection::DatabaseConnection;
use crate::database::models::User;
use crate::errors::ApiError;

#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All users, natural store order, no password field
    pub async fn get_all(&self) -> Result<Vec<User>, ApiError> {
        self.db.list_users().await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<User, ApiError> {
        self.db
            .find_user_by_id(id)
            .await?
            .ok_or_else(user_not_found)
    }

    /// Full overwrite of name and email. Both fields are required; there is
    /// no partial-field skip logic.
    pub async fn update(&self, id: i32, name: String, email: String) -> Result<User, ApiError> {
        let email = email.trim().to_lowercase();
        match self.db.update_user(id, &name, &email).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(user_not_found()),
            Err(err) if err.is_unique_violation() => Err(ApiError::Conflict(
                "Ya existe un registro con esos datos".to_string(),
            )),
            Err(err) => Err(err),
        }
    }

    /// Hard delete. A second remove of the same id yields `NotFound`.
    pub async fn remove(&self, id: i32) -> Result<(), ApiError> {
        let deleted = self.db.delete_user(id).await?;
        if deleted == 0 {
            return Err(user_not_found());
        }
        Ok(())
    }
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("Usuario no encontrado".to_string())
}
