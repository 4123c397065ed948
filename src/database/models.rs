//! Database models for the credential store.

use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Trait for converting from tokio-postgres Row
pub trait FromRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> where Self: Sized;
}

/// Outbound user representation. Deliberately has no password field, so a
/// hash can never be serialized into a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl FromRow for User {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
        })
    }
}

/// Full credential row, including the password hash. Never serialized;
/// only the login flow reads it.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserRecord {
    /// Strip the credential material, leaving the outbound shape.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
        }
    }
}

impl FromRow for UserRecord {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_user_has_no_password_field() {
        let user = User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("id"));
        assert!(object.contains_key("name"));
        assert!(object.contains_key("email"));
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
    }

    #[test]
    fn record_into_user_drops_the_hash() {
        let record = UserRecord {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
        };
        let user = record.into_user();
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "ana@x.com");
    }
}
