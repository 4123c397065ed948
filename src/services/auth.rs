//! Core business logic for the authentication flows.
//!
//! Registration hashes the password and inserts the row; email uniqueness
//! is enforced solely by the store's UNIQUE constraint, whose violation is
//! re-kinded here into a domain `Conflict`. Login deliberately answers
//! unknown-email and wrong-password with the same error so a caller cannot
//! tell which check failed.

use argon2::password_hash::rand_core::OsRng;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use std::sync::Arc;

use crate::auth::jwt::JwtService;
use crate::database::connection::DatabaseConnection;
use crate::database::models::User;
use crate::errors::ApiError;

#[derive(Clone)]
pub struct AuthService {
    db: Arc<DatabaseConnection>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(db: Arc<DatabaseConnection>, jwt: Arc<JwtService>) -> Self {
        Self { db, jwt }
    }

    /// Register a new user. Returns the created user without the password
    /// field; a duplicate email yields `Conflict`.
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<User, ApiError> {
        let email = normalize_email(&email);
        let password_hash = hash_password(&password)?;

        match self.db.insert_user(&name, &email, &password_hash).await {
            Err(err) if err.is_unique_violation() => {
                Err(ApiError::Conflict("El email ya está registrado".to_string()))
            }
            other => other,
        }
    }

    /// Authenticate a user and mint a session token. Unknown email and
    /// wrong password produce byte-identical failures.
    pub async fn login(&self, email: String, password: String) -> Result<(User, String), ApiError> {
        let email = normalize_email(&email);

        let record = self
            .db
            .find_user_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&password, &record.password_hash)? {
            return Err(invalid_credentials());
        }

        let token = self.jwt.create_token(record.id, record.email.clone())?;
        Ok((record.into_user(), token))
    }

    /// Fetch a user by id, as the `/api/auth/me` endpoint does for the
    /// identity carried in the token.
    pub async fn get_by_id(&self, id: i32) -> Result<User, ApiError> {
        self.db
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Usuario no encontrado".to_string()))
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Credenciales inválidas".to_string())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash a plaintext password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to hash password: {e}")))
}

/// Verify a plaintext password against a stored hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Stored password hash is malformed: {e}")))?;
    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_internal_error() {
        assert!(verify_password("secret1", "not-a-phc-string").is_err());
    }

    #[test]
    fn email_normalization_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ana@X.COM "), "ana@x.com");
    }
}
