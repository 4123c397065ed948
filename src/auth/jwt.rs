//! JWT Token Service
//!
//! Handles JWT creation, validation, and claims management for user
//! authentication. Expired and malformed tokens are reported as distinct
//! failures so the gate can answer with the matching message.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User unique identifier
    pub sub: i32,
    /// User email
    pub email: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

/// JWT Service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Duration,
}

impl JwtService {
    /// Create a new JWT service with the provided secret and token lifetime
    pub fn new(secret: &str, expires_in: Duration) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        // Expiry is exact: a token presented past `exp` is rejected
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            expires_in,
        }
    }

    /// Generate a JWT token for a user
    pub fn create_token(&self, user_id: i32, email: String) -> Result<String> {
        let now = Utc::now();
        let expiration = now + self.expires_in;

        let claims = Claims {
            sub: user_id,
            email,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to encode JWT token")
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    ApiError::Unauthorized("Token expirado".to_string())
                }
                _ => ApiError::Unauthorized("Token inválido".to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(expires_in: Duration) -> JwtService {
        JwtService::new("test_secret", expires_in)
    }

    #[test]
    fn test_jwt_roundtrip() {
        let jwt_service = service(Duration::days(7));
        let email = "test@example.com".to_string();

        let token = jwt_service.create_token(42, email.clone()).unwrap();
        let claims = jwt_service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let jwt_service = service(Duration::seconds(-60));
        let token = jwt_service
            .create_token(1, "test@example.com".to_string())
            .unwrap();

        let err = jwt_service.validate_token(&token).unwrap_err();
        match err {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "Token expirado"),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let minter = JwtService::new("other_secret", Duration::days(7));
        let token = minter.create_token(1, "test@example.com".to_string()).unwrap();

        let err = service(Duration::days(7)).validate_token(&token).unwrap_err();
        match err {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "Token inválido"),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn garbage_token_is_invalid() {
        let err = service(Duration::days(7))
            .validate_token("not.a.token")
            .unwrap_err();
        match err {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "Token inválido"),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }
}
