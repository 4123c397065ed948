//! Authentication Middleware
//!
//! Axum middleware for JWT token validation and user authentication.
//! A pure decision gate: missing or malformed headers and expired or
//! invalid tokens are all rejected with 401; a valid token has its
//! identity attached to the request and the request continues.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{jwt::JwtService, models::AuthUser};
use crate::errors::ApiError;

/// Authentication middleware that validates JWT tokens and injects user info
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Middleware function for validating JWT tokens
    pub async fn validate_token(
        State(jwt_service): State<Arc<JwtService>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, ApiError> {
        let token = match bearer_token(req.headers()) {
            Some(token) => token,
            None => {
                tracing::warn!("Missing or malformed Authorization header: {} {}", req.method(), req.uri());
                return Err(ApiError::Unauthorized("Token no proporcionado".to_string()));
            }
        };

        let claims = jwt_service.validate_token(&token).map_err(|e| {
            tracing::warn!("Token rejected: {} {}", req.method(), req.uri());
            e
        })?;

        let auth_user = AuthUser {
            id: claims.sub,
            email: claims.email,
        };

        // Insert the user into request extensions for downstream handlers
        req.extensions_mut().insert(auth_user);

        Ok(next.run(req).await)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
/// Anything else, including a missing header, yields `None`.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth_header| {
            auth_header
                .strip_prefix("Bearer ")
                .map(|token| token.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn rejects_malformed_scheme() {
        assert_eq!(bearer_token(&headers_with_auth("Basic abc")), None);
        assert_eq!(bearer_token(&headers_with_auth("bearer abc")), None);
        assert_eq!(bearer_token(&headers_with_auth("abc.def.ghi")), None);
    }
}
