//! Error taxonomy and its single HTTP mapping point.
//!
//! Services return `ApiError`; handlers propagate with `?`. The
//! `IntoResponse` impl below is the only place a failure kind is translated
//! into a status code and a sanitized `{ok: false, message}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tokio_postgres::error::SqlState;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Duplicate unique field (maps to 400, matching the original API)
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or missing/invalid/expired token
    #[error("{0}")]
    Unauthorized(String),

    /// No row matched the requested id
    #[error("{0}")]
    NotFound(String),

    /// Raw database error; constraint violations are recognized at the
    /// boundary, anything else is a 500
    #[error(transparent)]
    Db(#[from] tokio_postgres::Error),

    /// Pool checkout failure
    #[error(transparent)]
    Pool(#[from] deadpool_postgres::PoolError),

    /// Anything unanticipated
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// True when the underlying database error is a unique-constraint
    /// violation (SQLSTATE 23505). Services use this to re-kind an insert
    /// failure into a domain `Conflict`.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, ApiError::Db(e) if e.code() == Some(&SqlState::UNIQUE_VIOLATION))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Db(e) if e.code() == Some(&SqlState::UNIQUE_VIOLATION) => (
                StatusCode::BAD_REQUEST,
                "Ya existe un registro con esos datos".to_string(),
            ),
            ApiError::Db(e) if e.code() == Some(&SqlState::FOREIGN_KEY_VIOLATION) => (
                StatusCode::BAD_REQUEST,
                "Referencia a un registro que no existe".to_string(),
            ),
            ApiError::Db(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                )
            }
            ApiError::Pool(e) => {
                tracing::error!("Connection pool error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                )
            }
        };

        (status, Json(json!({ "ok": false, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn conflict_maps_to_400() {
        let resp = ApiError::Conflict("El email ya está registrado".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let resp = ApiError::Unauthorized("Credenciales inválidas".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = ApiError::NotFound("Usuario no encontrado".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_maps_to_500_with_generic_message() {
        let resp = ApiError::Internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn body_is_the_ok_false_envelope() {
        let resp = ApiError::NotFound("Usuario no encontrado".into()).into_response();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], false);
        assert_eq!(body["message"], "Usuario no encontrado");
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let resp = ApiError::Internal(anyhow::anyhow!("password=hunter2")).into_response();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Error interno del servidor");
    }
}
