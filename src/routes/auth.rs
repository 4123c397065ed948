//! Auth routes for registration, login, logout, and current-user info

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use serde_json::json;
use std::sync::Arc;

use crate::auth::jwt::JwtService;
use crate::auth::middleware::AuthMiddleware;
use crate::auth::models::{AuthUser, LoginRequest, RegisterRequest};
use crate::errors::ApiError;
use crate::server::AppState;

/// POST /api/auth/register — create an account, 201 on success
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .auth
        .register(payload.name, payload.email, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "data": user })),
    ))
}

/// POST /api/auth/login — authenticate and mint a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, token) = state.auth.login(payload.email, payload.password).await?;

    Ok(Json(json!({
        "ok": true,
        "data": { "user": user, "token": token }
    })))
}

/// POST /api/auth/logout — stateless tokens mean there is nothing to
/// revoke server-side; the client discards its token
pub async fn logout() -> impl IntoResponse {
    Json(json!({ "ok": true, "message": "Sesión cerrada" }))
}

/// GET /api/auth/me — return the user behind the presented token
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth.get_by_id(auth_user.id).await?;
    Ok(Json(json!({ "ok": true, "data": user })))
}

pub fn create_auth_routes(jwt_service: Arc<JwtService>) -> Router<AppState> {
    // register/login are public; logout/me sit behind the token gate
    let protected = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .layer(middleware::from_fn_with_state(
            jwt_service,
            AuthMiddleware::validate_token,
        ));

    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .merge(protected)
}
