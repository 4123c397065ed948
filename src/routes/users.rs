//! User CRUD routes, all behind the token gate

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use std::sync::Arc;

use crate::auth::jwt::JwtService;
use crate::auth::middleware::AuthMiddleware;
use crate::auth::models::UpdateUserRequest;
use crate::errors::ApiError;
use crate::server::AppState;

/// GET /api/users — list all users
pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.users.get_all().await?;
    Ok(Json(json!({ "ok": true, "data": users })))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.get_by_id(id).await?;
    Ok(Json(json!({ "ok": true, "data": user })))
}

/// PUT /api/users/{id} — full overwrite of name and email
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.update(id, payload.name, payload.email).await?;
    Ok(Json(json!({ "ok": true, "data": user })))
}

/// DELETE /api/users/{id} — hard delete
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.users.remove(id).await?;
    Ok(Json(json!({ "ok": true, "message": "Usuario eliminado" })))
}

pub fn create_user_routes(jwt_service: Arc<JwtService>) -> Router<AppState> {
    Router::new()
        .route("/api/users", get(get_all))
        .route("/api/users/{id}", get(get_by_id).put(update).delete(remove))
        .layer(middleware::from_fn_with_state(
            jwt_service,
            AuthMiddleware::validate_token,
        ))
}
