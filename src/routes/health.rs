use axum::response::Json;
use serde_json::json;

/// Health check endpoint handler.
///
/// Returns a static JSON response indicating the server is operational.
/// Used by load balancers, monitoring systems, and container orchestrators
/// to verify service availability.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/api/health`
/// - **Response**: `{"status": "OK", "message": "Server running"}`
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "message": "Server running" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "OK");
    }
}
