//! # Server Module
//!
//! HTTP server setup and route configuration for the auth server.

use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::jwt::JwtService;
use crate::config::Config;
use crate::database::connection::DatabaseConnection;
use crate::routes::health::health;
use crate::services::{AuthService, UserService};

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
}

/// Starts the auth HTTP server.
///
/// Loads configuration (fatal if incomplete), connects the database pool,
/// runs migrations, wires the services, and serves the router. The
/// document-store URI is validated here but backs no endpoint.
pub async fn start() {
    let config = Config::from_env().expect("Failed to load configuration from environment");

    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.expires_in));

    let db = Arc::new(
        DatabaseConnection::new(config.database.clone())
            .await
            .expect("Failed to connect to PostgreSQL"),
    );
    db.migrate().await.expect("Failed to run database migrations");

    // The document store is an external collaborator no handler touches;
    // its URI is still required so a misconfigured deploy fails at startup.
    // Credentials are stripped before logging.
    let mongo_host = config.mongo.uri.split('@').next_back().unwrap_or("configured");
    tracing::info!("🗄️  Document store: {}", mongo_host);

    let app_state = AppState {
        auth: AuthService::new(db.clone(), jwt_service.clone()),
        users: UserService::new(db.clone()),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .merge(crate::routes::auth::create_auth_routes(jwt_service.clone()))
        .merge(crate::routes::users::create_user_routes(jwt_service.clone()))
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(app_state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.server.port));

    let listener = TcpListener::bind(addr).await.expect(
        "Failed to bind to address - port may already be in use"
    );

    tracing::info!("🚀 Auth Server starting...");
    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 Health check available at http://{}/api/health", addr);
    tracing::info!("🔐 Auth endpoints available at http://{}/api/auth/*", addr);
    tracing::info!("👤 User endpoints available at http://{}/api/users/*", addr);

    axum::serve(listener, app).await.unwrap();
}
