//! # Auth Server
//!
//! Authentication and user-management HTTP API built with Rust, Axum, and
//! Tokio. Users register and log in with email + password; sessions are
//! stateless JWTs validated on every protected request.
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: Core server initialization and route registration
//! - `config`: Environment variable configuration management
//! - `auth`: JWT issuance/validation and the request authentication gate
//! - `database`: PostgreSQL pool, models, and migrations
//! - `services`: Business logic (auth flows, user CRUD)
//! - `routes`: HTTP route handlers organized by functionality
//! - `errors`: The error taxonomy and its single HTTP mapping point
//!
//! ## Environment Setup
//! Copy `.env.example` to `.env` and configure:
//! ```bash
//! cp .env.example .env
//! # Edit .env with your database credentials and JWT secret
//! ```
//!
//! ## Running the Server
//! ```bash
//! cargo run
//! ```
//!
//! The server starts on `http://0.0.0.0:4001` by default.
//!
//! ## Health Check
//! ```bash
//! curl http://localhost:4001/api/health
//! ```

mod server;
mod routes;
mod auth;
mod database;
mod services;
mod errors;
mod config;

use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

/// Application entry point.
///
/// Loads `.env`, initializes the tracing subscriber, and starts the HTTP
/// server. Runs until the process is terminated. Missing required
/// configuration is fatal at startup; the process never serves requests
/// without a signing secret or database credentials.
#[tokio::main]
async fn main() {
    // .env is optional; real deployments set variables directly
    dotenv::dotenv().ok();

    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::fmt
                ::layer()
                .with_target(false)
                .compact()
        )
        .init();

    tracing::info!("🏁 Starting Auth Server...");
    tracing::info!("📦 Package: {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("🏗️  Build profile: {}", if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    });

    server::start().await;
}
