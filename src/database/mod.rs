//! # Database Module
//!
//! PostgreSQL integration using tokio-postgres with deadpool for async
//! connection pooling. Includes connection management, models, and
//! migrations.

pub mod connection;
pub mod models;
pub mod migrations;
