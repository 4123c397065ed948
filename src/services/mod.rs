//! # Services Module
//!
//! Business logic services for the auth server. Services own no
//! connections themselves; the database pool and JWT service are
//! constructed at startup and handed in explicitly.

pub mod auth;
pub mod users;

pub use auth::AuthService;
pub use users::UserService;
