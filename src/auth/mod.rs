//! # Authentication Module
//!
//! Handles JWT token issuance, validation, and middleware for securing API
//! endpoints. Tokens are stateless: validity is purely a function of the
//! signature and the expiry claim, so revocation before expiry is not
//! possible by design.

pub mod jwt;
pub mod middleware;
pub mod models;
