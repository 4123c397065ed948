// # Routes Module
//
// - This module contains all HTTP route handlers for the auth server.
// - Routes are organized by functionality into separate submodules.
// - Handlers translate between the HTTP surface and the services; they
//   hold no business logic of their own and forward failures untouched
//   to the error boundary.

/// Health check endpoint
pub mod health;

/// Registration, login, logout, and current-user endpoints
pub mod auth;

/// User CRUD endpoints
pub mod users;
