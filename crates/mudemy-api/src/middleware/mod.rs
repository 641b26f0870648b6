//! API Middleware
//!
//! Middleware layers for authentication and role checks.

pub mod auth;

pub use auth::{require_auth, AuthUser, JwtState, SESSION_COOKIE};
