//! Credential hashing and session tokens for Mudemy

pub mod jwt;
pub mod password;

pub use jwt::{JwtError, JwtValidator, SessionClaims, DEFAULT_AUDIENCE, DEFAULT_ISSUER};
pub use password::{hash_password, verify_password, PasswordError};
