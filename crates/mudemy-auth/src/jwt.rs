//! Session tokens (HS256 JWT)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mudemy_core::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ISSUER: &str = "mudemy";
pub const DEFAULT_AUDIENCE: &str = "mudemy-api";

/// Claims carried in the `session_token` cookie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Subject (user id)
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
    /// Username at the time of login
    pub username: String,
    /// Role chosen at login
    pub role: Role,
}

impl SessionClaims {
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        role: Role,
        validity: Duration,
    ) -> Self {
        let now = Utc::now();
        let exp = now + validity;

        Self {
            sub: user_id.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: DEFAULT_ISSUER.to_string(),
            aud: DEFAULT_AUDIENCE.to_string(),
            username: username.into(),
            role,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Seconds until expiry, clamped at zero; used as the cookie `Max-Age`
    pub fn remaining_secs(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT encoding error: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Validates session tokens signed with the server secret
///
/// Checks the signature, expiry, issuer and audience.
#[derive(Clone)]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.set_issuer(&[DEFAULT_ISSUER]);
        validation.set_audience(&[DEFAULT_AUDIENCE]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn validate(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken,
            })?;

        // decode() allows a leeway window past exp
        if token_data.claims.is_expired() {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }

    pub fn encode(secret: &[u8], claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(secret);

        Ok(encode(&header, claims, &encoding_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &[u8] = b"test_secret_key_1234567890";

    #[test]
    fn test_session_round_trip() {
        let claims = SessionClaims::new("USR00001", "dat.pham", Role::Tutee, Duration::hours(24));
        let token = JwtValidator::encode(TEST_SECRET, &claims).unwrap();

        let decoded = JwtValidator::new(TEST_SECRET).validate(&token).unwrap();

        assert_eq!(decoded.user_id(), "USR00001");
        assert_eq!(decoded.username, "dat.pham");
        assert_eq!(decoded.role, Role::Tutee);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = SessionClaims::new("USR00002", "vinh", Role::Tutor, Duration::seconds(-10));
        assert!(claims.is_expired());
        assert_eq!(claims.remaining_secs(), 0);

        let token = JwtValidator::encode(TEST_SECRET, &claims).unwrap();
        let result = JwtValidator::new(TEST_SECRET).validate(&token);

        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = SessionClaims::new("USR00003", "admin", Role::Admin, Duration::hours(1));
        let token = JwtValidator::encode(TEST_SECRET, &claims).unwrap();

        let result = JwtValidator::new(b"another_secret").validate(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = JwtValidator::new(TEST_SECRET).validate("not.a.jwt");
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_role_serialized_lowercase() {
        let claims = SessionClaims::new("USR00004", "thu", Role::Tutor, Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "tutor");
        assert_eq!(json["aud"], DEFAULT_AUDIENCE);
    }
}
