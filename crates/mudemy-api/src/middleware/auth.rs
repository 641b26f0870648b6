//! Session authentication middleware
//!
//! Extracts the session JWT from the `session_token` cookie or an
//! `Authorization: Bearer` header, validates it, and makes the caller
//! available to handlers through an [`AuthUser`] request extension.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use mudemy_auth::JwtValidator;
use mudemy_core::Role;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;

/// Name of the cookie carrying the session JWT
pub const SESSION_COOKIE: &str = "session_token";

/// Authenticated caller extracted from the session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User code (USR00001)
    pub user_id: String,
    pub username: String,
    /// Role chosen at login
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Tutors and admins only
    pub fn require_author(&self) -> Result<(), ApiError> {
        if self.role.can_author() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Only tutors and admins may do this"))
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Only admins may do this"))
        }
    }

    pub fn require_tutee(&self) -> Result<(), ApiError> {
        if self.role == Role::Tutee {
            Ok(())
        } else {
            Err(ApiError::forbidden("Only students may do this"))
        }
    }

    /// The user themself or an admin
    pub fn require_self_or_admin(&self, user_id: &str) -> Result<(), ApiError> {
        if self.user_id == user_id || self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden("You may only act on your own account"))
        }
    }

    /// The user themself, a tutor or an admin
    pub fn require_self_or_author(&self, user_id: &str) -> Result<(), ApiError> {
        if self.user_id == user_id || self.role.can_author() {
            Ok(())
        } else {
            Err(ApiError::forbidden("You may only view your own records"))
        }
    }
}

/// JWT validation state shared across middleware instances
#[derive(Clone)]
pub struct JwtState {
    pub validator: Arc<JwtValidator>,
}

impl JwtState {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            validator: Arc::new(JwtValidator::new(secret)),
        }
    }
}

fn cookie_token(request: &Request) -> Option<String> {
    let cookies = request.headers().get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(|c| c.trim())
        .find_map(|c| c.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Authentication middleware for every protected route
///
/// # Errors
/// Returns 401 when the token is missing, malformed, signed with another
/// secret, or expired.
pub async fn require_auth(
    State(state): State<Arc<JwtState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // cookie first, then the Authorization header for API clients
    let token = match cookie_token(&request) {
        Some(token) => token,
        None => {
            let auth_header = request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| {
                    ApiError::MissingAuth(
                        "Missing authentication token (cookie or Authorization header)"
                            .to_string(),
                    )
                })?;

            auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| {
                    ApiError::InvalidToken(
                        "Invalid Authorization header format. Expected 'Bearer <token>'"
                            .to_string(),
                    )
                })?
                .to_string()
        }
    };

    let claims = state
        .validator
        .validate(&token)
        .map_err(|e| ApiError::InvalidToken(format!("Invalid or expired token: {}", e)))?;

    let auth_user = AuthUser {
        user_id: claims.user_id().to_string(),
        username: claims.username,
        role: claims.role,
    };

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorResponse;
    use axum::{body::Body, http::Request, http::StatusCode, middleware, routing::get, Json, Router};
    use chrono::Duration;
    use mudemy_auth::SessionClaims;
    use tower::ServiceExt; // For oneshot()

    async fn protected_handler(axum::Extension(user): axum::Extension<AuthUser>) -> Json<AuthUser> {
        Json(user)
    }

    fn create_test_app(jwt_secret: &[u8]) -> Router {
        let jwt_state = Arc::new(JwtState::new(jwt_secret));

        Router::new()
            .route("/protected", get(protected_handler))
            .layer(middleware::from_fn_with_state(jwt_state.clone(), require_auth))
            .with_state(jwt_state)
    }

    fn token_for(secret: &[u8], role: Role, validity: Duration) -> String {
        let claims = SessionClaims::new("USR00007", "thu.ha", role, validity);
        JwtValidator::encode(secret, &claims).unwrap()
    }

    async fn error_body(response: Response) -> ErrorResponse {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_auth_middleware_valid_bearer_token() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);
        let token = token_for(jwt_secret, Role::Tutee, Duration::hours(1));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let auth_user: AuthUser = serde_json::from_slice(&body).unwrap();

        assert_eq!(auth_user.user_id, "USR00007");
        assert_eq!(auth_user.username, "thu.ha");
        assert_eq!(auth_user.role, Role::Tutee);
    }

    #[tokio::test]
    async fn test_auth_middleware_prefers_cookie() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);
        let token = token_for(jwt_secret, Role::Tutor, Duration::hours(1));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Cookie", format!("theme=dark; session_token={}", token))
                    .header("Authorization", "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_auth_middleware_missing_token() {
        let app = create_test_app(b"test-secret-key");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error = error_body(response).await;
        assert_eq!(error.code.as_deref(), Some("MISSING_AUTH"));
    }

    #[tokio::test]
    async fn test_auth_middleware_invalid_bearer_format() {
        let app = create_test_app(b"test-secret-key");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", "Token abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error = error_body(response).await;
        assert!(error.error.contains("Invalid Authorization header format"));
    }

    #[tokio::test]
    async fn test_auth_middleware_expired_token() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);
        let token = token_for(jwt_secret, Role::Tutee, Duration::seconds(-120));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error = error_body(response).await;
        assert!(error.error.contains("Invalid or expired token"));
        assert_eq!(error.code.as_deref(), Some("INVALID_TOKEN"));
    }

    #[tokio::test]
    async fn test_auth_middleware_wrong_secret() {
        let app = create_test_app(b"test-secret-key");
        let token = token_for(b"wrong-secret-key", Role::Admin, Duration::hours(1));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn role_guards() {
        let tutee = AuthUser {
            user_id: "USR00003".into(),
            username: "student".into(),
            role: Role::Tutee,
        };
        assert!(tutee.require_author().is_err());
        assert!(tutee.require_self_or_admin("USR00003").is_ok());
        assert!(tutee.require_self_or_admin("USR00004").is_err());

        let admin = AuthUser {
            role: Role::Admin,
            ..tutee.clone()
        };
        assert!(admin.require_author().is_ok());
        assert!(admin.require_self_or_admin("USR00004").is_ok());
        assert!(admin.require_tutee().is_err());
    }
}
