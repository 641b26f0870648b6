//! Login, logout and role listing

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use chrono::{Duration, Utc};
use mudemy_auth::{verify_password, JwtValidator, SessionClaims};
use mudemy_core::Role;
use mudemy_db::entities::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, QueryFilter, Set,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::middleware::SESSION_COOKIE;
use crate::models::*;
use crate::AppState;

fn session_cookie(token: &str, max_age_secs: i64) -> Result<HeaderValue, ApiError> {
    let cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_secs}"
    );
    HeaderValue::from_str(&cookie).map_err(|e| ApiError::Internal(format!("Invalid cookie: {e}")))
}

/// Log in under one of the user's roles
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Role not permitted for this user", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let login = req.username.trim();
    debug!("Login attempt for '{}' as {}", login, req.role);

    let found = user::Entity::find()
        .filter(
            Condition::any()
                .add(user::Column::Username.eq(login))
                .add(user::Column::Email.eq(login.to_lowercase())),
        )
        .one(&state.db)
        .await?;

    let Some(found) = found else {
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&req.password, &found.password_hash)? {
        warn!("Failed login for user {}", found.id);
        return Err(ApiError::InvalidCredentials);
    }

    if !found.permits(req.role) {
        return Err(ApiError::forbidden(format!(
            "User '{}' cannot log in as {}",
            found.username, req.role
        )));
    }

    let now = Utc::now();
    let mut active = found.into_active_model();
    active.last_login = Set(Some(now));
    let found = active.update(&state.db).await?;

    let validity = Duration::hours(state.session_hours);
    let claims = SessionClaims::new(found.id.as_str(), found.username.as_str(), req.role, validity);
    let token = JwtValidator::encode(state.jwt_secret.as_bytes(), &claims)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie(&token, validity.num_seconds())?,
    );

    info!("User {} logged in as {}", found.id, req.role);

    Ok((
        headers,
        Json(LoginResponse {
            status: ResponseStatus::Success,
            token,
            role: req.role,
            expires_at: now + validity,
            user: found.into(),
        }),
    ))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout() -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, session_cookie("", 0)?);

    Ok((
        headers,
        Json(MessageResponse::new(ResponseStatus::Success, "Logged out")),
    ))
}

/// Roles a user may log in as
#[utoipa::path(
    get,
    path = "/api/auth/roles",
    responses(
        (status = 200, description = "Available roles", body = RoleList)
    ),
    tag = "auth"
)]
pub async fn list_roles() -> Json<RoleList> {
    Json(RoleList {
        status: ResponseStatus::Success,
        roles: Role::ALL
            .iter()
            .map(|role| RoleInfo {
                role: *role,
                description: role.description().to_string(),
            })
            .collect(),
    })
}
