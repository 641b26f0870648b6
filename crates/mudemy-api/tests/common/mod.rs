//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use mudemy_api::{ApiServer, ApiServerConfig};
use mudemy_db::entities::user;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use sea_orm::sea_query::Expr;
use serde_json::{json, Value};
use tower::ServiceExt; // For `oneshot` method

pub const PASSWORD: &str = "Str0ng!Pass";

/// Helper to create an in-memory database with migrations applied
pub async fn create_test_db() -> DatabaseConnection {
    let db = mudemy_db::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    mudemy_db::migrate(&db)
        .await
        .expect("Failed to run migrations");

    db
}

/// Helper to build the router over a fresh database
pub async fn create_test_app() -> (Router, DatabaseConnection) {
    let db = create_test_db().await;
    let config = ApiServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(), // Random port
        enable_cors: true,
        cors_origins: None,
        jwt_secret: "test-secret".to_string(),
        session_hours: 24,
    };

    let app = ApiServer::new(config, db.clone()).build_router();
    (app, db)
}

/// Send one request and decode the JSON body (`Null` when empty)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

/// Register an account and return its user code
pub async fn register(app: &Router, username: &str, instructor: bool, student: bool) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": PASSWORD,
            "full_name": username,
            "is_instructor": instructor,
            "is_student": student,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    body["user"]["id"].as_str().unwrap().to_string()
}

/// Log in and return the session token
pub async fn login(app: &Router, username: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "username": username,
            "password": PASSWORD,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    body["token"].as_str().unwrap().to_string()
}

/// Registration never grants admin, so tests flip the flag directly
pub async fn make_admin(db: &DatabaseConnection, user_id: &str) {
    user::Entity::update_many()
        .col_expr(user::Column::IsAdmin, Expr::value(true))
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await
        .unwrap();
}

/// Create a course as `token` and return its code
pub async fn create_course(app: &Router, token: &str, title: &str, difficulty: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/courses",
        Some(token),
        Some(json!({
            "title": title,
            "difficulty": difficulty,
            "language": "English",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create course failed: {body}");

    body["course"]["id"].as_str().unwrap().to_string()
}

/// Create a module in `course_id` and return its code
pub async fn create_module(app: &Router, token: &str, course_id: &str, title: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/courses/{course_id}/modules"),
        Some(token),
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create module failed: {body}");

    body["module"]["id"].as_str().unwrap().to_string()
}

/// Record a payment as `token` and return its code
pub async fn pay(app: &Router, token: &str, amount: i64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/payments",
        Some(token),
        Some(json!({ "amount": amount, "method": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "payment failed: {body}");

    body["payment"]["id"].as_str().unwrap().to_string()
}
