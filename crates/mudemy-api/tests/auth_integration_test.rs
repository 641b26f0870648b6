//! Integration tests for registration, login and session handling

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::*;
use mudemy_db::entities::user;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_registration_stores_argon2id_hash() {
    let (app, db) = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "username": "hanguyen",
            "email": "Ha.Nguyen@Example.com",
            "password": PASSWORD,
            "full_name": "Nguyen Thu Ha",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "created");
    assert!(body["user"]["id"].as_str().unwrap().starts_with("USR"));
    assert_eq!(body["user"]["email"], "ha.nguyen@example.com");
    assert_eq!(body["user"]["is_student"], true);
    assert_eq!(body["user"]["is_instructor"], false);
    assert!(body["user"].get("password_hash").is_none());

    let stored = user::Entity::find()
        .filter(user::Column::Username.eq("hanguyen"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
    assert_ne!(stored.password_hash, PASSWORD);
}

#[tokio::test]
async fn test_registration_weak_password() {
    let (app, _db) = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "username": "weakling",
            "email": "weak@example.com",
            "password": "password",
            "full_name": "Weak Password",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_registration_requires_a_role_flag() {
    let (app, _db) = create_test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "username": "nobody",
            "email": "nobody@example.com",
            "password": PASSWORD,
            "full_name": "No Role",
            "is_instructor": false,
            "is_student": false,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_registration_duplicate_email() {
    let (app, _db) = create_test_app().await;
    register(&app, "first", false, true).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "username": "second",
            "email": "first@example.com",
            "password": PASSWORD,
            "full_name": "Second",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_login_success_returns_token_and_cookie() {
    let (app, _db) = create_test_app().await;
    register(&app, "khoa", true, false).await;

    let request = Request::builder()
        .uri("/api/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": "khoa", "password": PASSWORD, "role": "tutor" }).to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["role"], "tutor");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert!(body["user"]["last_login"].is_string());

    // The cookie alone authenticates follow-up requests
    let pair = cookie.split(';').next().unwrap().to_string();
    let request = Request::builder()
        .uri("/api/users/me")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_by_email() {
    let (app, _db) = create_test_app().await;
    register(&app, "emailer", false, true).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "username": "emailer@example.com",
            "password": PASSWORD,
            "role": "tutee",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "emailer");
}

#[tokio::test]
async fn test_login_email_ignores_case() {
    let (app, _db) = create_test_app().await;
    register(&app, "emailer", false, true).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "username": "Emailer@Example.COM",
            "password": PASSWORD,
            "role": "tutee",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "emailer");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (app, _db) = create_test_app().await;
    register(&app, "student", false, true).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "student", "password": "Wr0ng!Pass", "role": "tutee" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_with_role_not_held() {
    let (app, _db) = create_test_app().await;
    register(&app, "student", false, true).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "student", "password": PASSWORD, "role": "tutor" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_login_after_promotion() {
    let (app, db) = create_test_app().await;
    let id = register(&app, "root", false, true).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "root", "password": PASSWORD, "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    make_admin(&db, &id).await;
    let token = login(&app, "root", "admin").await;

    let (status, body) = send(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _db) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/users/me", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "MISSING_AUTH");
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let (app, _db) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/users/me", Some("not-a-jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_me_reflects_session_role() {
    let (app, _db) = create_test_app().await;
    let id = register(&app, "both", true, true).await;
    let token = login(&app, "both", "tutee").await;

    let (status, body) = send(&app, "GET", "/api/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], id.as_str());
}

#[tokio::test]
async fn test_list_roles_is_public() {
    let (app, _db) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/auth/roles", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"].as_array().unwrap().len(), 3);
}
