//! Integration tests for the catalog and course authoring endpoints

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value};

fn titles(body: &Value) -> Vec<String> {
    body["courses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_course_title_length_bounds() {
    let (app, _db) = create_test_app().await;
    register(&app, "tutor", true, false).await;
    let token = login(&app, "tutor", "tutor").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "Rust", "difficulty": "Beginner", "language": "English" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "Rusty", "difficulty": "Beginner", "language": "English" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["course"]["title"], "Rusty");
    assert!(body["course"]["id"].as_str().unwrap().starts_with("CRS"));
}

#[tokio::test]
async fn test_tutee_cannot_create_course() {
    let (app, _db) = create_test_app().await;
    register(&app, "student", false, true).await;
    let token = login(&app, "student", "tutee").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "Sneaky Course", "difficulty": "Beginner", "language": "English" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_creator_is_listed_as_instructor() {
    let (app, _db) = create_test_app().await;
    let tutor_id = register(&app, "tutor", true, false).await;
    let token = login(&app, "tutor", "tutor").await;
    let course_id = create_course(&app, &token, "Python Basics", "Beginner").await;

    let (status, body) = send(&app, "GET", &format!("/api/courses/{course_id}"), None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course"]["title"], "Python Basics");
    let instructors = body["instructors"].as_array().unwrap();
    assert_eq!(instructors.len(), 1);
    assert_eq!(instructors[0], tutor_id.as_str());
}

#[tokio::test]
async fn test_catalog_search_and_difficulty_filter() {
    let (app, _db) = create_test_app().await;
    register(&app, "tutor", true, false).await;
    let token = login(&app, "tutor", "tutor").await;

    create_course(&app, &token, "Python Basics", "Beginner").await;
    create_course(&app, &token, "Advanced Python", "Advanced").await;
    create_course(&app, &token, "Advanced Rust", "Advanced").await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/courses?search=python&difficulty=Advanced",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Advanced Python"]);

    let (status, body) = send(&app, "GET", "/api/courses?difficulty=All", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_catalog_sorting() {
    let (app, _db) = create_test_app().await;
    register(&app, "tutor", true, false).await;
    let token = login(&app, "tutor", "tutor").await;

    create_course(&app, &token, "Beta Course", "Beginner").await;
    create_course(&app, &token, "Alpha Course", "Beginner").await;
    create_course(&app, &token, "Gamma Course", "Beginner").await;

    let (_, body) = send(&app, "GET", "/api/courses", None, None).await;
    assert_eq!(titles(&body), vec!["Beta Course", "Alpha Course", "Gamma Course"]);

    let (_, body) = send(&app, "GET", "/api/courses?sort=title_asc", None, None).await;
    assert_eq!(titles(&body), vec!["Alpha Course", "Beta Course", "Gamma Course"]);

    let (_, body) = send(&app, "GET", "/api/courses?sort=title_desc", None, None).await;
    assert_eq!(titles(&body), vec!["Gamma Course", "Beta Course", "Alpha Course"]);
}

#[tokio::test]
async fn test_catalog_rejects_unknown_difficulty() {
    let (app, _db) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/courses?difficulty=Expert", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_course_code() {
    let (app, _db) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/courses/not-a-code", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ID");
}

#[tokio::test]
async fn test_unknown_course_is_not_found() {
    let (app, _db) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/courses/CRS99999", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_prerequisite_rules() {
    let (app, _db) = create_test_app().await;
    register(&app, "tutor", true, false).await;
    let token = login(&app, "tutor", "tutor").await;

    let basics = create_course(&app, &token, "Python Basics", "Beginner").await;
    let data = create_course(&app, &token, "Data Science", "Intermediate").await;
    let uri = format!("/api/courses/{data}/prerequisites");

    // A course cannot require itself
    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(&token),
        Some(json!({ "required_course_id": data })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(&token),
        Some(json!({ "required_course_id": basics })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(&token),
        Some(json!({ "required_course_id": basics })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(&token),
        Some(json!({ "required_course_id": "CRS99999" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body["prerequisites"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["course_id"], basics.as_str());
    assert_eq!(listed[0]["title"], "Python Basics");
}

#[tokio::test]
async fn test_unassigned_tutor_cannot_edit_course() {
    let (app, _db) = create_test_app().await;
    register(&app, "owner", true, false).await;
    register(&app, "other", true, false).await;
    let owner = login(&app, "owner", "tutor").await;
    let other = login(&app, "other", "tutor").await;

    let course_id = create_course(&app, &owner, "Owned Course", "Beginner").await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/courses/{course_id}"),
        Some(&other),
        Some(json!({ "title": "Hijacked Course" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/courses/{course_id}"),
        Some(&owner),
        Some(json!({ "title": "Renamed Course" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course"]["title"], "Renamed Course");
}

#[tokio::test]
async fn test_modules_are_listed_in_position_order() {
    let (app, _db) = create_test_app().await;
    register(&app, "tutor", true, false).await;
    let token = login(&app, "tutor", "tutor").await;
    let course_id = create_course(&app, &token, "Python Basics", "Beginner").await;

    create_module(&app, &token, &course_id, "Getting Started").await;
    create_module(&app, &token, &course_id, "Control Flow").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/courses/{course_id}/modules"),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let modules = body["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0]["title"], "Getting Started");
    assert_eq!(modules[0]["position"], 1);
    assert_eq!(modules[1]["position"], 2);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _db) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Mudemy API");
    assert!(body["paths"].get("/api/enroll").is_some());
}
