//! Integration tests for enrollment, progress tracking and assessments

mod common;

use axum::{http::StatusCode, Router};
use common::*;
use serde_json::json;

/// Tutor and student accounts plus their session tokens
struct Classroom {
    tutor: String,
    student: String,
    student_id: String,
}

async fn classroom(app: &Router) -> Classroom {
    register(app, "tutor", true, false).await;
    let student_id = register(app, "student", false, true).await;

    Classroom {
        tutor: login(app, "tutor", "tutor").await,
        student: login(app, "student", "tutee").await,
        student_id,
    }
}

async fn enroll(app: &Router, token: &str, course_id: &str) -> (StatusCode, serde_json::Value) {
    let payment_id = pay(app, token, 0).await;
    send(
        app,
        "POST",
        "/api/enroll",
        Some(token),
        Some(json!({ "course_id": course_id, "payment_id": payment_id })),
    )
    .await
}

async fn add_content(app: &Router, token: &str, module_id: &str, title: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/contents",
        Some(token),
        Some(json!({ "module_id": module_id, "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create content failed: {body}");

    body["content"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_enrollment_requires_completed_prerequisites() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;

    let basics = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;
    let data = create_course(&app, &class.tutor, "Data Science", "Intermediate").await;
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/courses/{data}/prerequisites"),
        Some(&class.tutor),
        Some(json!({ "required_course_id": basics })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = enroll(&app, &class.student, &data).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PREREQUISITES_NOT_MET");
    assert!(body["error"].as_str().unwrap().contains("Python Basics"));

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/courses/{data}/eligibility"),
        Some(&class.student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eligible"], false);
    assert_eq!(body["missing"][0]["course_id"], basics.as_str());

    // An active enrollment in the prerequisite is not enough
    let (status, body) = enroll(&app, &class.student, &basics).await;
    assert_eq!(status, StatusCode::CREATED);
    let enrollment_id = body["enrollment"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["enrollment"]["status"], "Active");

    let (status, _) = enroll(&app, &class.student, &data).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/enrollments/{enrollment_id}/status"),
        Some(&class.tutor),
        Some(json!({ "status": "Completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/courses/{data}/eligibility"),
        Some(&class.student),
        None,
    )
    .await;
    assert_eq!(body["eligible"], true);

    let (status, _) = enroll(&app, &class.student, &data).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, "GET", "/api/users/me", Some(&class.student), None).await;
    assert_eq!(body["user"]["total_enrollments"], 2);
}

#[tokio::test]
async fn test_duplicate_enrollment_conflict() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;

    let (status, _) = enroll(&app, &class.student, &course_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = enroll(&app, &class.student, &course_id).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (_, body) = send(&app, "GET", "/api/enrollments/me", Some(&class.student), None).await;
    assert_eq!(body["total"], 1);

    let (_, body) = send(&app, "GET", "/api/users/me", Some(&class.student), None).await;
    assert_eq!(body["user"]["total_enrollments"], 1);
}

#[tokio::test]
async fn test_reenrolling_with_same_payment_conflicts() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;
    let payment_id = pay(&app, &class.student, 0).await;
    let request = json!({ "course_id": course_id, "payment_id": payment_id });

    let (status, _) = send(&app, "POST", "/api/enroll", Some(&class.student), Some(request.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/enroll", Some(&class.student), Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (_, body) = send(&app, "GET", "/api/users/me", Some(&class.student), None).await;
    assert_eq!(body["user"]["total_enrollments"], 1);
}

#[tokio::test]
async fn test_withdrawing_releases_the_course() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;

    let (status, body) = enroll(&app, &class.student, &course_id).await;
    assert_eq!(status, StatusCode::CREATED);
    let enrollment_id = body["enrollment"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/enrollments/{enrollment_id}"),
        Some(&class.student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/users/me", Some(&class.student), None).await;
    assert_eq!(body["user"]["total_enrollments"], 0);

    let (status, _) = enroll(&app, &class.student, &course_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, "GET", "/api/users/me", Some(&class.student), None).await;
    assert_eq!(body["user"]["total_enrollments"], 1);
}

#[tokio::test]
async fn test_enroll_with_someone_elses_payment() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    register(&app, "other", false, true).await;
    let other = login(&app, "other", "tutee").await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;

    let payment_id = pay(&app, &other, 100).await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/enroll",
        Some(&class.student),
        Some(json!({ "course_id": course_id, "payment_id": payment_id })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tutor_session_cannot_enroll() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;

    let (status, _) = enroll(&app, &class.tutor, &course_id).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_progress_and_dashboard() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;
    let module_id = create_module(&app, &class.tutor, &course_id, "Getting Started").await;

    let (status, _) = enroll(&app, &class.student, &course_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut lessons = Vec::new();
    for n in 1..=10 {
        lessons.push(add_content(&app, &class.tutor, &module_id, &format!("Lesson {n}")).await);
    }

    for (i, lesson_id) in lessons.iter().enumerate() {
        let (status, body) = send(
            &app,
            "POST",
            "/api/takes",
            Some(&class.student),
            Some(json!({ "lesson_id": lesson_id, "is_finished": i < 6 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
    }

    let uri = format!("/api/takes/{}/progress", class.student_id);
    let (status, body) = send(&app, "GET", &uri, Some(&class.student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);
    assert_eq!(body["finished"], 6);
    assert_eq!(body["unfinished"], 4);
    assert_eq!(body["completion_rate"], 60.0);

    // Recording a take twice updates the existing row
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/takes/{}/finish", lessons[9]),
        Some(&class.student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["take"]["is_finished"], true);

    let (_, body) = send(&app, "GET", &uri, Some(&class.student), None).await;
    assert_eq!(body["total"], 10);
    assert_eq!(body["finished"], 7);

    let (status, body) = send(
        &app,
        "GET",
        "/api/dashboard?tab=in-progress",
        Some(&class.student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["courses"].as_array().unwrap().len(), 1);
    assert_eq!(body["courses"][0]["progress"], 70.0);
    assert_eq!(body["average_progress"], 70.0);

    let (_, body) = send(
        &app,
        "GET",
        "/api/dashboard?tab=completed",
        Some(&class.student),
        None,
    )
    .await;
    assert!(body["courses"].as_array().unwrap().is_empty());

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/lessons/{}/completion", lessons[0]),
        Some(&class.tutor),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_students"], 1);
    assert_eq!(body["finished_students"], 1);
}

#[tokio::test]
async fn test_students_cannot_read_each_others_progress() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    register(&app, "other", false, true).await;
    let other = login(&app, "other", "tutee").await;

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/takes/{}/progress", class.student_id),
        Some(&other),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_quiz_attempt_limit_and_grading() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;
    let module_id = create_module(&app, &class.tutor, &course_id, "Getting Started").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/quizzes",
        Some(&class.tutor),
        Some(json!({ "module_id": module_id, "title": "Warm-up quiz", "max_attempts": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let quiz_id = body["quiz"]["id"].as_str().unwrap().to_string();
    assert!(quiz_id.starts_with("LES"));

    let submit_uri = format!("/api/quizzes/{quiz_id}/submit");
    let mut submissions = Vec::new();
    for attempt in 1..=2 {
        let (status, body) = send(
            &app,
            "POST",
            &submit_uri,
            Some(&class.student),
            Some(json!({ "content": format!("attempt {attempt}") })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        submissions.push(body["submission"]["id"].as_str().unwrap().to_string());
    }

    let (status, body) = send(
        &app,
        "POST",
        &submit_uri,
        Some(&class.student),
        Some(json!({ "content": "attempt 3" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    // Grades outside 0..=10 are rejected
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/quiz-submissions/{}/grade", submissions[0]),
        Some(&class.tutor),
        Some(json!({ "grade": 11.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for (id, grade) in submissions.iter().zip([6.0, 9.0]) {
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/quiz-submissions/{id}/grade"),
            Some(&class.tutor),
            Some(json!({ "grade": grade })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/modules/{module_id}/quiz-stats"),
        Some(&class.tutor),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["quizzes"][0];
    assert_eq!(stats["submissions"], 2);
    assert_eq!(stats["average_grade"], 7.5);
    assert_eq!(stats["highest_grade"], 9.0);
    assert_eq!(stats["lowest_grade"], 6.0);
}

#[tokio::test]
async fn test_question_answers_hidden_from_students() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;
    let module_id = create_module(&app, &class.tutor, &course_id, "Getting Started").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/quizzes",
        Some(&class.tutor),
        Some(json!({ "module_id": module_id, "title": "Warm-up quiz" })),
    )
    .await;
    let quiz_id = body["quiz"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/quizzes/{quiz_id}/questions");

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(&class.tutor),
        Some(json!({ "content": "What does len([1, 2]) return?", "correct_answer": "2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, "GET", &uri, Some(&class.tutor), None).await;
    assert_eq!(body["questions"][0]["correct_answer"], "2");

    let (_, body) = send(&app, "GET", &uri, Some(&class.student), None).await;
    assert!(body["questions"][0].get("correct_answer").is_none());
}

#[tokio::test]
async fn test_certificate_requires_completion() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;

    let (_, body) = enroll(&app, &class.student, &course_id).await;
    let enrollment_id = body["enrollment"]["id"].as_str().unwrap().to_string();

    let request = json!({ "course_id": course_id, "student_id": class.student_id });
    let (status, _) = send(
        &app,
        "POST",
        "/api/certificates",
        Some(&class.tutor),
        Some(request.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(
        &app,
        "PUT",
        &format!("/api/enrollments/{enrollment_id}/status"),
        Some(&class.tutor),
        Some(json!({ "status": "Completed" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/certificates",
        Some(&class.tutor),
        Some(request.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["certificate"]["certificate_number"]
        .as_str()
        .unwrap()
        .starts_with("MUD-"));

    let (status, _) = send(&app, "POST", "/api/certificates", Some(&class.tutor), Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, "GET", "/api/certificates/me", Some(&class.student), None).await;
    assert_eq!(body["certificates"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_bulk_provide_skips_existing_links() {
    let (app, _db) = create_test_app().await;
    let class = classroom(&app).await;
    let course_id = create_course(&app, &class.tutor, "Python Basics", "Beginner").await;
    let module_id = create_module(&app, &class.tutor, &course_id, "Getting Started").await;
    let first = add_content(&app, &class.tutor, &module_id, "Lesson 1").await;
    let second = add_content(&app, &class.tutor, &module_id, "Lesson 2").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/resources",
        Some(&class.tutor),
        Some(json!({
            "file_name": "cheatsheet.pdf",
            "file_link": "https://example.com/cheatsheet.pdf",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let resource_id = body["resource"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/resources/provide",
        Some(&class.tutor),
        Some(json!({ "resource_id": resource_id, "lesson_id": first })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/resources/provide/bulk",
        Some(&class.tutor),
        Some(json!({ "resource_id": resource_id, "lesson_ids": [first, second] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["provided"], json!([second]));
    assert_eq!(body["skipped"], json!([first]));

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/lessons/{second}/resources"),
        Some(&class.student),
        None,
    )
    .await;
    assert_eq!(body["resources"][0]["id"], resource_id.as_str());
}
