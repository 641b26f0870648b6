//! Integration tests for mudemy-db
//!
//! Runs against a real SQLite in-memory database

use chrono::{Duration, Utc};
use mudemy_core::{CodePrefix, DashboardTab};
use mudemy_db::{
    connect,
    entities::{
        course, course::DifficultyLevel, enrollment, enrollment::EnrollmentState, lesson,
        lesson::LessonType, module, payment, prerequisite, quiz, quiz_submission, take, user,
    },
    migrate, next_code, queries,
    seed::seed_demo_data,
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set,
};

async fn setup_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    migrate(&db).await.expect("Failed to run migrations");

    db
}

async fn insert_user(db: &DatabaseConnection, id: &str, username: &str) {
    user::ActiveModel {
        id: Set(id.to_string()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        password_hash: Set("$argon2id$placeholder".to_string()),
        full_name: Set(username.to_string()),
        city: Set(None),
        country: Set(None),
        phone: Set(None),
        date_of_birth: Set(None),
        last_login: Set(None),
        is_instructor: Set(false),
        is_student: Set(true),
        is_admin: Set(false),
        bio: Set(None),
        years_of_experience: Set(None),
        total_enrollments: Set(0),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert user");
}

async fn insert_course(db: &DatabaseConnection, id: &str, title: &str) {
    course::ActiveModel {
        id: Set(id.to_string()),
        title: Set(title.to_string()),
        difficulty: Set(DifficultyLevel::Beginner),
        language: Set("English".to_string()),
        description: Set(None),
        price: Set(0),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert course");
}

async fn insert_lessons(db: &DatabaseConnection, course_id: &str, module_id: &str, lesson_ids: &[&str]) {
    module::ActiveModel {
        id: Set(module_id.to_string()),
        course_id: Set(course_id.to_string()),
        title: Set("Module".to_string()),
        position: Set(1),
    }
    .insert(db)
    .await
    .expect("Failed to insert module");

    for id in lesson_ids {
        lesson::ActiveModel {
            id: Set(id.to_string()),
            module_id: Set(module_id.to_string()),
            kind: Set(LessonType::Content),
        }
        .insert(db)
        .await
        .expect("Failed to insert lesson");
    }
}

async fn insert_take(db: &DatabaseConnection, user_id: &str, lesson_id: &str, finished: bool) {
    take::ActiveModel {
        user_id: Set(user_id.to_string()),
        lesson_id: Set(lesson_id.to_string()),
        is_finished: Set(finished),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert take");
}

async fn enroll(
    db: &DatabaseConnection,
    id: &str,
    course_id: &str,
    student_id: &str,
    payment_id: &str,
    status: EnrollmentState,
) -> Result<enrollment::Model, sea_orm::DbErr> {
    if payment::Entity::find_by_id(payment_id.to_string())
        .one(db)
        .await?
        .is_none()
    {
        payment::ActiveModel {
            id: Set(payment_id.to_string()),
            user_id: Set(student_id.to_string()),
            amount: Set(0),
            method: Set("Card".to_string()),
            paid_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
    }

    enrollment::ActiveModel {
        id: Set(id.to_string()),
        course_id: Set(course_id.to_string()),
        student_id: Set(student_id.to_string()),
        payment_id: Set(payment_id.to_string()),
        status: Set(status),
        enrolled_at: Set(Utc::now()),
    }
    .insert(db)
    .await
}

#[tokio::test]
async fn test_database_connection() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let backend = db.get_database_backend();
    assert!(matches!(backend, sea_orm::DatabaseBackend::Sqlite));
}

#[tokio::test]
async fn test_migrations_run_successfully() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    assert!(migrate(&db).await.is_ok());
    // second run is a no-op
    assert!(migrate(&db).await.is_ok());
}

#[tokio::test]
async fn test_next_code_starts_at_one_and_increments() {
    let db = setup_test_db().await;

    assert_eq!(next_code(&db, CodePrefix::User).await.unwrap(), "USR00001");

    insert_user(&db, "USR00001", "first").await;
    insert_user(&db, "USR00009", "ninth").await;

    assert_eq!(next_code(&db, CodePrefix::User).await.unwrap(), "USR00010");
    assert_eq!(next_code(&db, CodePrefix::Course).await.unwrap(), "CRS00001");
}

#[tokio::test]
async fn test_missing_prerequisites_reports_only_uncompleted() {
    let db = setup_test_db().await;
    insert_user(&db, "USR00001", "student").await;
    insert_course(&db, "CRS00001", "Python Basics").await;
    insert_course(&db, "CRS00002", "Linear Algebra").await;
    insert_course(&db, "CRS00003", "Machine Learning").await;

    let now = Utc::now();
    for (offset, required) in ["CRS00001", "CRS00002"].into_iter().enumerate() {
        prerequisite::ActiveModel {
            course_id: Set("CRS00003".to_string()),
            required_course_id: Set(required.to_string()),
            declared_at: Set(now + Duration::seconds(offset as i64)),
        }
        .insert(&db)
        .await
        .unwrap();
    }

    let missing = queries::missing_prerequisites(&db, "CRS00003", "USR00001")
        .await
        .unwrap();
    assert_eq!(missing.len(), 2);
    assert_eq!(missing[0].course_id, "CRS00001");
    assert_eq!(missing[0].title, "Python Basics");

    enroll(&db, "ENR00001", "CRS00001", "USR00001", "PAY00001", EnrollmentState::Completed)
        .await
        .unwrap();

    let missing = queries::missing_prerequisites(&db, "CRS00003", "USR00001")
        .await
        .unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].course_id, "CRS00002");
}

#[tokio::test]
async fn test_active_enrollment_does_not_satisfy_prerequisite() {
    let db = setup_test_db().await;
    insert_user(&db, "USR00001", "student").await;
    insert_course(&db, "CRS00001", "Python Basics").await;
    insert_course(&db, "CRS00002", "Data Science").await;

    prerequisite::ActiveModel {
        course_id: Set("CRS00002".to_string()),
        required_course_id: Set("CRS00001".to_string()),
        declared_at: Set(Utc::now()),
    }
    .insert(&db)
    .await
    .unwrap();

    enroll(&db, "ENR00001", "CRS00001", "USR00001", "PAY00001", EnrollmentState::Active)
        .await
        .unwrap();

    let missing = queries::missing_prerequisites(&db, "CRS00002", "USR00001")
        .await
        .unwrap();
    assert_eq!(missing.len(), 1);
}

#[tokio::test]
async fn test_duplicate_enrollment_violates_unique_index() {
    let db = setup_test_db().await;
    insert_user(&db, "USR00001", "student").await;
    insert_course(&db, "CRS00001", "Python Basics").await;

    enroll(&db, "ENR00001", "CRS00001", "USR00001", "PAY00001", EnrollmentState::Active)
        .await
        .unwrap();
    let err = enroll(&db, "ENR00002", "CRS00001", "USR00001", "PAY00001", EnrollmentState::Active)
        .await
        .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn test_user_progress_six_of_ten() {
    let db = setup_test_db().await;
    insert_user(&db, "USR00001", "student").await;
    insert_course(&db, "CRS00001", "Python Basics").await;

    let lessons: Vec<String> = (1..=10).map(|i| format!("LES{i:05}")).collect();
    let refs: Vec<&str> = lessons.iter().map(String::as_str).collect();
    insert_lessons(&db, "CRS00001", "MOD00001", &refs).await;

    for (i, lesson) in refs.iter().enumerate() {
        insert_take(&db, "USR00001", lesson, i < 6).await;
    }

    let progress = queries::user_progress(&db, "USR00001").await.unwrap();
    assert_eq!(progress.total, 10);
    assert_eq!(progress.finished, 6);
    assert_eq!(progress.unfinished, 4);
    assert_eq!(progress.completion_rate, 60.0);
}

#[tokio::test]
async fn test_user_progress_without_takes_is_zero() {
    let db = setup_test_db().await;
    insert_user(&db, "USR00001", "student").await;

    let progress = queries::user_progress(&db, "USR00001").await.unwrap();
    assert_eq!(progress.total, 0);
    assert_eq!(progress.completion_rate, 0.0);
}

#[tokio::test]
async fn test_dashboard_splits_courses_by_progress() {
    let db = setup_test_db().await;
    insert_user(&db, "USR00001", "student").await;
    insert_course(&db, "CRS00001", "Python Basics").await;
    insert_course(&db, "CRS00002", "Data Science").await;
    insert_lessons(&db, "CRS00001", "MOD00001", &["LES00001", "LES00002"]).await;
    insert_lessons(&db, "CRS00002", "MOD00002", &["LES00003", "LES00004"]).await;

    enroll(&db, "ENR00001", "CRS00001", "USR00001", "PAY00001", EnrollmentState::Active)
        .await
        .unwrap();
    enroll(&db, "ENR00002", "CRS00002", "USR00001", "PAY00002", EnrollmentState::Active)
        .await
        .unwrap();

    insert_take(&db, "USR00001", "LES00001", true).await;
    insert_take(&db, "USR00001", "LES00002", true).await;
    insert_take(&db, "USR00001", "LES00003", true).await;
    insert_take(&db, "USR00001", "LES00004", false).await;

    let all = queries::dashboard_courses(&db, "USR00001", DashboardTab::All)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let completed = queries::dashboard_courses(&db, "USR00001", DashboardTab::Completed)
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].course_id, "CRS00001");
    assert_eq!(completed[0].progress, 100.0);

    let in_progress = queries::dashboard_courses(&db, "USR00001", DashboardTab::InProgress)
        .await
        .unwrap();
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].progress, 50.0);
}

#[tokio::test]
async fn test_quiz_stats_respects_min_submissions() {
    let db = setup_test_db().await;
    insert_user(&db, "USR00001", "alice").await;
    insert_user(&db, "USR00002", "bob").await;
    insert_course(&db, "CRS00001", "Python Basics").await;
    insert_lessons(&db, "CRS00001", "MOD00001", &["LES00001"]).await;

    quiz::ActiveModel {
        id: Set("LES00001".to_string()),
        module_id: Set("MOD00001".to_string()),
        title: Set("Syntax quiz".to_string()),
        time_limit_secs: Set(Some(600)),
        max_attempts: Set(3),
        deadline: Set(None),
    }
    .insert(&db)
    .await
    .unwrap();

    for (id, user, grade) in [
        ("QSB00001", "USR00001", Some(8.0)),
        ("QSB00002", "USR00002", Some(6.0)),
        ("QSB00003", "USR00002", None),
    ] {
        quiz_submission::ActiveModel {
            id: Set(id.to_string()),
            quiz_id: Set("LES00001".to_string()),
            user_id: Set(user.to_string()),
            content: Set("A,B,C".to_string()),
            grade: Set(grade),
            submitted_at: Set(Utc::now()),
        }
        .insert(&db)
        .await
        .unwrap();
    }

    let stats = queries::quiz_stats(&db, "MOD00001", 1).await.unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].submissions, 2);
    assert_eq!(stats[0].average_grade, 7.0);
    assert_eq!(stats[0].highest_grade, 8.0);
    assert_eq!(stats[0].lowest_grade, 6.0);

    let stats = queries::quiz_stats(&db, "MOD00001", 3).await.unwrap();
    assert!(stats.is_empty());
}

#[tokio::test]
async fn test_deleting_user_cascades_to_takes() {
    let db = setup_test_db().await;
    insert_user(&db, "USR00001", "student").await;
    insert_course(&db, "CRS00001", "Python Basics").await;
    insert_lessons(&db, "CRS00001", "MOD00001", &["LES00001"]).await;
    insert_take(&db, "USR00001", "LES00001", true).await;

    user::Entity::delete_by_id("USR00001".to_string())
        .exec(&db)
        .await
        .unwrap();

    assert_eq!(take::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = setup_test_db().await;

    let first = seed_demo_data(&db).await.unwrap();
    assert_eq!(first.users, 3);
    assert_eq!(first.courses, 3);

    let second = seed_demo_data(&db).await.unwrap();
    assert_eq!(second.users, 0);
    assert_eq!(user::Entity::find().count(&db).await.unwrap(), 3);
}
