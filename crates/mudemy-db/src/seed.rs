//! Demo data for local development
//!
//! Seeding is skipped when any user already exists.

use chrono::Utc;
use mudemy_core::CodePrefix;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set,
    TransactionTrait,
};
use tracing::info;

use crate::codes::next_code;
use crate::entities::{
    content, course, course::DifficultyLevel, instruct, lesson, lesson::LessonType, module,
    prerequisite, user,
};

/// Password given to every seeded account
pub const DEMO_PASSWORD: &str = "Mudemy@2024";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub courses: usize,
    pub lessons: usize,
}

struct DemoUser {
    username: &'static str,
    full_name: &'static str,
    is_instructor: bool,
    is_student: bool,
    is_admin: bool,
}

const USERS: &[DemoUser] = &[
    DemoUser {
        username: "admin",
        full_name: "Mudemy Administrator",
        is_instructor: false,
        is_student: false,
        is_admin: true,
    },
    DemoUser {
        username: "tutor",
        full_name: "Tran Minh Khoa",
        is_instructor: true,
        is_student: false,
        is_admin: false,
    },
    DemoUser {
        username: "student",
        full_name: "Nguyen Thu Ha",
        is_instructor: false,
        is_student: true,
        is_admin: false,
    },
];

/// (title, difficulty, module titles)
const COURSES: &[(&str, DifficultyLevel, &[&str])] = &[
    (
        "Python Basics",
        DifficultyLevel::Beginner,
        &["Getting Started", "Control Flow"],
    ),
    (
        "Data Science with Python",
        DifficultyLevel::Intermediate,
        &["NumPy and Pandas", "Visualisation"],
    ),
    (
        "Advanced Python Patterns",
        DifficultyLevel::Advanced,
        &["Metaprogramming"],
    ),
];

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<SeedSummary, DbErr> {
    if user::Entity::find().count(db).await? > 0 {
        info!("Users already present, skipping demo seed");
        return Ok(SeedSummary::default());
    }

    let password_hash =
        mudemy_auth::hash_password(DEMO_PASSWORD).map_err(|e| DbErr::Custom(e.to_string()))?;

    let txn = db.begin().await?;
    let mut summary = SeedSummary::default();
    let now = Utc::now();
    let mut tutor_id = None;

    for demo in USERS {
        let id = next_code(&txn, CodePrefix::User).await?;
        user::ActiveModel {
            id: Set(id.clone()),
            username: Set(demo.username.to_string()),
            email: Set(format!("{}@mudemy.edu.vn", demo.username)),
            password_hash: Set(password_hash.clone()),
            full_name: Set(demo.full_name.to_string()),
            city: Set(Some("Ho Chi Minh City".to_string())),
            country: Set(Some("Vietnam".to_string())),
            phone: Set(None),
            date_of_birth: Set(None),
            last_login: Set(None),
            is_instructor: Set(demo.is_instructor),
            is_student: Set(demo.is_student),
            is_admin: Set(demo.is_admin),
            bio: Set(None),
            years_of_experience: Set(demo.is_instructor.then_some(5)),
            total_enrollments: Set(0),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        if demo.is_instructor {
            tutor_id = Some(id);
        }
        summary.users += 1;
    }

    let mut previous_course: Option<String> = None;
    for (title, difficulty, modules) in COURSES {
        let course_id = next_code(&txn, CodePrefix::Course).await?;
        course::ActiveModel {
            id: Set(course_id.clone()),
            title: Set(title.to_string()),
            difficulty: Set(*difficulty),
            language: Set("English".to_string()),
            description: Set(Some(format!("{title}: a Mudemy demo course"))),
            price: Set(0),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;
        summary.courses += 1;

        if let Some(tutor_id) = &tutor_id {
            instruct::ActiveModel {
                user_id: Set(tutor_id.clone()),
                course_id: Set(course_id.clone()),
                assigned_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        // each course requires the one before it
        if let Some(required) = previous_course.replace(course_id.clone()) {
            prerequisite::ActiveModel {
                course_id: Set(course_id.clone()),
                required_course_id: Set(required),
                declared_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        for (position, module_title) in modules.iter().enumerate() {
            let module_id = next_code(&txn, CodePrefix::Module).await?;
            module::ActiveModel {
                id: Set(module_id.clone()),
                course_id: Set(course_id.clone()),
                title: Set(module_title.to_string()),
                position: Set(position as i32 + 1),
            }
            .insert(&txn)
            .await?;

            let lesson_id = next_code(&txn, CodePrefix::Lesson).await?;
            lesson::ActiveModel {
                id: Set(lesson_id.clone()),
                module_id: Set(module_id.clone()),
                kind: Set(LessonType::Content),
            }
            .insert(&txn)
            .await?;

            content::ActiveModel {
                id: Set(lesson_id),
                module_id: Set(module_id),
                title: Set(format!("{module_title}: overview")),
                slides: Set(None),
            }
            .insert(&txn)
            .await?;
            summary.lessons += 1;
        }
    }

    txn.commit().await?;

    info!(
        "Seeded {} users, {} courses, {} lessons",
        summary.users, summary.courses, summary.lessons
    );
    Ok(summary)
}
