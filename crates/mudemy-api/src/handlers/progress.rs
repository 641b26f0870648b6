//! Lesson takes, progress and the student dashboard

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use mudemy_core::{average_progress, CodePrefix, DashboardTab};
use mudemy_db::entities::{lesson, take, user};
use mudemy_db::queries;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;
use tracing::debug;

use super::{find_one, parse_id};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

/// Insert or overwrite the caller's take of a lesson
async fn upsert_take(
    db: &DatabaseConnection,
    user_id: &str,
    lesson_id: &str,
    is_finished: bool,
) -> Result<take::Model, ApiError> {
    find_one::<lesson::Entity, _>(db, "Lesson", lesson_id).await?;

    take::Entity::insert(take::ActiveModel {
        user_id: Set(user_id.to_string()),
        lesson_id: Set(lesson_id.to_string()),
        is_finished: Set(is_finished),
        updated_at: Set(Utc::now()),
    })
    .on_conflict(
        OnConflict::columns([take::Column::UserId, take::Column::LessonId])
            .update_columns([take::Column::IsFinished, take::Column::UpdatedAt])
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    take::Entity::find_by_id((user_id.to_string(), lesson_id.to_string()))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::Internal("Take vanished after upsert".to_string()))
}

/// Start or record a lesson for the caller
#[utoipa::path(
    post,
    path = "/api/takes",
    request_body = TakeRequest,
    responses(
        (status = 200, description = "Take recorded", body = TakeResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "progress"
)]
pub async fn record_take(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<TakeRequest>,
) -> Result<Json<TakeResponse>, ApiError> {
    let lesson_id = parse_id(&req.lesson_id, CodePrefix::Lesson)?;
    let take = upsert_take(&state.db, &auth.user_id, &lesson_id, req.is_finished).await?;

    // upsert, so the same status whether or not the row existed
    Ok(Json(TakeResponse {
        status: ResponseStatus::Success,
        take: take.into(),
    }))
}

/// Mark a lesson finished
#[utoipa::path(
    put,
    path = "/api/takes/{id}/finish",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Lesson finished", body = TakeResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "progress"
)]
pub async fn finish_take(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(lesson_id): Path<String>,
) -> Result<Json<TakeResponse>, ApiError> {
    let lesson_id = parse_id(&lesson_id, CodePrefix::Lesson)?;
    let take = upsert_take(&state.db, &auth.user_id, &lesson_id, true).await?;

    Ok(Json(TakeResponse {
        status: ResponseStatus::Updated,
        take: take.into(),
    }))
}

/// Mark a lesson unfinished
#[utoipa::path(
    put,
    path = "/api/takes/{id}/unfinish",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Lesson reopened", body = TakeResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "progress"
)]
pub async fn unfinish_take(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(lesson_id): Path<String>,
) -> Result<Json<TakeResponse>, ApiError> {
    let lesson_id = parse_id(&lesson_id, CodePrefix::Lesson)?;
    let take = upsert_take(&state.db, &auth.user_id, &lesson_id, false).await?;

    Ok(Json(TakeResponse {
        status: ResponseStatus::Updated,
        take: take.into(),
    }))
}

/// Overall lesson progress of a user
#[utoipa::path(
    get,
    path = "/api/takes/{id}/progress",
    params(
        ("id" = String, Path, description = "User code")
    ),
    responses(
        (status = 200, description = "Progress", body = ProgressResponse),
        (status = 403, description = "Students may only see their own progress", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "progress"
)]
pub async fn user_progress(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let user_id = parse_id(&user_id, CodePrefix::User)?;
    auth.require_self_or_author(&user_id)?;
    find_one::<user::Entity, _>(&state.db, "User", &user_id).await?;

    let progress = queries::user_progress(&state.db, &user_id).await?;

    Ok(Json(ProgressResponse {
        status: ResponseStatus::Success,
        user_id,
        total: progress.total,
        finished: progress.finished,
        unfinished: progress.unfinished,
        completion_rate: progress.completion_rate,
    }))
}

/// How many students started and finished a lesson
#[utoipa::path(
    get,
    path = "/api/lessons/{id}/completion",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Lesson completion", body = LessonCompletionResponse),
        (status = 403, description = "Tutors and admins only", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "progress"
)]
pub async fn lesson_completion(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<LessonCompletionResponse>, ApiError> {
    auth.require_author()?;
    let id = parse_id(&id, CodePrefix::Lesson)?;
    find_one::<lesson::Entity, _>(&state.db, "Lesson", &id).await?;

    let progress = queries::lesson_completion(&state.db, &id).await?;

    Ok(Json(LessonCompletionResponse {
        status: ResponseStatus::Success,
        lesson_id: id,
        total_students: progress.total,
        finished_students: progress.finished,
        completion_rate: progress.completion_rate,
    }))
}

/// Enrolled courses of the caller with per-course progress
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 400, description = "Unknown tab", body = ErrorResponse)
    ),
    tag = "progress"
)]
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let tab: DashboardTab = query.tab.as_deref().unwrap_or_default().parse()?;
    debug!("Dashboard for {} on tab {}", auth.user_id, tab);

    let courses: Vec<DashboardCourse> = queries::dashboard_courses(&state.db, &auth.user_id, tab)
        .await?
        .into_iter()
        .map(DashboardCourse::from)
        .collect();
    let average = average_progress(courses.iter().map(|c| c.progress));

    Ok(Json(DashboardResponse {
        status: ResponseStatus::Success,
        tab,
        courses,
        average_progress: average,
    }))
}
