//! Assignments, quizzes, questions, answers, submissions and grading

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use mudemy_core::{validation, CodePrefix};
use mudemy_db::entities::{
    answer, assignment, assignment_submission, lesson, lesson::LessonType, module, question, quiz,
    quiz_submission,
};
use mudemy_db::{next_code, queries};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::info;

use super::{find_one, managed_module, parse_id};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

/// Delete the lesson row behind an assignment or quiz; the rest cascades
async fn delete_lesson(db: &DatabaseConnection, id: &str) -> Result<(), ApiError> {
    lesson::Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(())
}

fn check_deadline(deadline: Option<chrono::DateTime<Utc>>) -> Result<(), ApiError> {
    match deadline {
        Some(deadline) if deadline < Utc::now() => Err(ApiError::Validation(format!(
            "The deadline ({}) has passed",
            deadline.to_rfc3339()
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

/// Assignments of a module
#[utoipa::path(
    get,
    path = "/api/modules/{id}/assignments",
    params(
        ("id" = String, Path, description = "Module code")
    ),
    responses(
        (status = 200, description = "Assignments", body = AssignmentList),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn list_assignments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AssignmentList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Module)?;
    find_one::<module::Entity, _>(&state.db, "Module", &id).await?;

    let assignments = assignment::Entity::find()
        .filter(assignment::Column::ModuleId.eq(id.as_str()))
        .order_by_asc(assignment::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Assignment::from)
        .collect();

    Ok(Json(AssignmentList {
        status: ResponseStatus::Success,
        module_id: id,
        assignments,
    }))
}

/// Create an assignment lesson
#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentRequest,
    responses(
        (status = 201, description = "Assignment created", body = AssignmentResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), ApiError> {
    let module_id = parse_id(&req.module_id, CodePrefix::Module)?;
    validation::validate_required("title", &req.title)?;
    managed_module(&state.db, &auth, &module_id).await?;

    let txn = state.db.begin().await?;
    let id = next_code(&txn, CodePrefix::Lesson).await?;

    lesson::ActiveModel {
        id: Set(id.clone()),
        module_id: Set(module_id.clone()),
        kind: Set(LessonType::Assignment),
    }
    .insert(&txn)
    .await?;

    let created = assignment::ActiveModel {
        id: Set(id),
        module_id: Set(module_id),
        title: Set(req.title.trim().to_string()),
        description: Set(req.description),
        deadline: Set(req.deadline),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("Assignment {} created in {}", created.id, created.module_id);

    Ok((
        StatusCode::CREATED,
        Json(AssignmentResponse {
            status: ResponseStatus::Created,
            assignment: created.into(),
        }),
    ))
}

/// Get an assignment
#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Assignment", body = AssignmentResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn get_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    let found = find_one::<assignment::Entity, _>(&state.db, "Assignment", &id).await?;

    Ok(Json(AssignmentResponse {
        status: ResponseStatus::Success,
        assignment: found.into(),
    }))
}

/// Update an assignment
#[utoipa::path(
    put,
    path = "/api/assignments/{id}",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    request_body = UpdateAssignmentRequest,
    responses(
        (status = 200, description = "Assignment updated", body = AssignmentResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn update_assignment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAssignmentRequest>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    let found = find_one::<assignment::Entity, _>(&state.db, "Assignment", &id).await?;
    managed_module(&state.db, &auth, &found.module_id).await?;

    let mut active = found.into_active_model();
    if let Some(title) = req.title {
        validation::validate_required("title", &title)?;
        active.title = Set(title.trim().to_string());
    }
    if req.description.is_some() {
        active.description = Set(req.description);
    }
    if req.deadline.is_some() {
        active.deadline = Set(req.deadline);
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(AssignmentResponse {
        status: ResponseStatus::Updated,
        assignment: updated.into(),
    }))
}

/// Delete an assignment with its submissions
#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Assignment deleted", body = MessageResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn delete_assignment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    let found = find_one::<assignment::Entity, _>(&state.db, "Assignment", &id).await?;
    managed_module(&state.db, &auth, &found.module_id).await?;

    delete_lesson(&state.db, &id).await?;
    info!("Assignment {} deleted by {}", id, auth.user_id);

    Ok(Json(MessageResponse::new(
        ResponseStatus::Deleted,
        format!("Assignment '{id}' deleted"),
    )))
}

/// Hand in an assignment
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/submit",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Submission stored", body = SubmissionResponse),
        (status = 400, description = "Deadline passed or empty submission", body = ErrorResponse),
        (status = 403, description = "Only students submit", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn submit_assignment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    auth.require_tutee()?;
    let id = parse_id(&id, CodePrefix::Lesson)?;
    validation::validate_required("content", &req.content)?;

    let found = find_one::<assignment::Entity, _>(&state.db, "Assignment", &id).await?;
    check_deadline(found.deadline)?;

    let submission_id = next_code(&state.db, CodePrefix::AssignmentSubmission).await?;
    let created = assignment_submission::ActiveModel {
        id: Set(submission_id),
        assignment_id: Set(id),
        user_id: Set(auth.user_id.clone()),
        content: Set(req.content),
        grade: Set(None),
        submitted_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    info!("{} submitted assignment {}", auth.user_id, created.assignment_id);
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            status: ResponseStatus::Submitted,
            submission: created.into(),
        }),
    ))
}

/// Grade an assignment submission
#[utoipa::path(
    put,
    path = "/api/assignment-submissions/{id}/grade",
    params(
        ("id" = String, Path, description = "Submission code")
    ),
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Submission graded", body = SubmissionResponse),
        (status = 400, description = "Grade out of range", body = ErrorResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Submission not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn grade_assignment_submission(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<GradeRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::AssignmentSubmission)?;
    validation::validate_grade(req.grade)?;

    let found =
        find_one::<assignment_submission::Entity, _>(&state.db, "Submission", &id).await?;
    let parent =
        find_one::<assignment::Entity, _>(&state.db, "Assignment", &found.assignment_id).await?;
    managed_module(&state.db, &auth, &parent.module_id).await?;

    let mut active = found.into_active_model();
    active.grade = Set(Some(req.grade));
    let graded = active.update(&state.db).await?;

    info!("Submission {} graded {}", graded.id, req.grade);
    Ok(Json(SubmissionResponse {
        status: ResponseStatus::Graded,
        submission: graded.into(),
    }))
}

// ---------------------------------------------------------------------------
// Quizzes
// ---------------------------------------------------------------------------

/// Quizzes of a module
#[utoipa::path(
    get,
    path = "/api/modules/{id}/quizzes",
    params(
        ("id" = String, Path, description = "Module code")
    ),
    responses(
        (status = 200, description = "Quizzes", body = QuizList),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn list_quizzes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<QuizList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Module)?;
    find_one::<module::Entity, _>(&state.db, "Module", &id).await?;

    let quizzes = quiz::Entity::find()
        .filter(quiz::Column::ModuleId.eq(id.as_str()))
        .order_by_asc(quiz::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Quiz::from)
        .collect();

    Ok(Json(QuizList {
        status: ResponseStatus::Success,
        module_id: id,
        quizzes,
    }))
}

/// Create a quiz lesson
#[utoipa::path(
    post,
    path = "/api/quizzes",
    request_body = CreateQuizRequest,
    responses(
        (status = 201, description = "Quiz created", body = QuizResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn create_quiz(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateQuizRequest>,
) -> Result<(StatusCode, Json<QuizResponse>), ApiError> {
    let module_id = parse_id(&req.module_id, CodePrefix::Module)?;
    validation::validate_required("title", &req.title)?;
    if req.max_attempts < 1 {
        return Err(ApiError::Validation(
            "max_attempts must be at least 1".to_string(),
        ));
    }
    if let Some(limit) = req.time_limit_secs {
        validation::validate_non_negative("time_limit_secs", limit.into())?;
    }
    managed_module(&state.db, &auth, &module_id).await?;

    let txn = state.db.begin().await?;
    let id = next_code(&txn, CodePrefix::Lesson).await?;

    lesson::ActiveModel {
        id: Set(id.clone()),
        module_id: Set(module_id.clone()),
        kind: Set(LessonType::Quiz),
    }
    .insert(&txn)
    .await?;

    let created = quiz::ActiveModel {
        id: Set(id),
        module_id: Set(module_id),
        title: Set(req.title.trim().to_string()),
        time_limit_secs: Set(req.time_limit_secs),
        max_attempts: Set(req.max_attempts),
        deadline: Set(req.deadline),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("Quiz {} created in {}", created.id, created.module_id);

    Ok((
        StatusCode::CREATED,
        Json(QuizResponse {
            status: ResponseStatus::Created,
            quiz: created.into(),
        }),
    ))
}

/// Get a quiz
#[utoipa::path(
    get,
    path = "/api/quizzes/{id}",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Quiz", body = QuizResponse),
        (status = 404, description = "Quiz not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<QuizResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    let found = find_one::<quiz::Entity, _>(&state.db, "Quiz", &id).await?;

    Ok(Json(QuizResponse {
        status: ResponseStatus::Success,
        quiz: found.into(),
    }))
}

/// Delete a quiz with its questions and submissions
#[utoipa::path(
    delete,
    path = "/api/quizzes/{id}",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Quiz deleted", body = MessageResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Quiz not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn delete_quiz(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    let found = find_one::<quiz::Entity, _>(&state.db, "Quiz", &id).await?;
    managed_module(&state.db, &auth, &found.module_id).await?;

    delete_lesson(&state.db, &id).await?;
    info!("Quiz {} deleted by {}", id, auth.user_id);

    Ok(Json(MessageResponse::new(
        ResponseStatus::Deleted,
        format!("Quiz '{id}' deleted"),
    )))
}

/// Questions of a quiz; answers are revealed to tutors and admins only
#[utoipa::path(
    get,
    path = "/api/quizzes/{id}/questions",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Questions", body = QuestionList),
        (status = 404, description = "Quiz not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<QuestionList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    find_one::<quiz::Entity, _>(&state.db, "Quiz", &id).await?;

    let reveal = auth.role.can_author();
    let questions = question::Entity::find()
        .filter(question::Column::QuizId.eq(id.as_str()))
        .order_by_asc(question::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|q| Question::from_model(q, reveal))
        .collect();

    Ok(Json(QuestionList {
        status: ResponseStatus::Success,
        quiz_id: id,
        questions,
    }))
}

/// Add a question to a quiz
#[utoipa::path(
    post,
    path = "/api/quizzes/{id}/questions",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question added", body = QuestionResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Quiz not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn add_question(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    validation::validate_required("content", &req.content)?;
    validation::validate_required("correct_answer", &req.correct_answer)?;

    let found = find_one::<quiz::Entity, _>(&state.db, "Quiz", &id).await?;
    managed_module(&state.db, &auth, &found.module_id).await?;

    let question_id = next_code(&state.db, CodePrefix::Question).await?;
    let created = question::ActiveModel {
        id: Set(question_id),
        quiz_id: Set(id),
        content: Set(req.content),
        correct_answer: Set(req.correct_answer),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(QuestionResponse {
            status: ResponseStatus::Added,
            question: Question::from_model(created, true),
        }),
    ))
}

/// Answer options of a question
#[utoipa::path(
    get,
    path = "/api/questions/{id}/answers",
    params(
        ("id" = String, Path, description = "Question code")
    ),
    responses(
        (status = 200, description = "Answers", body = AnswerList),
        (status = 404, description = "Question not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn list_answers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnswerList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Question)?;
    find_one::<question::Entity, _>(&state.db, "Question", &id).await?;

    let answers = answer::Entity::find()
        .filter(answer::Column::QuestionId.eq(id.as_str()))
        .order_by_asc(answer::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Answer::from)
        .collect();

    Ok(Json(AnswerList {
        status: ResponseStatus::Success,
        question_id: id,
        answers,
    }))
}

/// Add an answer option to a question
#[utoipa::path(
    post,
    path = "/api/questions/{id}/answers",
    params(
        ("id" = String, Path, description = "Question code")
    ),
    request_body = CreateAnswerRequest,
    responses(
        (status = 201, description = "Answer added", body = AnswerResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Question not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn add_answer(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<CreateAnswerRequest>,
) -> Result<(StatusCode, Json<AnswerResponse>), ApiError> {
    let id = parse_id(&id, CodePrefix::Question)?;
    validation::validate_required("body", &req.body)?;

    let parent = find_one::<question::Entity, _>(&state.db, "Question", &id).await?;
    let owner = find_one::<quiz::Entity, _>(&state.db, "Quiz", &parent.quiz_id).await?;
    managed_module(&state.db, &auth, &owner.module_id).await?;

    let answer_id = next_code(&state.db, CodePrefix::Answer).await?;
    let created = answer::ActiveModel {
        id: Set(answer_id),
        question_id: Set(id),
        body: Set(req.body),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AnswerResponse {
            status: ResponseStatus::Added,
            answer: created.into(),
        }),
    ))
}

/// Submit a quiz attempt
#[utoipa::path(
    post,
    path = "/api/quizzes/{id}/submit",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Attempt stored", body = SubmissionResponse),
        (status = 400, description = "Deadline passed or empty submission", body = ErrorResponse),
        (status = 403, description = "Only students submit", body = ErrorResponse),
        (status = 404, description = "Quiz not found", body = ErrorResponse),
        (status = 409, description = "No attempts left", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    auth.require_tutee()?;
    let id = parse_id(&id, CodePrefix::Lesson)?;
    validation::validate_required("content", &req.content)?;

    let found = find_one::<quiz::Entity, _>(&state.db, "Quiz", &id).await?;
    check_deadline(found.deadline)?;

    let attempts = quiz_submission::Entity::find()
        .filter(quiz_submission::Column::QuizId.eq(id.as_str()))
        .filter(quiz_submission::Column::UserId.eq(auth.user_id.as_str()))
        .count(&state.db)
        .await?;
    if attempts >= found.max_attempts.max(0) as u64 {
        return Err(ApiError::Conflict(format!(
            "All {} attempt(s) of quiz '{id}' used",
            found.max_attempts
        )));
    }

    let submission_id = next_code(&state.db, CodePrefix::QuizSubmission).await?;
    let created = quiz_submission::ActiveModel {
        id: Set(submission_id),
        quiz_id: Set(id),
        user_id: Set(auth.user_id.clone()),
        content: Set(req.content),
        grade: Set(None),
        submitted_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    info!(
        "{} submitted quiz {} (attempt {})",
        auth.user_id,
        created.quiz_id,
        attempts + 1
    );
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            status: ResponseStatus::Submitted,
            submission: created.into(),
        }),
    ))
}

/// Grade a quiz attempt
#[utoipa::path(
    put,
    path = "/api/quiz-submissions/{id}/grade",
    params(
        ("id" = String, Path, description = "Submission code")
    ),
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Attempt graded", body = SubmissionResponse),
        (status = 400, description = "Grade out of range", body = ErrorResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Submission not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn grade_quiz_submission(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<GradeRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::QuizSubmission)?;
    validation::validate_grade(req.grade)?;

    let found = find_one::<quiz_submission::Entity, _>(&state.db, "Submission", &id).await?;
    let parent = find_one::<quiz::Entity, _>(&state.db, "Quiz", &found.quiz_id).await?;
    managed_module(&state.db, &auth, &parent.module_id).await?;

    let mut active = found.into_active_model();
    active.grade = Set(Some(req.grade));
    let graded = active.update(&state.db).await?;

    Ok(Json(SubmissionResponse {
        status: ResponseStatus::Graded,
        submission: graded.into(),
    }))
}

/// Grade statistics of every quiz in a module
#[utoipa::path(
    get,
    path = "/api/modules/{id}/quiz-stats",
    params(
        ("id" = String, Path, description = "Module code"),
        QuizStatsQuery
    ),
    responses(
        (status = 200, description = "Quiz statistics", body = QuizStatsList),
        (status = 403, description = "Tutors and admins only", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "assessments"
)]
pub async fn module_quiz_stats(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Query(query): Query<QuizStatsQuery>,
) -> Result<Json<QuizStatsList>, ApiError> {
    auth.require_author()?;
    let id = parse_id(&id, CodePrefix::Module)?;
    find_one::<module::Entity, _>(&state.db, "Module", &id).await?;

    let quizzes = queries::quiz_stats(&state.db, &id, query.min_submissions.unwrap_or(0))
        .await?
        .into_iter()
        .map(QuizStats::from)
        .collect();

    Ok(Json(QuizStatsList {
        status: ResponseStatus::Success,
        module_id: id,
        quizzes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn open_or_future_deadlines_pass() {
        assert!(check_deadline(None).is_ok());
        assert!(check_deadline(Some(Utc::now() + Duration::days(1))).is_ok());
    }

    #[test]
    fn past_deadline_is_rejected() {
        let err = check_deadline(Some(Utc::now() - Duration::minutes(5))).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
