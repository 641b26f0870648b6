//! Registration, profiles, interests and qualifications

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use mudemy_auth::hash_password;
use mudemy_core::{validation, CodePrefix};
use mudemy_db::entities::{course, instruct, interest, qualification, user};
use mudemy_db::next_code;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::{find_one, parse_id};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

fn user_list(users: Vec<user::Model>) -> UserList {
    let users: Vec<User> = users.into_iter().map(User::from).collect();
    UserList {
        status: ResponseStatus::Success,
        total: users.len(),
        users,
    }
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let username = req.username.trim().to_string();
    let email = req.email.trim().to_lowercase();

    validation::validate_username(&username)?;
    validation::validate_email(&email)?;
    validation::validate_password(&req.password)?;
    validation::validate_required("full_name", &req.full_name)?;
    if let Some(phone) = &req.phone {
        validation::validate_phone(phone)?;
    }
    if let Some(years) = req.years_of_experience {
        validation::validate_non_negative("years_of_experience", years.into())?;
    }
    if !req.is_instructor && !req.is_student {
        return Err(ApiError::Validation(
            "A user must be an instructor, a student or both".to_string(),
        ));
    }

    let taken = user::Entity::find()
        .filter(user::Column::Username.eq(username.as_str()))
        .count(&state.db)
        .await?;
    if taken > 0 {
        return Err(ApiError::Conflict(format!("Username '{username}' is already taken")));
    }
    let taken = user::Entity::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .count(&state.db)
        .await?;
    if taken > 0 {
        return Err(ApiError::Conflict(format!("Email '{email}' is already registered")));
    }

    let password_hash = hash_password(&req.password)?;
    let id = next_code(&state.db, CodePrefix::User).await?;

    let created = user::ActiveModel {
        id: Set(id),
        username: Set(username),
        email: Set(email),
        password_hash: Set(password_hash),
        full_name: Set(req.full_name.trim().to_string()),
        city: Set(req.city),
        country: Set(req.country),
        phone: Set(req.phone),
        date_of_birth: Set(req.date_of_birth),
        last_login: Set(None),
        is_instructor: Set(req.is_instructor),
        is_student: Set(req.is_student),
        is_admin: Set(false),
        bio: Set(req.bio),
        years_of_experience: Set(req.years_of_experience),
        total_enrollments: Set(0),
        created_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    info!("Registered user {} ({})", created.id, created.username);

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            status: ResponseStatus::Created,
            user: created.into(),
        }),
    ))
}

/// Current user
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>, ApiError> {
    let me = find_one::<user::Entity, _>(&state.db, "User", &auth.user_id).await?;
    Ok(Json(UserResponse {
        status: ResponseStatus::Success,
        user: me.into(),
    }))
}

/// List users (tutors and admins)
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListQuery),
    responses(
        (status = 200, description = "Users", body = UserList),
        (status = 403, description = "Students may not list users", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(page): Query<ListQuery>,
) -> Result<Json<UserList>, ApiError> {
    auth.require_author()?;

    let users = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .offset(page.offset())
        .limit(page.limit())
        .all(&state.db)
        .await?;

    Ok(Json(user_list(users)))
}

/// Search users by full name
#[utoipa::path(
    get,
    path = "/api/users/search",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "Matching users", body = UserList)
    ),
    tag = "users"
)]
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<UserList>, ApiError> {
    validation::validate_required("name", &query.name)?;
    debug!("Searching users by name: {}", query.name);

    let users = user::Entity::find()
        .filter(user::Column::FullName.contains(query.name.trim()))
        .order_by_asc(user::Column::FullName)
        .all(&state.db)
        .await?;

    Ok(Json(user_list(users)))
}

/// Get a user
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User code")
    ),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::User)?;
    auth.require_self_or_author(&id)?;

    let found = find_one::<user::Entity, _>(&state.db, "User", &id).await?;
    Ok(Json(UserResponse {
        status: ResponseStatus::Success,
        user: found.into(),
    }))
}

/// Update a user (owner or admin)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User code")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::User)?;
    auth.require_self_or_admin(&id)?;

    let found = find_one::<user::Entity, _>(&state.db, "User", &id).await?;
    let mut active = found.into_active_model();

    if let Some(email) = req.email {
        let email = email.trim().to_lowercase();
        validation::validate_email(&email)?;
        let clash = user::Entity::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .filter(user::Column::Id.ne(id.as_str()))
            .count(&state.db)
            .await?;
        if clash > 0 {
            return Err(ApiError::Conflict(format!("Email '{email}' is already registered")));
        }
        active.email = Set(email);
    }
    if let Some(password) = req.password {
        validation::validate_password(&password)?;
        active.password_hash = Set(hash_password(&password)?);
    }
    if let Some(full_name) = req.full_name {
        validation::validate_required("full_name", &full_name)?;
        active.full_name = Set(full_name.trim().to_string());
    }
    if let Some(phone) = req.phone {
        validation::validate_phone(&phone)?;
        active.phone = Set(Some(phone));
    }
    if let Some(years) = req.years_of_experience {
        validation::validate_non_negative("years_of_experience", years.into())?;
        active.years_of_experience = Set(Some(years));
    }
    if req.city.is_some() {
        active.city = Set(req.city);
    }
    if req.country.is_some() {
        active.country = Set(req.country);
    }
    if req.date_of_birth.is_some() {
        active.date_of_birth = Set(req.date_of_birth);
    }
    if req.bio.is_some() {
        active.bio = Set(req.bio);
    }

    let updated = active.update(&state.db).await?;
    info!("Updated user {}", updated.id);

    Ok(Json(UserResponse {
        status: ResponseStatus::Updated,
        user: updated.into(),
    }))
}

/// Delete a user and everything they own (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User code")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::User)?;
    auth.require_self_or_admin(&id)?;

    let result = user::Entity::delete_by_id(id.clone()).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("User", &id));
    }

    info!("Deleted user {}", id);
    Ok(Json(MessageResponse::new(
        ResponseStatus::Deleted,
        format!("User '{id}' deleted"),
    )))
}

/// Interests of a user
#[utoipa::path(
    get,
    path = "/api/users/{id}/interests",
    params(
        ("id" = String, Path, description = "User code")
    ),
    responses(
        (status = 200, description = "Interests", body = InterestList),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_interests(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<InterestList>, ApiError> {
    let id = parse_id(&id, CodePrefix::User)?;
    let owner = find_one::<user::Entity, _>(&state.db, "User", &id).await?;

    let interests = owner
        .find_related(interest::Entity)
        .order_by_asc(interest::Column::Interest)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|i| i.interest)
        .collect();

    Ok(Json(InterestList {
        status: ResponseStatus::Success,
        user_id: id,
        interests,
    }))
}

/// Add an interest (owner or admin)
#[utoipa::path(
    post,
    path = "/api/users/{id}/interests",
    params(
        ("id" = String, Path, description = "User code")
    ),
    request_body = InterestRequest,
    responses(
        (status = 201, description = "Interest added", body = MessageResponse),
        (status = 409, description = "Interest already recorded", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn add_interest(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<InterestRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_id(&id, CodePrefix::User)?;
    auth.require_self_or_admin(&id)?;
    validation::validate_required("interest", &req.interest)?;
    find_one::<user::Entity, _>(&state.db, "User", &id).await?;

    let value = req.interest.trim().to_string();
    if interest::Entity::find_by_id((id.clone(), value.clone()))
        .one(&state.db)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!("Interest '{value}' already recorded")));
    }

    interest::ActiveModel {
        user_id: Set(id),
        interest: Set(value.clone()),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            ResponseStatus::Added,
            format!("Interest '{value}' added"),
        )),
    ))
}

/// Qualifications of a user
#[utoipa::path(
    get,
    path = "/api/users/{id}/qualifications",
    params(
        ("id" = String, Path, description = "User code")
    ),
    responses(
        (status = 200, description = "Qualifications", body = QualificationList),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_qualifications(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<QualificationList>, ApiError> {
    let id = parse_id(&id, CodePrefix::User)?;
    let owner = find_one::<user::Entity, _>(&state.db, "User", &id).await?;

    let qualifications = owner
        .find_related(qualification::Entity)
        .order_by_asc(qualification::Column::Qualification)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|q| q.qualification)
        .collect();

    Ok(Json(QualificationList {
        status: ResponseStatus::Success,
        user_id: id,
        qualifications,
    }))
}

/// Add a qualification (owner or admin)
#[utoipa::path(
    post,
    path = "/api/users/{id}/qualifications",
    params(
        ("id" = String, Path, description = "User code")
    ),
    request_body = QualificationRequest,
    responses(
        (status = 201, description = "Qualification added", body = MessageResponse),
        (status = 409, description = "Qualification already recorded", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn add_qualification(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<QualificationRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_id(&id, CodePrefix::User)?;
    auth.require_self_or_admin(&id)?;
    validation::validate_required("qualification", &req.qualification)?;
    find_one::<user::Entity, _>(&state.db, "User", &id).await?;

    let value = req.qualification.trim().to_string();
    if qualification::Entity::find_by_id((id.clone(), value.clone()))
        .one(&state.db)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "Qualification '{value}' already recorded"
        )));
    }

    qualification::ActiveModel {
        user_id: Set(id),
        qualification: Set(value.clone()),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            ResponseStatus::Added,
            format!("Qualification '{value}' added"),
        )),
    ))
}

/// Users who can teach
#[utoipa::path(
    get,
    path = "/api/instructors",
    responses(
        (status = 200, description = "Instructors", body = UserList)
    ),
    tag = "users"
)]
pub async fn list_instructors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserList>, ApiError> {
    let users = user::Entity::find()
        .filter(user::Column::IsInstructor.eq(true))
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(user_list(users)))
}

/// Users who can enroll (tutors and admins)
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students", body = UserList),
        (status = 403, description = "Students may not list students", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserList>, ApiError> {
    auth.require_author()?;

    let users = user::Entity::find()
        .filter(user::Column::IsStudent.eq(true))
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(user_list(users)))
}

/// Courses an instructor teaches
#[utoipa::path(
    get,
    path = "/api/instructors/{id}/courses",
    params(
        ("id" = String, Path, description = "Instructor user code")
    ),
    responses(
        (status = 200, description = "Courses taught", body = CourseList),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_instructor_courses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CourseList>, ApiError> {
    let id = parse_id(&id, CodePrefix::User)?;
    find_one::<user::Entity, _>(&state.db, "User", &id).await?;

    let courses: Vec<Course> = course::Entity::find()
        .inner_join(instruct::Entity)
        .filter(instruct::Column::UserId.eq(id.as_str()))
        .order_by_asc(course::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Course::from)
        .collect();

    Ok(Json(CourseList {
        status: ResponseStatus::Success,
        total: courses.len(),
        courses,
    }))
}
