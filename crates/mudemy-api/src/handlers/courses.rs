//! Catalog, course authoring, prerequisites, modules and content

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use mudemy_core::{
    apply_catalog, validation, CatalogQuery, CodePrefix, DifficultyFilter, Role, TitleSort,
};
use mudemy_db::entities::{
    category, content, content_media, course, instruct, lesson, lesson::LessonType, module,
    prerequisite, user,
};
use mudemy_db::{next_code, queries};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::{find_one, managed_course, managed_module, parse_id};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

fn course_list(courses: Vec<course::Model>) -> CourseList {
    let courses: Vec<Course> = courses.into_iter().map(Course::from).collect();
    CourseList {
        status: ResponseStatus::Success,
        total: courses.len(),
        courses,
    }
}

/// Browse the catalog
///
/// Fetches one page of courses, then applies search, difficulty filter and
/// title sort in that order.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CatalogParams),
    responses(
        (status = 200, description = "Courses", body = CourseList),
        (status = 400, description = "Unknown difficulty or sort order", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn list_courses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<CourseList>, ApiError> {
    debug!("Listing courses with filters: {:?}", params);

    let query = CatalogQuery {
        search: params.search.clone(),
        difficulty: params
            .difficulty
            .as_deref()
            .unwrap_or_default()
            .parse::<DifficultyFilter>()?,
        sort: params.sort.as_deref().unwrap_or_default().parse::<TitleSort>()?,
    };
    let page = ListQuery {
        offset: params.offset,
        limit: params.limit,
    };

    let fetched = course::Entity::find()
        .order_by_asc(course::Column::CreatedAt)
        .order_by_asc(course::Column::Id)
        .offset(page.offset())
        .limit(page.limit())
        .all(&state.db)
        .await?;

    Ok(Json(course_list(apply_catalog(fetched, &query))))
}

/// Search courses by title
#[utoipa::path(
    get,
    path = "/api/courses/search",
    params(CourseSearchQuery),
    responses(
        (status = 200, description = "Matching courses", body = CourseList)
    ),
    tag = "courses"
)]
pub async fn search_courses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CourseSearchQuery>,
) -> Result<Json<CourseList>, ApiError> {
    validation::validate_required("title", &query.title)?;

    let courses = course::Entity::find()
        .filter(course::Column::Title.contains(query.title.trim()))
        .order_by_asc(course::Column::Title)
        .all(&state.db)
        .await?;

    Ok(Json(course_list(courses)))
}

/// Create a course; a tutor creator becomes its instructor
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Students cannot create courses", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    auth.require_author()?;
    validation::validate_title(&req.title)?;
    validation::validate_required("language", &req.language)?;
    validation::validate_non_negative("price", req.price)?;

    let now = Utc::now();
    let txn = state.db.begin().await?;

    let id = next_code(&txn, CodePrefix::Course).await?;
    let created = course::ActiveModel {
        id: Set(id),
        title: Set(req.title.trim().to_string()),
        difficulty: Set(req.difficulty.into()),
        language: Set(req.language.trim().to_string()),
        description: Set(req.description),
        price: Set(req.price),
        created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    if auth.role == Role::Tutor {
        instruct::ActiveModel {
            user_id: Set(auth.user_id.clone()),
            course_id: Set(created.id.clone()),
            assigned_at: Set(now),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    info!("Course {} created by {}", created.id, auth.user_id);

    Ok((
        StatusCode::CREATED,
        Json(CourseResponse {
            status: ResponseStatus::Created,
            course: created.into(),
        }),
    ))
}

/// Course detail with categories, prerequisites and instructors
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Course detail", body = CourseDetailResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    let found = find_one::<course::Entity, _>(&state.db, "Course", &id).await?;

    let categories = category::Entity::find()
        .filter(category::Column::CourseId.eq(id.as_str()))
        .order_by_asc(category::Column::Category)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|c| c.category)
        .collect();

    let prerequisites = queries::declared_prerequisites(&state.db, &id)
        .await?
        .into_iter()
        .map(|p| p.course_id)
        .collect();

    let instructors = instruct::Entity::find()
        .filter(instruct::Column::CourseId.eq(id.as_str()))
        .order_by_asc(instruct::Column::AssignedAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|i| i.user_id)
        .collect();

    Ok(Json(CourseDetailResponse {
        status: ResponseStatus::Success,
        course: found.into(),
        categories,
        prerequisites,
        instructors,
    }))
}

/// Update a course (assigned tutor or admin)
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn update_course(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    let found = managed_course(&state.db, &auth, &id).await?;
    let mut active = found.into_active_model();

    if let Some(title) = req.title {
        validation::validate_title(&title)?;
        active.title = Set(title.trim().to_string());
    }
    if let Some(language) = req.language {
        validation::validate_required("language", &language)?;
        active.language = Set(language.trim().to_string());
    }
    if let Some(price) = req.price {
        validation::validate_non_negative("price", price)?;
        active.price = Set(price);
    }
    if let Some(difficulty) = req.difficulty {
        active.difficulty = Set(difficulty.into());
    }
    if req.description.is_some() {
        active.description = Set(req.description);
    }

    let updated = active.update(&state.db).await?;
    info!("Course {} updated by {}", updated.id, auth.user_id);

    Ok(Json(CourseResponse {
        status: ResponseStatus::Updated,
        course: updated.into(),
    }))
}

/// Delete a course and its material (assigned tutor or admin)
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn delete_course(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    managed_course(&state.db, &auth, &id).await?;

    course::Entity::delete_by_id(id.clone())
        .exec(&state.db)
        .await?;

    info!("Course {} deleted by {}", id, auth.user_id);
    Ok(Json(MessageResponse::new(
        ResponseStatus::Deleted,
        format!("Course '{id}' deleted"),
    )))
}

/// Categories of a course
#[utoipa::path(
    get,
    path = "/api/courses/{id}/categories",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Categories", body = CategoryList),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    find_one::<course::Entity, _>(&state.db, "Course", &id).await?;

    let categories = category::Entity::find()
        .filter(category::Column::CourseId.eq(id.as_str()))
        .order_by_asc(category::Column::Category)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|c| c.category)
        .collect();

    Ok(Json(CategoryList {
        status: ResponseStatus::Success,
        course_id: id,
        categories,
    }))
}

/// Tag a course with a category
#[utoipa::path(
    post,
    path = "/api/courses/{id}/categories",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category added", body = MessageResponse),
        (status = 409, description = "Category already present", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn add_category(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    validation::validate_required("category", &req.category)?;
    managed_course(&state.db, &auth, &id).await?;

    let value = req.category.trim().to_string();
    if category::Entity::find_by_id((id.clone(), value.clone()))
        .one(&state.db)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "Course '{id}' already has category '{value}'"
        )));
    }

    category::ActiveModel {
        course_id: Set(id.clone()),
        category: Set(value.clone()),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            ResponseStatus::Added,
            format!("Category '{value}' added to course '{id}'"),
        )),
    ))
}

/// Declared prerequisites of a course
#[utoipa::path(
    get,
    path = "/api/courses/{id}/prerequisites",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Prerequisites in declaration order", body = PrerequisiteList),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn list_prerequisites(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PrerequisiteList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    find_one::<course::Entity, _>(&state.db, "Course", &id).await?;

    let prerequisites = queries::declared_prerequisites(&state.db, &id).await?;

    Ok(Json(PrerequisiteList {
        status: ResponseStatus::Success,
        course_id: id,
        prerequisites,
    }))
}

/// Declare a prerequisite
#[utoipa::path(
    post,
    path = "/api/courses/{id}/prerequisites",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    request_body = PrerequisiteRequest,
    responses(
        (status = 201, description = "Prerequisite added", body = MessageResponse),
        (status = 400, description = "Course cannot require itself", body = ErrorResponse),
        (status = 404, description = "Course or required course not found", body = ErrorResponse),
        (status = 409, description = "Prerequisite already declared", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn add_prerequisite(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<PrerequisiteRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    let required = parse_id(&req.required_course_id, CodePrefix::Course)?;
    validation::validate_prerequisite(&id, &required)?;

    managed_course(&state.db, &auth, &id).await?;
    find_one::<course::Entity, _>(&state.db, "Course", &required).await?;

    if prerequisite::Entity::find_by_id((id.clone(), required.clone()))
        .one(&state.db)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "Course '{id}' already requires '{required}'"
        )));
    }

    prerequisite::ActiveModel {
        course_id: Set(id.clone()),
        required_course_id: Set(required.clone()),
        declared_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    info!("Course {} now requires {}", id, required);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            ResponseStatus::Added,
            format!("Course '{id}' now requires '{required}'"),
        )),
    ))
}

/// Whether the caller may enroll in a course
#[utoipa::path(
    get,
    path = "/api/courses/{id}/eligibility",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Eligibility and missing prerequisites", body = EligibilityResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn check_eligibility(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<EligibilityResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    find_one::<course::Entity, _>(&state.db, "Course", &id).await?;

    let missing = queries::missing_prerequisites(&state.db, &id, &auth.user_id).await?;
    debug!(
        "{} is missing {} prerequisite(s) of {}",
        auth.user_id,
        missing.len(),
        id
    );

    Ok(Json(EligibilityResponse {
        status: ResponseStatus::Success,
        course_id: id,
        eligible: missing.is_empty(),
        missing,
    }))
}

/// Assign an instructor to a course
#[utoipa::path(
    post,
    path = "/api/instruct",
    request_body = InstructRequest,
    responses(
        (status = 201, description = "Instructor assigned", body = InstructResponse),
        (status = 400, description = "User is not an instructor", body = ErrorResponse),
        (status = 403, description = "Not allowed to manage this course", body = ErrorResponse),
        (status = 409, description = "Already assigned", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn assign_instructor(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<InstructRequest>,
) -> Result<(StatusCode, Json<InstructResponse>), ApiError> {
    let user_id = parse_id(&req.user_id, CodePrefix::User)?;
    let course_id = parse_id(&req.course_id, CodePrefix::Course)?;

    managed_course(&state.db, &auth, &course_id).await?;
    let instructor = find_one::<user::Entity, _>(&state.db, "User", &user_id).await?;
    if !instructor.is_instructor {
        return Err(ApiError::Validation(format!(
            "User '{user_id}' is not an instructor"
        )));
    }

    if instruct::Entity::find_by_id((user_id.clone(), course_id.clone()))
        .one(&state.db)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "User '{user_id}' already instructs course '{course_id}'"
        )));
    }

    instruct::ActiveModel {
        user_id: Set(user_id.clone()),
        course_id: Set(course_id.clone()),
        assigned_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    info!("User {} assigned to course {}", user_id, course_id);
    Ok((
        StatusCode::CREATED,
        Json(InstructResponse {
            status: ResponseStatus::Created,
            user_id,
            course_id,
        }),
    ))
}

/// Modules of a course in position order
#[utoipa::path(
    get,
    path = "/api/courses/{id}/modules",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Modules", body = ModuleList),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn list_modules(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ModuleList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    find_one::<course::Entity, _>(&state.db, "Course", &id).await?;

    let modules = module::Entity::find()
        .filter(module::Column::CourseId.eq(id.as_str()))
        .order_by_asc(module::Column::Position)
        .order_by_asc(module::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Module::from)
        .collect();

    Ok(Json(ModuleList {
        status: ResponseStatus::Success,
        course_id: id,
        modules,
    }))
}

/// Add a module to a course
#[utoipa::path(
    post,
    path = "/api/courses/{id}/modules",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    request_body = CreateModuleRequest,
    responses(
        (status = 201, description = "Module created", body = ModuleResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn create_module(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<CreateModuleRequest>,
) -> Result<(StatusCode, Json<ModuleResponse>), ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    validation::validate_required("title", &req.title)?;
    managed_course(&state.db, &auth, &id).await?;

    let position = match req.position {
        Some(position) => {
            validation::validate_non_negative("position", position.into())?;
            position
        }
        None => {
            let existing = module::Entity::find()
                .filter(module::Column::CourseId.eq(id.as_str()))
                .count(&state.db)
                .await?;
            existing as i32 + 1
        }
    };

    let module_id = next_code(&state.db, CodePrefix::Module).await?;
    let created = module::ActiveModel {
        id: Set(module_id),
        course_id: Set(id),
        title: Set(req.title.trim().to_string()),
        position: Set(position),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ModuleResponse {
            status: ResponseStatus::Created,
            module: created.into(),
        }),
    ))
}

/// Every lesson of a course, module by module
#[utoipa::path(
    get,
    path = "/api/courses/{id}/lessons",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Lessons", body = LessonList),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "courses"
)]
pub async fn list_course_lessons(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LessonList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    find_one::<course::Entity, _>(&state.db, "Course", &id).await?;

    let lessons = lesson::Entity::find()
        .inner_join(module::Entity)
        .filter(module::Column::CourseId.eq(id.as_str()))
        .order_by_asc(module::Column::Position)
        .order_by_asc(lesson::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Lesson::from)
        .collect();

    Ok(Json(LessonList {
        status: ResponseStatus::Success,
        course_id: id,
        lessons,
    }))
}

/// Create a content lesson
#[utoipa::path(
    post,
    path = "/api/contents",
    request_body = CreateContentRequest,
    responses(
        (status = 201, description = "Content created", body = ContentResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "content"
)]
pub async fn create_content(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    let module_id = parse_id(&req.module_id, CodePrefix::Module)?;
    validation::validate_required("title", &req.title)?;
    managed_module(&state.db, &auth, &module_id).await?;

    let txn = state.db.begin().await?;
    let lesson_id = next_code(&txn, CodePrefix::Lesson).await?;

    lesson::ActiveModel {
        id: Set(lesson_id.clone()),
        module_id: Set(module_id.clone()),
        kind: Set(LessonType::Content),
    }
    .insert(&txn)
    .await?;

    let created = content::ActiveModel {
        id: Set(lesson_id),
        module_id: Set(module_id),
        title: Set(req.title.trim().to_string()),
        slides: Set(req.slides),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("Content {} created in module {}", created.id, created.module_id);

    Ok((
        StatusCode::CREATED,
        Json(ContentResponse {
            status: ResponseStatus::Created,
            content: created.into(),
            media: Vec::new(),
        }),
    ))
}

/// Content lesson with its media
#[utoipa::path(
    get,
    path = "/api/contents/{id}",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Content", body = ContentResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    ),
    tag = "content"
)]
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ContentResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    let found = find_one::<content::Entity, _>(&state.db, "Content", &id).await?;

    let media = content_media::Entity::find()
        .filter(content_media::Column::ContentId.eq(id.as_str()))
        .order_by_asc(content_media::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Media::from)
        .collect();

    Ok(Json(ContentResponse {
        status: ResponseStatus::Success,
        content: found.into(),
        media,
    }))
}

/// Attach text, video or an image to a content lesson
#[utoipa::path(
    post,
    path = "/api/contents/{id}/media",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    request_body = AddMediaRequest,
    responses(
        (status = 201, description = "Media added", body = MediaResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    ),
    tag = "content"
)]
pub async fn add_media(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<AddMediaRequest>,
) -> Result<(StatusCode, Json<MediaResponse>), ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    validation::validate_required("body", &req.body)?;

    let found = find_one::<content::Entity, _>(&state.db, "Content", &id).await?;
    managed_module(&state.db, &auth, &found.module_id).await?;

    let media_id = next_code(&state.db, CodePrefix::Media).await?;
    let created = content_media::ActiveModel {
        id: Set(media_id),
        content_id: Set(id),
        kind: Set(req.kind.into()),
        body: Set(req.body),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MediaResponse {
            status: ResponseStatus::Added,
            media: created.into(),
        }),
    ))
}
