//! Shared learning resources and their attachment to lessons

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use mudemy_core::{validation, CodePrefix};
use mudemy_db::entities::{lesson, provide_resource, resource};
use mudemy_db::next_code;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::{find_one, parse_id};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

fn resource_list(rows: Vec<resource::Model>) -> ResourceList {
    let resources: Vec<Resource> = rows.into_iter().map(Resource::from).collect();
    ResourceList {
        status: ResponseStatus::Success,
        total: resources.len(),
        resources,
    }
}

/// List resources
#[utoipa::path(
    get,
    path = "/api/resources",
    params(ListQuery),
    responses(
        (status = 200, description = "Resources", body = ResourceList)
    ),
    tag = "resources"
)]
pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    Query(page): Query<ListQuery>,
) -> Result<Json<ResourceList>, ApiError> {
    let rows = resource::Entity::find()
        .order_by_asc(resource::Column::Id)
        .offset(page.offset())
        .limit(page.limit())
        .all(&state.db)
        .await?;

    Ok(Json(resource_list(rows)))
}

/// Search resources by file name
#[utoipa::path(
    get,
    path = "/api/resources/search",
    params(ResourceSearchQuery),
    responses(
        (status = 200, description = "Matching resources", body = ResourceList)
    ),
    tag = "resources"
)]
pub async fn search_resources(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceSearchQuery>,
) -> Result<Json<ResourceList>, ApiError> {
    validation::validate_required("name", &query.name)?;
    debug!("Searching resources by name: {}", query.name);

    let rows = resource::Entity::find()
        .filter(resource::Column::FileName.contains(query.name.trim()))
        .order_by_asc(resource::Column::FileName)
        .all(&state.db)
        .await?;

    Ok(Json(resource_list(rows)))
}

/// Create a resource
#[utoipa::path(
    post,
    path = "/api/resources",
    request_body = CreateResourceRequest,
    responses(
        (status = 201, description = "Resource created", body = ResourceResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Tutors and admins only", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    auth.require_author()?;
    validation::validate_required("file_name", &req.file_name)?;
    validation::validate_required("file_link", &req.file_link)?;

    let id = next_code(&state.db, CodePrefix::Resource).await?;
    let created = resource::ActiveModel {
        id: Set(id),
        file_name: Set(req.file_name.trim().to_string()),
        file_link: Set(req.file_link.trim().to_string()),
        external_link: Set(req.external_link),
    }
    .insert(&state.db)
    .await?;

    info!("Resource {} created by {}", created.id, auth.user_id);
    Ok((
        StatusCode::CREATED,
        Json(ResourceResponse {
            status: ResponseStatus::Created,
            resource: created.into(),
        }),
    ))
}

/// Get a resource
#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    params(
        ("id" = String, Path, description = "Resource code")
    ),
    responses(
        (status = 200, description = "Resource", body = ResourceResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn get_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Resource)?;
    let found = find_one::<resource::Entity, _>(&state.db, "Resource", &id).await?;

    Ok(Json(ResourceResponse {
        status: ResponseStatus::Success,
        resource: found.into(),
    }))
}

/// Update a resource
#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    params(
        ("id" = String, Path, description = "Resource code")
    ),
    request_body = UpdateResourceRequest,
    responses(
        (status = 200, description = "Resource updated", body = ResourceResponse),
        (status = 403, description = "Tutors and admins only", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn update_resource(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateResourceRequest>,
) -> Result<Json<ResourceResponse>, ApiError> {
    auth.require_author()?;
    let id = parse_id(&id, CodePrefix::Resource)?;
    let found = find_one::<resource::Entity, _>(&state.db, "Resource", &id).await?;

    let mut active = found.into_active_model();
    if let Some(file_name) = req.file_name {
        validation::validate_required("file_name", &file_name)?;
        active.file_name = Set(file_name.trim().to_string());
    }
    if let Some(file_link) = req.file_link {
        validation::validate_required("file_link", &file_link)?;
        active.file_link = Set(file_link.trim().to_string());
    }
    if req.external_link.is_some() {
        active.external_link = Set(req.external_link);
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(ResourceResponse {
        status: ResponseStatus::Updated,
        resource: updated.into(),
    }))
}

/// Delete a resource and detach it from every lesson
#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    params(
        ("id" = String, Path, description = "Resource code")
    ),
    responses(
        (status = 200, description = "Resource deleted", body = MessageResponse),
        (status = 403, description = "Tutors and admins only", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn delete_resource(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth.require_author()?;
    let id = parse_id(&id, CodePrefix::Resource)?;

    let result = resource::Entity::delete_by_id(id.clone())
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Resource", &id));
    }

    info!("Resource {} deleted by {}", id, auth.user_id);
    Ok(Json(MessageResponse::new(
        ResponseStatus::Deleted,
        format!("Resource '{id}' deleted"),
    )))
}

/// Attach a resource to a lesson
#[utoipa::path(
    post,
    path = "/api/resources/provide",
    request_body = ProvideRequest,
    responses(
        (status = 201, description = "Resource provided", body = ProvideResponse),
        (status = 403, description = "Tutors and admins only", body = ErrorResponse),
        (status = 404, description = "Resource or lesson not found", body = ErrorResponse),
        (status = 409, description = "Already provided", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn provide_resource(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<ProvideRequest>,
) -> Result<(StatusCode, Json<ProvideResponse>), ApiError> {
    auth.require_author()?;
    let resource_id = parse_id(&req.resource_id, CodePrefix::Resource)?;
    let lesson_id = parse_id(&req.lesson_id, CodePrefix::Lesson)?;

    find_one::<resource::Entity, _>(&state.db, "Resource", &resource_id).await?;
    find_one::<lesson::Entity, _>(&state.db, "Lesson", &lesson_id).await?;

    if provide_resource::Entity::find_by_id((resource_id.clone(), lesson_id.clone()))
        .one(&state.db)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "Resource '{resource_id}' is already provided to lesson '{lesson_id}'"
        )));
    }

    provide_resource::ActiveModel {
        resource_id: Set(resource_id.clone()),
        lesson_id: Set(lesson_id.clone()),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProvideResponse {
            status: ResponseStatus::Provided,
            resource_id,
            lesson_id,
        }),
    ))
}

/// Attach a resource to several lessons at once
///
/// Every lesson is checked before anything is written; lessons that already
/// have the resource are reported as skipped.
#[utoipa::path(
    post,
    path = "/api/resources/provide/bulk",
    request_body = BulkProvideRequest,
    responses(
        (status = 201, description = "Resource provided", body = BulkProvideResponse),
        (status = 400, description = "No lessons given", body = ErrorResponse),
        (status = 403, description = "Tutors and admins only", body = ErrorResponse),
        (status = 404, description = "Resource or a lesson not found", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn bulk_provide_resource(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<BulkProvideRequest>,
) -> Result<(StatusCode, Json<BulkProvideResponse>), ApiError> {
    auth.require_author()?;
    let resource_id = parse_id(&req.resource_id, CodePrefix::Resource)?;
    if req.lesson_ids.is_empty() {
        return Err(ApiError::Validation("lesson_ids must not be empty".to_string()));
    }

    let mut lesson_ids = Vec::with_capacity(req.lesson_ids.len());
    for raw in &req.lesson_ids {
        let id = parse_id(raw, CodePrefix::Lesson)?;
        if !lesson_ids.contains(&id) {
            lesson_ids.push(id);
        }
    }

    find_one::<resource::Entity, _>(&state.db, "Resource", &resource_id).await?;
    for lesson_id in &lesson_ids {
        find_one::<lesson::Entity, _>(&state.db, "Lesson", lesson_id).await?;
    }

    let txn = state.db.begin().await?;
    let mut provided = Vec::new();
    let mut skipped = Vec::new();

    for lesson_id in lesson_ids {
        let exists = provide_resource::Entity::find_by_id((resource_id.clone(), lesson_id.clone()))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            skipped.push(lesson_id);
            continue;
        }

        provide_resource::ActiveModel {
            resource_id: Set(resource_id.clone()),
            lesson_id: Set(lesson_id.clone()),
        }
        .insert(&txn)
        .await?;
        provided.push(lesson_id);
    }

    txn.commit().await?;
    info!(
        "Resource {} provided to {} lesson(s), {} skipped",
        resource_id,
        provided.len(),
        skipped.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(BulkProvideResponse {
            status: ResponseStatus::Provided,
            resource_id,
            provided,
            skipped,
        }),
    ))
}

/// Detach a resource from a lesson
#[utoipa::path(
    delete,
    path = "/api/lessons/{id}/resources/{resource_id}",
    params(
        ("id" = String, Path, description = "Lesson code"),
        ("resource_id" = String, Path, description = "Resource code")
    ),
    responses(
        (status = 200, description = "Resource removed", body = MessageResponse),
        (status = 403, description = "Tutors and admins only", body = ErrorResponse),
        (status = 404, description = "Resource not provided to this lesson", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn remove_lesson_resource(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((lesson_id, resource_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth.require_author()?;
    let lesson_id = parse_id(&lesson_id, CodePrefix::Lesson)?;
    let resource_id = parse_id(&resource_id, CodePrefix::Resource)?;

    let result = provide_resource::Entity::delete_by_id((resource_id.clone(), lesson_id.clone()))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!(
            "Resource '{resource_id}' is not provided to lesson '{lesson_id}'"
        )));
    }

    Ok(Json(MessageResponse::new(
        ResponseStatus::Deleted,
        format!("Resource '{resource_id}' removed from lesson '{lesson_id}'"),
    )))
}

/// Resources provided to a lesson
#[utoipa::path(
    get,
    path = "/api/lessons/{id}/resources",
    params(
        ("id" = String, Path, description = "Lesson code")
    ),
    responses(
        (status = 200, description = "Resources", body = ResourceList),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn list_lesson_resources(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ResourceList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Lesson)?;
    find_one::<lesson::Entity, _>(&state.db, "Lesson", &id).await?;

    let rows = resource::Entity::find()
        .inner_join(provide_resource::Entity)
        .filter(provide_resource::Column::LessonId.eq(id.as_str()))
        .order_by_asc(resource::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(resource_list(rows)))
}
