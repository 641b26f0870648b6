//! Payments, enrollments and certificates

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use mudemy_core::{validation, CodePrefix, EntityCode};
use mudemy_db::entities::{
    certificate, course, enrollment, enrollment::EnrollmentState, payment, user,
};
use mudemy_db::{next_code, queries};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::{ensure_course_manager, find_one, managed_course, parse_id};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

fn enrollment_list(rows: Vec<enrollment::Model>) -> EnrollmentList {
    let enrollments: Vec<Enrollment> = rows.into_iter().map(Enrollment::from).collect();
    EnrollmentList {
        status: ResponseStatus::Success,
        total: enrollments.len(),
        enrollments,
    }
}

/// `MUD-<issue date>-<sequence>`, unique because the sequence is
pub(crate) fn certificate_number(id: &str, issued_on: NaiveDate) -> Result<String, ApiError> {
    let code = EntityCode::parse_as(id, CodePrefix::Certificate)?;
    Ok(format!(
        "MUD-{}-{:05}",
        issued_on.format("%Y%m%d"),
        code.sequence()
    ))
}

/// Record a payment by the caller
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Invalid amount or method", body = ErrorResponse)
    ),
    tag = "enrollments"
)]
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    validation::validate_non_negative("amount", req.amount)?;
    validation::validate_required("method", &req.method)?;

    let id = next_code(&state.db, CodePrefix::Payment).await?;
    let created = payment::ActiveModel {
        id: Set(id),
        user_id: Set(auth.user_id.clone()),
        amount: Set(req.amount),
        method: Set(req.method.trim().to_string()),
        paid_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    info!("Payment {} of {} by {}", created.id, created.amount, auth.user_id);
    Ok((
        StatusCode::CREATED,
        Json(PaymentResponse {
            status: ResponseStatus::Created,
            payment: created.into(),
        }),
    ))
}

/// Get a payment (payer or admin)
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(
        ("id" = String, Path, description = "Payment code")
    ),
    responses(
        (status = 200, description = "Payment", body = PaymentResponse),
        (status = 403, description = "Not your payment", body = ErrorResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    ),
    tag = "enrollments"
)]
pub async fn get_payment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Payment)?;
    let found = find_one::<payment::Entity, _>(&state.db, "Payment", &id).await?;
    auth.require_self_or_admin(&found.user_id)?;

    Ok(Json(PaymentResponse {
        status: ResponseStatus::Success,
        payment: found.into(),
    }))
}

/// Enroll the calling student in a course
///
/// Refused while any declared prerequisite lacks a completed enrollment.
#[utoipa::path(
    post,
    path = "/api/enroll",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 400, description = "Prerequisites not met", body = ErrorResponse),
        (status = 403, description = "Only students enroll, with their own payment", body = ErrorResponse),
        (status = 404, description = "Course or payment not found", body = ErrorResponse),
        (status = 409, description = "Already enrolled in this course", body = ErrorResponse)
    ),
    tag = "enrollments"
)]
pub async fn enroll(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    auth.require_tutee()?;
    let course_id = parse_id(&req.course_id, CodePrefix::Course)?;
    let payment_id = parse_id(&req.payment_id, CodePrefix::Payment)?;

    find_one::<course::Entity, _>(&state.db, "Course", &course_id).await?;
    let paid = find_one::<payment::Entity, _>(&state.db, "Payment", &payment_id).await?;
    if paid.user_id != auth.user_id {
        return Err(ApiError::forbidden(format!(
            "Payment '{payment_id}' was not made by you"
        )));
    }

    let missing = queries::missing_prerequisites(&state.db, &course_id, &auth.user_id).await?;
    if !missing.is_empty() {
        debug!(
            "{} refused enrollment in {}: {} prerequisite(s) missing",
            auth.user_id,
            course_id,
            missing.len()
        );
        return Err(ApiError::PrerequisitesNotMet(missing));
    }

    let txn = state.db.begin().await?;

    // one enrollment per student and course, whatever its status
    let existing = enrollment::Entity::find()
        .filter(enrollment::Column::CourseId.eq(course_id.as_str()))
        .filter(enrollment::Column::StudentId.eq(auth.user_id.as_str()))
        .count(&txn)
        .await?;
    if existing > 0 {
        return Err(ApiError::Conflict(format!(
            "Already enrolled in '{course_id}'"
        )));
    }

    let id = next_code(&txn, CodePrefix::Enrollment).await?;

    let created = enrollment::ActiveModel {
        id: Set(id),
        course_id: Set(course_id),
        student_id: Set(auth.user_id.clone()),
        payment_id: Set(payment_id),
        status: Set(EnrollmentState::Active),
        enrolled_at: Set(Utc::now()),
    }
    .insert(&txn)
    .await?;

    user::Entity::update_many()
        .col_expr(
            user::Column::TotalEnrollments,
            Expr::col(user::Column::TotalEnrollments).add(1),
        )
        .filter(user::Column::Id.eq(auth.user_id.as_str()))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    info!(
        "Student {} enrolled in {} ({})",
        auth.user_id, created.course_id, created.id
    );

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            status: ResponseStatus::Created,
            enrollment: created.into(),
        }),
    ))
}

/// Enrollments of the caller
#[utoipa::path(
    get,
    path = "/api/enrollments/me",
    responses(
        (status = 200, description = "Your enrollments", body = EnrollmentList)
    ),
    tag = "enrollments"
)]
pub async fn my_enrollments(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<EnrollmentList>, ApiError> {
    let rows = enrollment::Entity::find()
        .filter(enrollment::Column::StudentId.eq(auth.user_id.as_str()))
        .order_by_asc(enrollment::Column::EnrolledAt)
        .order_by_asc(enrollment::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(enrollment_list(rows)))
}

/// Get an enrollment (its student, a tutor or an admin)
#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(
        ("id" = String, Path, description = "Enrollment code")
    ),
    responses(
        (status = 200, description = "Enrollment", body = EnrollmentResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    tag = "enrollments"
)]
pub async fn get_enrollment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Enrollment)?;
    let found = find_one::<enrollment::Entity, _>(&state.db, "Enrollment", &id).await?;
    auth.require_self_or_author(&found.student_id)?;

    Ok(Json(EnrollmentResponse {
        status: ResponseStatus::Success,
        enrollment: found.into(),
    }))
}

/// Enrollments in a course (its tutors or an admin)
#[utoipa::path(
    get,
    path = "/api/courses/{id}/enrollments",
    params(
        ("id" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Enrollments", body = EnrollmentList),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "enrollments"
)]
pub async fn course_enrollments(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<EnrollmentList>, ApiError> {
    let id = parse_id(&id, CodePrefix::Course)?;
    managed_course(&state.db, &auth, &id).await?;

    let rows = enrollment::Entity::find()
        .filter(enrollment::Column::CourseId.eq(id.as_str()))
        .order_by_asc(enrollment::Column::EnrolledAt)
        .order_by_asc(enrollment::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(enrollment_list(rows)))
}

/// Move an enrollment to Active, Completed or Dropped
#[utoipa::path(
    put,
    path = "/api/enrollments/{id}/status",
    params(
        ("id" = String, Path, description = "Enrollment code")
    ),
    request_body = UpdateEnrollmentStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = EnrollmentResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    tag = "enrollments"
)]
pub async fn update_enrollment_status(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEnrollmentStatusRequest>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Enrollment)?;
    let found = find_one::<enrollment::Entity, _>(&state.db, "Enrollment", &id).await?;
    ensure_course_manager(&state.db, &auth, &found.course_id).await?;

    let mut active = found.into_active_model();
    active.status = Set(req.status.into());
    let updated = active.update(&state.db).await?;

    info!("Enrollment {} is now {}", updated.id, req.status);
    Ok(Json(EnrollmentResponse {
        status: ResponseStatus::Updated,
        enrollment: updated.into(),
    }))
}

/// Withdraw an enrollment (its student, or a tutor of the course)
#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(
        ("id" = String, Path, description = "Enrollment code")
    ),
    responses(
        (status = 200, description = "Enrollment deleted", body = MessageResponse),
        (status = 403, description = "Not allowed", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    tag = "enrollments"
)]
pub async fn delete_enrollment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, CodePrefix::Enrollment)?;
    let found = find_one::<enrollment::Entity, _>(&state.db, "Enrollment", &id).await?;

    if found.student_id != auth.user_id {
        ensure_course_manager(&state.db, &auth, &found.course_id).await?;
    }

    let txn = state.db.begin().await?;
    enrollment::Entity::delete_by_id(id.clone())
        .exec(&txn)
        .await?;

    user::Entity::update_many()
        .col_expr(
            user::Column::TotalEnrollments,
            Expr::col(user::Column::TotalEnrollments).sub(1),
        )
        .filter(user::Column::Id.eq(found.student_id.as_str()))
        .filter(user::Column::TotalEnrollments.gt(0))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    info!("Enrollment {} deleted by {}", id, auth.user_id);
    Ok(Json(MessageResponse::new(
        ResponseStatus::Deleted,
        format!("Enrollment '{id}' deleted"),
    )))
}

/// Issue a certificate for a completed enrollment
#[utoipa::path(
    post,
    path = "/api/certificates",
    request_body = CreateCertificateRequest,
    responses(
        (status = 201, description = "Certificate issued", body = CertificateResponse),
        (status = 400, description = "Course not completed", body = ErrorResponse),
        (status = 403, description = "Not an instructor of this course", body = ErrorResponse),
        (status = 409, description = "Certificate already issued", body = ErrorResponse)
    ),
    tag = "enrollments"
)]
pub async fn create_certificate(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateCertificateRequest>,
) -> Result<(StatusCode, Json<CertificateResponse>), ApiError> {
    let course_id = parse_id(&req.course_id, CodePrefix::Course)?;
    let student_id = parse_id(&req.student_id, CodePrefix::User)?;

    managed_course(&state.db, &auth, &course_id).await?;
    find_one::<user::Entity, _>(&state.db, "User", &student_id).await?;

    let completed = enrollment::Entity::find()
        .filter(enrollment::Column::CourseId.eq(course_id.as_str()))
        .filter(enrollment::Column::StudentId.eq(student_id.as_str()))
        .filter(enrollment::Column::Status.eq(EnrollmentState::Completed))
        .count(&state.db)
        .await?;
    if completed == 0 {
        return Err(ApiError::Validation(format!(
            "Student '{student_id}' has not completed course '{course_id}'"
        )));
    }

    let issued = certificate::Entity::find()
        .filter(certificate::Column::CourseId.eq(course_id.as_str()))
        .filter(certificate::Column::StudentId.eq(student_id.as_str()))
        .count(&state.db)
        .await?;
    if issued > 0 {
        return Err(ApiError::Conflict(format!(
            "Certificate for '{student_id}' in '{course_id}' already issued"
        )));
    }

    let issued_on = Utc::now().date_naive();
    if let Some(expires_on) = req.expires_on {
        if expires_on <= issued_on {
            return Err(ApiError::Validation(
                "Certificate must expire after it is issued".to_string(),
            ));
        }
    }

    let id = next_code(&state.db, CodePrefix::Certificate).await?;
    let number = certificate_number(&id, issued_on)?;

    let created = certificate::ActiveModel {
        id: Set(id),
        course_id: Set(course_id),
        student_id: Set(student_id),
        certificate_number: Set(number),
        issued_on: Set(issued_on),
        expires_on: Set(req.expires_on),
    }
    .insert(&state.db)
    .await?;

    info!(
        "Certificate {} issued to {}",
        created.certificate_number, created.student_id
    );
    Ok((
        StatusCode::CREATED,
        Json(CertificateResponse {
            status: ResponseStatus::Created,
            certificate: created.into(),
        }),
    ))
}

/// Certificates held by the caller
#[utoipa::path(
    get,
    path = "/api/certificates/me",
    responses(
        (status = 200, description = "Your certificates", body = CertificateList)
    ),
    tag = "enrollments"
)]
pub async fn my_certificates(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<CertificateList>, ApiError> {
    let certificates = certificate::Entity::find()
        .filter(certificate::Column::StudentId.eq(auth.user_id.as_str()))
        .order_by_asc(certificate::Column::IssuedOn)
        .order_by_asc(certificate::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Certificate::from)
        .collect();

    Ok(Json(CertificateList {
        status: ResponseStatus::Success,
        certificates,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mudemy_core::EnrollmentStatus;

    #[test]
    fn certificate_number_embeds_date_and_sequence() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(
            certificate_number("CER00042", date).unwrap(),
            "MUD-20250314-00042"
        );
        assert!(certificate_number("ENR00042", date).is_err());
    }

    #[test]
    fn enrollment_status_maps_to_column() {
        let state: EnrollmentState = EnrollmentStatus::Dropped.into();
        assert_eq!(state, EnrollmentState::Dropped);
    }
}
