//! REST API for the Mudemy course marketplace
//!
//! Axum router with public catalog/auth routes and session-protected routes
//! for everything else, plus OpenAPI docs served through Swagger UI.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sea_orm::DatabaseConnection;

pub use error::ApiError;

/// Application state shared across handlers
pub struct AppState {
    pub db: DatabaseConnection,
    /// HS256 secret for session tokens
    pub jwt_secret: String,
    /// Session lifetime in hours
    pub session_hours: i64,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mudemy API",
        version = "0.1.0",
        description = "REST API for the Mudemy online course marketplace",
        contact(
            name = "Mudemy Team",
            email = "team@mudemy.edu.vn"
        )
    ),
    paths(
        handlers::system::root,
        handlers::system::health_check,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::list_roles,
        handlers::users::register,
        handlers::users::get_me,
        handlers::users::list_users,
        handlers::users::search_users,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::users::list_interests,
        handlers::users::add_interest,
        handlers::users::list_qualifications,
        handlers::users::add_qualification,
        handlers::users::list_instructors,
        handlers::users::list_students,
        handlers::users::list_instructor_courses,
        handlers::courses::list_courses,
        handlers::courses::search_courses,
        handlers::courses::create_course,
        handlers::courses::get_course,
        handlers::courses::update_course,
        handlers::courses::delete_course,
        handlers::courses::list_categories,
        handlers::courses::add_category,
        handlers::courses::list_prerequisites,
        handlers::courses::add_prerequisite,
        handlers::courses::check_eligibility,
        handlers::courses::assign_instructor,
        handlers::courses::list_modules,
        handlers::courses::create_module,
        handlers::courses::list_course_lessons,
        handlers::courses::create_content,
        handlers::courses::get_content,
        handlers::courses::add_media,
        handlers::enrollments::create_payment,
        handlers::enrollments::get_payment,
        handlers::enrollments::enroll,
        handlers::enrollments::my_enrollments,
        handlers::enrollments::get_enrollment,
        handlers::enrollments::course_enrollments,
        handlers::enrollments::update_enrollment_status,
        handlers::enrollments::delete_enrollment,
        handlers::enrollments::create_certificate,
        handlers::enrollments::my_certificates,
        handlers::progress::record_take,
        handlers::progress::finish_take,
        handlers::progress::unfinish_take,
        handlers::progress::user_progress,
        handlers::progress::lesson_completion,
        handlers::progress::dashboard,
        handlers::assessments::list_assignments,
        handlers::assessments::create_assignment,
        handlers::assessments::get_assignment,
        handlers::assessments::update_assignment,
        handlers::assessments::delete_assignment,
        handlers::assessments::submit_assignment,
        handlers::assessments::grade_assignment_submission,
        handlers::assessments::list_quizzes,
        handlers::assessments::create_quiz,
        handlers::assessments::get_quiz,
        handlers::assessments::delete_quiz,
        handlers::assessments::list_questions,
        handlers::assessments::add_question,
        handlers::assessments::list_answers,
        handlers::assessments::add_answer,
        handlers::assessments::submit_quiz,
        handlers::assessments::grade_quiz_submission,
        handlers::assessments::module_quiz_stats,
        handlers::resources::list_resources,
        handlers::resources::search_resources,
        handlers::resources::create_resource,
        handlers::resources::get_resource,
        handlers::resources::update_resource,
        handlers::resources::delete_resource,
        handlers::resources::provide_resource,
        handlers::resources::bulk_provide_resource,
        handlers::resources::remove_lesson_resource,
        handlers::resources::list_lesson_resources,
    ),
    components(
        schemas(
            models::ResponseStatus,
            models::ErrorResponse,
            models::MessageResponse,
            models::HealthResponse,
            models::ListQuery,
            models::LoginRequest,
            models::LoginResponse,
            models::RoleInfo,
            models::RoleList,
            models::User,
            models::CreateUserRequest,
            models::UpdateUserRequest,
            models::UserResponse,
            models::UserList,
            models::InterestRequest,
            models::InterestList,
            models::QualificationRequest,
            models::QualificationList,
            models::Course,
            models::CreateCourseRequest,
            models::UpdateCourseRequest,
            models::CourseResponse,
            models::CourseDetailResponse,
            models::CourseList,
            models::CategoryRequest,
            models::CategoryList,
            models::PrerequisiteRequest,
            models::PrerequisiteList,
            models::EligibilityResponse,
            models::InstructRequest,
            models::InstructResponse,
            models::Module,
            models::CreateModuleRequest,
            models::ModuleResponse,
            models::ModuleList,
            models::Lesson,
            models::LessonList,
            models::Content,
            models::CreateContentRequest,
            models::Media,
            models::AddMediaRequest,
            models::MediaResponse,
            models::ContentResponse,
            models::Payment,
            models::CreatePaymentRequest,
            models::PaymentResponse,
            models::Enrollment,
            models::EnrollRequest,
            models::UpdateEnrollmentStatusRequest,
            models::EnrollmentResponse,
            models::EnrollmentList,
            models::Certificate,
            models::CreateCertificateRequest,
            models::CertificateResponse,
            models::CertificateList,
            models::Assignment,
            models::CreateAssignmentRequest,
            models::UpdateAssignmentRequest,
            models::AssignmentResponse,
            models::AssignmentList,
            models::Quiz,
            models::CreateQuizRequest,
            models::QuizResponse,
            models::QuizList,
            models::Question,
            models::CreateQuestionRequest,
            models::QuestionResponse,
            models::QuestionList,
            models::Answer,
            models::CreateAnswerRequest,
            models::AnswerResponse,
            models::AnswerList,
            models::Submission,
            models::SubmitRequest,
            models::GradeRequest,
            models::SubmissionResponse,
            models::QuizStats,
            models::QuizStatsList,
            models::Take,
            models::TakeRequest,
            models::TakeResponse,
            models::ProgressResponse,
            models::LessonCompletionResponse,
            models::DashboardCourse,
            models::DashboardResponse,
            models::Resource,
            models::CreateResourceRequest,
            models::UpdateResourceRequest,
            models::ResourceResponse,
            models::ResourceList,
            models::ProvideRequest,
            models::ProvideResponse,
            models::BulkProvideRequest,
            models::BulkProvideResponse,
            mudemy_core::Role,
            mudemy_core::Difficulty,
            mudemy_core::EnrollmentStatus,
            mudemy_core::LessonKind,
            mudemy_core::MediaKind,
            mudemy_core::DashboardTab,
            mudemy_core::PrerequisiteRef,
        )
    ),
    tags(
        (name = "auth", description = "Login, logout and roles"),
        (name = "users", description = "Accounts, profiles, interests and qualifications"),
        (name = "courses", description = "Catalog, course authoring, prerequisites and modules"),
        (name = "content", description = "Content lessons and media"),
        (name = "enrollments", description = "Payments, enrollments and certificates"),
        (name = "progress", description = "Lesson progress and the student dashboard"),
        (name = "assessments", description = "Assignments, quizzes and grading"),
        (name = "resources", description = "Learning resources attached to lessons"),
        (name = "system", description = "System health and info endpoints")
    )
)]
struct ApiDoc;

/// API server configuration
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable CORS (for browser clients)
    pub enable_cors: bool,
    /// Allowed CORS origins (if None, any localhost origin)
    pub cors_origins: Option<Vec<String>>,
    /// JWT secret for signing session tokens
    pub jwt_secret: String,
    /// Session lifetime in hours
    pub session_hours: i64,
}

impl ApiServerConfig {
    pub fn new(bind_addr: SocketAddr, jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr,
            enable_cors: true,
            cors_origins: None,
            jwt_secret: jwt_secret.into(),
            session_hours: 24,
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, db: DatabaseConnection) -> Self {
        let state = Arc::new(AppState {
            db,
            jwt_secret: config.jwt_secret.clone(),
            session_hours: config.session_hours,
        });

        Self { config, state }
    }

    fn cors_layer(&self) -> CorsLayer {
        // credentials rule out a wildcard origin
        let origins = match &self.config.cors_origins {
            Some(list) if !list.is_empty() => {
                let parsed: Vec<HeaderValue> = list
                    .iter()
                    .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                        Ok(value) => Some(value),
                        Err(_) => {
                            warn!("Ignoring invalid CORS origin: {}", origin);
                            None
                        }
                    })
                    .collect();
                AllowOrigin::list(parsed)
            }
            _ => AllowOrigin::predicate(|origin: &HeaderValue, _| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str.starts_with("http://localhost:")
                    || origin_str.starts_with("http://127.0.0.1:")
                    || origin_str.starts_with("https://localhost:")
                    || origin_str.starts_with("https://127.0.0.1:")
            }),
        };

        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
            .allow_credentials(true)
            .allow_origin(origins)
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        use handlers::{assessments, auth, courses, enrollments, progress, resources, system, users};

        let api_doc = ApiDoc::openapi();
        let jwt_state = Arc::new(middleware::JwtState::new(self.config.jwt_secret.as_bytes()));

        // Build PUBLIC routes (no authentication required)
        let public_router = Router::new()
            .route("/api/", get(system::root))
            .route("/api/health", get(system::health_check))
            .route("/api/auth/login", post(auth::login))
            .route("/api/auth/logout", post(auth::logout))
            .route("/api/auth/roles", get(auth::list_roles))
            .route("/api/users", post(users::register))
            .route("/api/courses", get(courses::list_courses))
            .route("/api/courses/search", get(courses::search_courses))
            .route("/api/courses/{id}", get(courses::get_course))
            .route("/api/courses/{id}/categories", get(courses::list_categories))
            .route("/api/courses/{id}/prerequisites", get(courses::list_prerequisites))
            .route("/api/courses/{id}/modules", get(courses::list_modules))
            .route("/api/instructors", get(users::list_instructors))
            .route(
                "/api/instructors/{id}/courses",
                get(users::list_instructor_courses),
            )
            .with_state(self.state.clone());

        // Build PROTECTED routes (require session token authentication)
        let protected_router = Router::new()
            // Users
            .route("/api/users", get(users::list_users))
            .route("/api/users/me", get(users::get_me))
            .route("/api/users/search", get(users::search_users))
            .route(
                "/api/users/{id}",
                get(users::get_user)
                    .put(users::update_user)
                    .delete(users::delete_user),
            )
            .route(
                "/api/users/{id}/interests",
                get(users::list_interests).post(users::add_interest),
            )
            .route(
                "/api/users/{id}/qualifications",
                get(users::list_qualifications).post(users::add_qualification),
            )
            .route("/api/students", get(users::list_students))
            // Courses
            .route("/api/courses", post(courses::create_course))
            .route(
                "/api/courses/{id}",
                put(courses::update_course).delete(courses::delete_course),
            )
            .route("/api/courses/{id}/categories", post(courses::add_category))
            .route(
                "/api/courses/{id}/prerequisites",
                post(courses::add_prerequisite),
            )
            .route(
                "/api/courses/{id}/eligibility",
                get(courses::check_eligibility),
            )
            .route("/api/courses/{id}/modules", post(courses::create_module))
            .route(
                "/api/courses/{id}/lessons",
                get(courses::list_course_lessons),
            )
            .route(
                "/api/courses/{id}/enrollments",
                get(enrollments::course_enrollments),
            )
            .route("/api/instruct", post(courses::assign_instructor))
            // Content
            .route("/api/contents", post(courses::create_content))
            .route("/api/contents/{id}", get(courses::get_content))
            .route("/api/contents/{id}/media", post(courses::add_media))
            // Payments, enrollments and certificates
            .route("/api/payments", post(enrollments::create_payment))
            .route("/api/payments/{id}", get(enrollments::get_payment))
            .route("/api/enroll", post(enrollments::enroll))
            .route("/api/enrollments/me", get(enrollments::my_enrollments))
            .route(
                "/api/enrollments/{id}",
                get(enrollments::get_enrollment).delete(enrollments::delete_enrollment),
            )
            .route(
                "/api/enrollments/{id}/status",
                put(enrollments::update_enrollment_status),
            )
            .route("/api/certificates", post(enrollments::create_certificate))
            .route("/api/certificates/me", get(enrollments::my_certificates))
            // Progress
            .route("/api/takes", post(progress::record_take))
            .route("/api/takes/{id}/finish", put(progress::finish_take))
            .route("/api/takes/{id}/unfinish", put(progress::unfinish_take))
            .route("/api/takes/{id}/progress", get(progress::user_progress))
            .route(
                "/api/lessons/{id}/completion",
                get(progress::lesson_completion),
            )
            .route("/api/dashboard", get(progress::dashboard))
            // Assessments
            .route(
                "/api/modules/{id}/assignments",
                get(assessments::list_assignments),
            )
            .route("/api/modules/{id}/quizzes", get(assessments::list_quizzes))
            .route(
                "/api/modules/{id}/quiz-stats",
                get(assessments::module_quiz_stats),
            )
            .route("/api/assignments", post(assessments::create_assignment))
            .route(
                "/api/assignments/{id}",
                get(assessments::get_assignment)
                    .put(assessments::update_assignment)
                    .delete(assessments::delete_assignment),
            )
            .route(
                "/api/assignments/{id}/submit",
                post(assessments::submit_assignment),
            )
            .route(
                "/api/assignment-submissions/{id}/grade",
                put(assessments::grade_assignment_submission),
            )
            .route("/api/quizzes", post(assessments::create_quiz))
            .route(
                "/api/quizzes/{id}",
                get(assessments::get_quiz).delete(assessments::delete_quiz),
            )
            .route(
                "/api/quizzes/{id}/questions",
                get(assessments::list_questions).post(assessments::add_question),
            )
            .route("/api/quizzes/{id}/submit", post(assessments::submit_quiz))
            .route(
                "/api/quiz-submissions/{id}/grade",
                put(assessments::grade_quiz_submission),
            )
            .route(
                "/api/questions/{id}/answers",
                get(assessments::list_answers).post(assessments::add_answer),
            )
            // Resources
            .route(
                "/api/resources",
                get(resources::list_resources).post(resources::create_resource),
            )
            .route("/api/resources/search", get(resources::search_resources))
            .route("/api/resources/provide", post(resources::provide_resource))
            .route(
                "/api/resources/provide/bulk",
                post(resources::bulk_provide_resource),
            )
            .route(
                "/api/resources/{id}",
                get(resources::get_resource)
                    .put(resources::update_resource)
                    .delete(resources::delete_resource),
            )
            .route(
                "/api/lessons/{id}/resources",
                get(resources::list_lesson_resources),
            )
            .route(
                "/api/lessons/{id}/resources/{resource_id}",
                delete(resources::remove_lesson_resource),
            )
            .with_state(self.state.clone())
            .layer(axum_middleware::from_fn_with_state(
                jwt_state.clone(),
                middleware::require_auth,
            ));

        // Public and protected routers share some paths under different methods
        let api_router = public_router.merge(protected_router);

        // SwaggerUi automatically creates a route for /api/openapi.json
        let router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router);

        let mut router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            router = router.layer(self.cors_layer());
        }

        router
    }

    /// Start the API server
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);
        info!(
            "OpenAPI spec: http://{}/api/openapi.json",
            self.config.bind_addr
        );
        info!("Swagger UI: http://{}/swagger-ui", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        Ok(())
    }
}

/// Convenience function to create and start an API server
pub async fn run_api_server(
    config: ApiServerConfig,
    db: DatabaseConnection,
) -> Result<(), anyhow::Error> {
    ApiServer::new(config, db).start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let api_doc = ApiDoc::openapi();
        let json = api_doc.to_json().unwrap();
        assert!(json.contains("/api/courses/{id}/eligibility"));
        assert!(json.contains("/api/dashboard"));
    }

    #[test]
    fn config_defaults() {
        let config = ApiServerConfig::new("127.0.0.1:8000".parse().unwrap(), "secret");
        assert!(config.enable_cors);
        assert_eq!(config.session_hours, 24);
        assert!(config.cors_origins.is_none());
    }
}
