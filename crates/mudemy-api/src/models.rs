//! API request and response models
//!
//! Every successful response is an envelope carrying a `status` word next to
//! its payload; errors use [`ErrorResponse`].

use chrono::{DateTime, NaiveDate, Utc};
use mudemy_core::{
    DashboardTab, Difficulty, EnrollmentStatus, LessonKind, MediaKind, PrerequisiteRef, Role,
};
use mudemy_db::entities;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Outcome word of a successful response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Created,
    Updated,
    Deleted,
    Added,
    Submitted,
    Graded,
    Provided,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Machine readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl MessageResponse {
    pub fn new(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Server version
    pub version: String,
    /// Whether the database answered a ping
    pub database: bool,
}

/// Offset pagination shared by list endpoints
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListQuery {
    /// Pagination offset (default: 0)
    pub offset: Option<u64>,
    /// Pagination limit (default: 100, max: 1000)
    pub limit: Option<u64>,
}

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 1000;

impl ListQuery {
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username or email address
    pub username: String,
    pub password: String,
    /// Role the session acts under
    pub role: Role,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub status: ResponseStatus,
    /// Session JWT, also set as the `session_token` cookie
    pub token: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleInfo {
    pub role: Role,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleList {
    pub status: ResponseStatus,
    pub roles: Vec<RoleInfo>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// User information (password hash is never exposed)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// User code (USR00001)
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub last_login: Option<DateTime<Utc>>,
    /// May log in as tutor
    pub is_instructor: bool,
    /// May log in as tutee
    pub is_student: bool,
    pub is_admin: bool,
    pub bio: Option<String>,
    pub years_of_experience: Option<i32>,
    pub total_enrollments: i32,
    pub created_at: DateTime<Utc>,
}

impl From<entities::user::Model> for User {
    fn from(m: entities::user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            full_name: m.full_name,
            city: m.city,
            country: m.country,
            phone: m.phone,
            date_of_birth: m.date_of_birth,
            last_login: m.last_login,
            is_instructor: m.is_instructor,
            is_student: m.is_student,
            is_admin: m.is_admin,
            bio: m.bio,
            years_of_experience: m.years_of_experience,
            total_enrollments: m.total_enrollments,
            created_at: m.created_at,
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// At least 8 characters with upper case, lower case, digit and symbol
    pub password: String,
    pub full_name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Register as an instructor
    #[serde(default)]
    pub is_instructor: bool,
    /// Register as a student (default: true)
    #[serde(default = "default_true")]
    pub is_student: bool,
    pub bio: Option<String>,
    pub years_of_experience: Option<i32>,
}

fn default_true() -> bool {
    true
}

/// Partial user update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
    pub years_of_experience: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub status: ResponseStatus,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserList {
    pub status: ResponseStatus,
    pub users: Vec<User>,
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct UserSearchQuery {
    /// Substring of the full name
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InterestRequest {
    pub interest: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InterestList {
    pub status: ResponseStatus,
    pub user_id: String,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QualificationRequest {
    pub qualification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QualificationList {
    pub status: ResponseStatus,
    pub user_id: String,
    pub qualifications: Vec<String>,
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// Course information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Course {
    /// Course code (CRS00001)
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub language: String,
    pub description: Option<String>,
    /// Price in the smallest currency unit
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl From<entities::course::Model> for Course {
    fn from(m: entities::course::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            difficulty: m.difficulty.into(),
            language: m.language,
            description: m.description,
            price: m.price,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    /// 5 to 200 characters
    pub title: String,
    pub difficulty: Difficulty,
    pub language: String,
    pub description: Option<String>,
    /// Defaults to 0
    #[serde(default)]
    pub price: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub status: ResponseStatus,
    pub course: Course,
}

/// Course with its categories, prerequisites and instructors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseDetailResponse {
    pub status: ResponseStatus,
    pub course: Course,
    pub categories: Vec<String>,
    /// Required course codes in declaration order
    pub prerequisites: Vec<String>,
    /// Assigned instructor user codes
    pub instructors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseList {
    pub status: ResponseStatus,
    pub courses: Vec<Course>,
    pub total: usize,
}

/// Catalog query
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CatalogParams {
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    /// Beginner, Intermediate, Advanced or All
    pub difficulty: Option<String>,
    /// title_asc or title_desc
    pub sort: Option<String>,
    /// Pagination offset (default: 0)
    pub offset: Option<u64>,
    /// Pagination limit (default: 100, max: 1000)
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct CourseSearchQuery {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryList {
    pub status: ResponseStatus,
    pub course_id: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrerequisiteRequest {
    /// Course that must be completed first
    pub required_course_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrerequisiteList {
    pub status: ResponseStatus,
    pub course_id: String,
    pub prerequisites: Vec<PrerequisiteRef>,
}

/// Whether the current student may enroll in a course
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EligibilityResponse {
    pub status: ResponseStatus,
    pub course_id: String,
    pub eligible: bool,
    /// Prerequisites not yet completed, in declaration order
    pub missing: Vec<PrerequisiteRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InstructRequest {
    pub user_id: String,
    pub course_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InstructResponse {
    pub status: ResponseStatus,
    pub user_id: String,
    pub course_id: String,
}

// ---------------------------------------------------------------------------
// Modules, lessons and content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Module {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub position: i32,
}

impl From<entities::module::Model> for Module {
    fn from(m: entities::module::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            title: m.title,
            position: m.position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateModuleRequest {
    pub title: String,
    /// Defaults to the end of the course
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModuleResponse {
    pub status: ResponseStatus,
    pub module: Module,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModuleList {
    pub status: ResponseStatus,
    pub course_id: String,
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Lesson {
    /// Lesson code (LES00001), shared with its content, assignment or quiz
    pub id: String,
    pub module_id: String,
    pub kind: LessonKind,
}

impl From<entities::lesson::Model> for Lesson {
    fn from(m: entities::lesson::Model) -> Self {
        Self {
            id: m.id,
            module_id: m.module_id,
            kind: m.kind.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonList {
    pub status: ResponseStatus,
    pub course_id: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Content {
    pub id: String,
    pub module_id: String,
    pub title: String,
    pub slides: Option<String>,
}

impl From<entities::content::Model> for Content {
    fn from(m: entities::content::Model) -> Self {
        Self {
            id: m.id,
            module_id: m.module_id,
            title: m.title,
            slides: m.slides,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateContentRequest {
    pub module_id: String,
    pub title: String,
    pub slides: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Media {
    pub id: String,
    pub content_id: String,
    pub kind: MediaKind,
    /// Text body or media URL
    pub body: String,
}

impl From<entities::content_media::Model> for Media {
    fn from(m: entities::content_media::Model) -> Self {
        Self {
            id: m.id,
            content_id: m.content_id,
            kind: m.kind.into(),
            body: m.body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddMediaRequest {
    pub kind: MediaKind,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaResponse {
    pub status: ResponseStatus,
    pub media: Media,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentResponse {
    pub status: ResponseStatus,
    pub content: Content,
    pub media: Vec<Media>,
}

// ---------------------------------------------------------------------------
// Payments, enrollments and certificates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    pub amount: i64,
    pub method: String,
    pub paid_at: DateTime<Utc>,
}

impl From<entities::payment::Model> for Payment {
    fn from(m: entities::payment::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            amount: m.amount,
            method: m.method,
            paid_at: m.paid_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub amount: i64,
    /// e.g. "card", "bank_transfer"
    pub method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub status: ResponseStatus,
    pub payment: Payment,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Enrollment {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub payment_id: String,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
}

impl From<entities::enrollment::Model> for Enrollment {
    fn from(m: entities::enrollment::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            student_id: m.student_id,
            payment_id: m.payment_id,
            status: m.status.into(),
            enrolled_at: m.enrolled_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub course_id: String,
    pub payment_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateEnrollmentStatusRequest {
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub status: ResponseStatus,
    pub enrollment: Enrollment,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentList {
    pub status: ResponseStatus,
    pub enrollments: Vec<Enrollment>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Certificate {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub certificate_number: String,
    pub issued_on: NaiveDate,
    pub expires_on: Option<NaiveDate>,
}

impl From<entities::certificate::Model> for Certificate {
    fn from(m: entities::certificate::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            student_id: m.student_id,
            certificate_number: m.certificate_number,
            issued_on: m.issued_on,
            expires_on: m.expires_on,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCertificateRequest {
    pub course_id: String,
    pub student_id: String,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CertificateResponse {
    pub status: ResponseStatus,
    pub certificate: Certificate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CertificateList {
    pub status: ResponseStatus,
    pub certificates: Vec<Certificate>,
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Assignment {
    pub id: String,
    pub module_id: String,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

impl From<entities::assignment::Model> for Assignment {
    fn from(m: entities::assignment::Model) -> Self {
        Self {
            id: m.id,
            module_id: m.module_id,
            title: m.title,
            description: m.description,
            deadline: m.deadline,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAssignmentRequest {
    pub module_id: String,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentResponse {
    pub status: ResponseStatus,
    pub assignment: Assignment,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentList {
    pub status: ResponseStatus,
    pub module_id: String,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Quiz {
    pub id: String,
    pub module_id: String,
    pub title: String,
    pub time_limit_secs: Option<i32>,
    pub max_attempts: i32,
    pub deadline: Option<DateTime<Utc>>,
}

impl From<entities::quiz::Model> for Quiz {
    fn from(m: entities::quiz::Model) -> Self {
        Self {
            id: m.id,
            module_id: m.module_id,
            title: m.title,
            time_limit_secs: m.time_limit_secs,
            max_attempts: m.max_attempts,
            deadline: m.deadline,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateQuizRequest {
    pub module_id: String,
    pub title: String,
    pub time_limit_secs: Option<i32>,
    /// At least 1 (default: 1)
    #[serde(default = "default_attempts")]
    pub max_attempts: i32,
    pub deadline: Option<DateTime<Utc>>,
}

fn default_attempts() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizResponse {
    pub status: ResponseStatus,
    pub quiz: Quiz,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizList {
    pub status: ResponseStatus,
    pub module_id: String,
    pub quizzes: Vec<Quiz>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub content: String,
    /// Only shown to tutors and admins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl Question {
    pub fn from_model(m: entities::question::Model, reveal_answer: bool) -> Self {
        Self {
            id: m.id,
            quiz_id: m.quiz_id,
            content: m.content,
            correct_answer: reveal_answer.then_some(m.correct_answer),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateQuestionRequest {
    pub content: String,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionResponse {
    pub status: ResponseStatus,
    pub question: Question,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionList {
    pub status: ResponseStatus,
    pub quiz_id: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Answer {
    pub id: String,
    pub question_id: String,
    pub body: String,
}

impl From<entities::answer::Model> for Answer {
    fn from(m: entities::answer::Model) -> Self {
        Self {
            id: m.id,
            question_id: m.question_id,
            body: m.body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAnswerRequest {
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerResponse {
    pub status: ResponseStatus,
    pub answer: Answer,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerList {
    pub status: ResponseStatus,
    pub question_id: String,
    pub answers: Vec<Answer>,
}

/// Assignment or quiz submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    pub id: String,
    /// Assignment or quiz code
    pub assessment_id: String,
    pub user_id: String,
    pub content: String,
    pub grade: Option<f64>,
    pub submitted_at: DateTime<Utc>,
}

impl From<entities::assignment_submission::Model> for Submission {
    fn from(m: entities::assignment_submission::Model) -> Self {
        Self {
            id: m.id,
            assessment_id: m.assignment_id,
            user_id: m.user_id,
            content: m.content,
            grade: m.grade,
            submitted_at: m.submitted_at,
        }
    }
}

impl From<entities::quiz_submission::Model> for Submission {
    fn from(m: entities::quiz_submission::Model) -> Self {
        Self {
            id: m.id,
            assessment_id: m.quiz_id,
            user_id: m.user_id,
            content: m.content,
            grade: m.grade,
            submitted_at: m.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GradeRequest {
    /// 0.0 to 10.0
    pub grade: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub status: ResponseStatus,
    pub submission: Submission,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct QuizStatsQuery {
    /// Leave out quizzes with fewer graded submissions (default: 0)
    pub min_submissions: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizStats {
    pub quiz_id: String,
    pub title: String,
    pub submissions: u64,
    pub average_grade: f64,
    pub highest_grade: f64,
    pub lowest_grade: f64,
}

impl From<mudemy_db::queries::QuizStats> for QuizStats {
    fn from(s: mudemy_db::queries::QuizStats) -> Self {
        Self {
            quiz_id: s.quiz_id,
            title: s.title,
            submissions: s.submissions,
            average_grade: s.average_grade,
            highest_grade: s.highest_grade,
            lowest_grade: s.lowest_grade,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizStatsList {
    pub status: ResponseStatus,
    pub module_id: String,
    pub quizzes: Vec<QuizStats>,
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Take {
    pub user_id: String,
    pub lesson_id: String,
    pub is_finished: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<entities::take::Model> for Take {
    fn from(m: entities::take::Model) -> Self {
        Self {
            user_id: m.user_id,
            lesson_id: m.lesson_id,
            is_finished: m.is_finished,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TakeRequest {
    pub lesson_id: String,
    #[serde(default)]
    pub is_finished: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TakeResponse {
    pub status: ResponseStatus,
    pub take: Take,
}

/// Lessons a user has taken and how many are finished
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProgressResponse {
    pub status: ResponseStatus,
    pub user_id: String,
    pub total: u64,
    pub finished: u64,
    pub unfinished: u64,
    /// Percentage, 0 when nothing was taken
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonCompletionResponse {
    pub status: ResponseStatus,
    pub lesson_id: String,
    pub total_students: u64,
    pub finished_students: u64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct DashboardQuery {
    /// all, in-progress or completed
    pub tab: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardCourse {
    pub course_id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub enrollment_status: EnrollmentStatus,
    /// Finished lessons as a percentage of the course's lessons
    pub progress: f64,
}

impl From<mudemy_db::queries::DashboardCourse> for DashboardCourse {
    fn from(c: mudemy_db::queries::DashboardCourse) -> Self {
        Self {
            course_id: c.course_id,
            title: c.title,
            difficulty: c.difficulty.into(),
            enrollment_status: c.status,
            progress: c.progress,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub status: ResponseStatus,
    pub tab: DashboardTab,
    pub courses: Vec<DashboardCourse>,
    /// Mean progress of the displayed courses
    pub average_progress: f64,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Resource {
    pub id: String,
    pub file_name: String,
    pub file_link: String,
    pub external_link: Option<String>,
}

impl From<entities::resource::Model> for Resource {
    fn from(m: entities::resource::Model) -> Self {
        Self {
            id: m.id,
            file_name: m.file_name,
            file_link: m.file_link,
            external_link: m.external_link,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateResourceRequest {
    pub file_name: String,
    pub file_link: String,
    pub external_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateResourceRequest {
    pub file_name: Option<String>,
    pub file_link: Option<String>,
    pub external_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceResponse {
    pub status: ResponseStatus,
    pub resource: Resource,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceList {
    pub status: ResponseStatus,
    pub resources: Vec<Resource>,
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ResourceSearchQuery {
    /// Substring of the file name
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProvideRequest {
    pub resource_id: String,
    pub lesson_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProvideResponse {
    pub status: ResponseStatus,
    pub resource_id: String,
    pub lesson_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkProvideRequest {
    pub resource_id: String,
    pub lesson_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkProvideResponse {
    pub status: ResponseStatus,
    pub resource_id: String,
    /// Lessons that received the resource
    pub provided: Vec<String>,
    /// Lessons that already had it
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let body = MessageResponse::new(ResponseStatus::Deleted, "gone");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "deleted");
    }

    #[test]
    fn list_query_clamps_limit() {
        let q = ListQuery {
            offset: None,
            limit: Some(5000),
        };
        assert_eq!(q.limit(), MAX_LIMIT);
        assert_eq!(ListQuery::default().limit(), DEFAULT_LIMIT);
        assert_eq!(ListQuery::default().offset(), 0);
    }

    #[test]
    fn error_response_omits_missing_code() {
        let body = ErrorResponse {
            error: "nope".into(),
            code: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"nope"}"#);
    }

    #[test]
    fn registration_defaults_to_student() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"username":"ha","email":"ha@x.vn","password":"P@ssw0rd1","full_name":"Ha"}"#,
        )
        .unwrap();
        assert!(req.is_student);
        assert!(!req.is_instructor);
    }
}
