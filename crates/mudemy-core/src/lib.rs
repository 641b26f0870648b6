//! Domain types and rules for the Mudemy course marketplace
//!
//! Everything in this crate is free of I/O: identifier codes, roles and
//! enumerations, input validation, and the three pieces of cross-entity
//! business logic (prerequisite eligibility, progress aggregation and the
//! catalog filter/sort pipeline).

pub mod catalog;
pub mod code;
pub mod eligibility;
pub mod progress;
pub mod types;
pub mod validation;

pub use catalog::{apply_catalog, CatalogEntry, CatalogQuery, DifficultyFilter, TitleSort};
pub use code::{CodeError, CodePrefix, EntityCode};
pub use eligibility::{missing_prerequisites, PrerequisiteRef};
pub use progress::{average_progress, completion_rate, DashboardTab, LessonProgress};
pub use types::{Difficulty, EnrollmentStatus, LessonKind, MediaKind, Role, UnknownVariant};
pub use validation::ValidationError;
