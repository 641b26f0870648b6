//! Input validation applied at the API boundary

use regex_lite::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum number of characters in a course title
pub const MIN_TITLE_LEN: usize = 5;
/// Maximum number of characters in a course or lesson title
pub const MAX_TITLE_LEN: usize = 200;
/// Minimum number of characters in a password
pub const MIN_PASSWORD_LEN: usize = 8;
/// Bounds of a submission grade
pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Username must be between 3 and 100 characters")]
    InvalidUsername,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters and contain upper case, lower case, digit and symbol characters")]
    WeakPassword,

    #[error("Title must be between {MIN_TITLE_LEN} and {MAX_TITLE_LEN} characters")]
    TitleLength,

    #[error("{0} must not be empty")]
    Required(&'static str),

    #[error("A course cannot be its own prerequisite")]
    SelfPrerequisite,

    #[error("Grade must be between {MIN_GRADE} and {MAX_GRADE}")]
    GradeOutOfRange,

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("Phone number must contain 9 to 10 digits")]
    InvalidPhone,

    #[error("{0}")]
    Other(String),
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email_regex().is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.trim().chars().count();
    if (3..=100).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUsername)
    }
}

/// Passwords need length plus one character from each class
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let upper = password.chars().any(|c| c.is_uppercase());
    let lower = password.chars().any(|c| c.is_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if long_enough && upper && lower && digit && symbol {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}

/// Title length is counted in characters after trimming
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.trim().chars().count();
    if (MIN_TITLE_LEN..=MAX_TITLE_LEN).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::TitleLength)
    }
}

pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.trim();
    if (9..=10).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_prerequisite(
    course_id: &str,
    required_course_id: &str,
) -> Result<(), ValidationError> {
    if course_id == required_course_id {
        Err(ValidationError::SelfPrerequisite)
    } else {
        Ok(())
    }
}

pub fn validate_grade(grade: f64) -> Result<(), ValidationError> {
    if grade.is_finite() && (MIN_GRADE..=MAX_GRADE).contains(&grade) {
        Ok(())
    } else {
        Err(ValidationError::GradeOutOfRange)
    }
}

pub fn validate_non_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        Err(ValidationError::Negative(field))
    } else {
        Ok(())
    }
}
