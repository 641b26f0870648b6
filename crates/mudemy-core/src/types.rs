//! Enumerations shared by the database, API and domain layers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Returned when a string does not name any variant of an enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Implements `as_str`, `Display` and case-insensitive `FromStr` for a
/// fieldless enum from a variant/string table.
macro_rules! string_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

/// Role chosen at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructor
    Tutor,
    /// Student
    Tutee,
    /// System administrator
    Admin,
}

string_enum!(Role, "role", {
    Tutor => "tutor",
    Tutee => "tutee",
    Admin => "admin",
});

impl Role {
    /// Human readable description shown on the login screen
    pub fn description(&self) -> &'static str {
        match self {
            Role::Tutor => "For instructors who publish and teach courses",
            Role::Tutee => "For students who enroll in courses",
            Role::Admin => "System administration",
        }
    }

    /// Tutors and admins may author course material and grade work
    pub fn can_author(&self) -> bool {
        matches!(self, Role::Tutor | Role::Admin)
    }
}

/// Course difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

string_enum!(Difficulty, "difficulty", {
    Beginner => "Beginner",
    Intermediate => "Intermediate",
    Advanced => "Advanced",
});

/// Lifecycle of an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

string_enum!(EnrollmentStatus, "enrollment status", {
    Active => "Active",
    Completed => "Completed",
    Dropped => "Dropped",
});

/// What a lesson row stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum LessonKind {
    Content,
    Assignment,
    Quiz,
}

string_enum!(LessonKind, "lesson kind", {
    Content => "content",
    Assignment => "assignment",
    Quiz => "quiz",
});

/// Media attached to a content lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Text,
    Video,
    Image,
}

string_enum!(MediaKind, "media kind", {
    Text => "text",
    Video => "video",
    Image => "image",
});
