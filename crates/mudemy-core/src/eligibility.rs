//! Prerequisite eligibility
//!
//! A student may enroll in a course once every course it declares as a
//! prerequisite has a completed enrollment for that student.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A prerequisite course as shown to the student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PrerequisiteRef {
    pub course_id: String,
    pub title: String,
}

/// Prerequisites the student has not yet completed.
///
/// `declared` must already be in declaration order; that order is kept.
pub fn missing_prerequisites<'a, I>(
    declared: Vec<PrerequisiteRef>,
    completed: I,
) -> Vec<PrerequisiteRef>
where
    I: IntoIterator<Item = &'a str>,
{
    let completed: HashSet<&str> = completed.into_iter().collect();
    declared
        .into_iter()
        .filter(|prerequisite| !completed.contains(prerequisite.course_id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prerequisite(id: &str, title: &str) -> PrerequisiteRef {
        PrerequisiteRef {
            course_id: id.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn no_prerequisites_means_eligible() {
        assert!(missing_prerequisites(Vec::new(), ["CRS00001"]).is_empty());
    }

    #[test]
    fn reports_only_the_uncompleted_prerequisite() {
        let declared = vec![
            prerequisite("CRS00001", "Python Basics"),
            prerequisite("CRS00002", "Linear Algebra"),
        ];

        let missing = missing_prerequisites(declared, ["CRS00001"]);

        assert_eq!(missing, vec![prerequisite("CRS00002", "Linear Algebra")]);
    }

    #[test]
    fn keeps_declaration_order() {
        let declared = vec![
            prerequisite("CRS00007", "Statistics"),
            prerequisite("CRS00003", "Calculus"),
            prerequisite("CRS00005", "Python Basics"),
        ];

        let missing = missing_prerequisites(declared, ["CRS00003"]);
        let ids: Vec<_> = missing.iter().map(|p| p.course_id.as_str()).collect();

        assert_eq!(ids, ["CRS00007", "CRS00005"]);
    }

    #[test]
    fn unrelated_completions_do_not_count() {
        let declared = vec![prerequisite("CRS00001", "Python Basics")];
        let missing = missing_prerequisites(declared, ["CRS00009"]);
        assert_eq!(missing.len(), 1);
    }
}
