//! Catalog filter and sort pipeline
//!
//! Applied to a bounded list of courses in a fixed order: title search,
//! then difficulty filter, then title sort.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::types::{Difficulty, UnknownVariant};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Anything the catalog pipeline can filter and order
pub trait CatalogEntry {
    fn title(&self) -> &str;
    fn difficulty(&self) -> Difficulty;
}

/// Difficulty filter, `All` keeps every course
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    fn accepts(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => *wanted == difficulty,
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        s.parse().map(DifficultyFilter::Only)
    }
}

/// Title ordering, `None` keeps the fetched order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TitleSort {
    #[default]
    None,
    TitleAsc,
    TitleDesc,
}

impl FromStr for TitleSort {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(TitleSort::None),
            "title_asc" => Ok(TitleSort::TitleAsc),
            "title_desc" => Ok(TitleSort::TitleDesc),
            _ => Err(UnknownVariant {
                kind: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub difficulty: DifficultyFilter,
    pub sort: TitleSort,
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn apply_catalog<T: CatalogEntry>(courses: Vec<T>, query: &CatalogQuery) -> Vec<T> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut courses: Vec<T> = courses
        .into_iter()
        .filter(|course| match &needle {
            Some(needle) => course.title().to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .filter(|course| query.difficulty.accepts(course.difficulty()))
        .collect();

    // sort_by is stable, equal titles keep fetched order
    match query.sort {
        TitleSort::None => {}
        TitleSort::TitleAsc => courses.sort_by(|a, b| compare_titles(a.title(), b.title())),
        TitleSort::TitleDesc => courses.sort_by(|a, b| compare_titles(b.title(), a.title())),
    }

    courses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Course {
        title: &'static str,
        difficulty: Difficulty,
    }

    impl CatalogEntry for Course {
        fn title(&self) -> &str {
            self.title
        }

        fn difficulty(&self) -> Difficulty {
            self.difficulty
        }
    }

    fn catalog() -> Vec<Course> {
        vec![
            Course { title: "Python for Data Science", difficulty: Difficulty::Intermediate },
            Course { title: "Advanced Python Patterns", difficulty: Difficulty::Advanced },
            Course { title: "Rust Systems Programming", difficulty: Difficulty::Advanced },
            Course { title: "intro to python", difficulty: Difficulty::Beginner },
        ]
    }

    fn titles(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.title).collect()
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let result = apply_catalog(catalog(), &CatalogQuery::default());
        assert_eq!(result, catalog());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let query = CatalogQuery {
            search: Some("PYTHON".into()),
            ..Default::default()
        };
        let result = apply_catalog(catalog(), &query);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn search_and_difficulty_both_apply() {
        let query = CatalogQuery {
            search: Some("Python".into()),
            difficulty: DifficultyFilter::Only(Difficulty::Advanced),
            sort: TitleSort::None,
        };
        let result = apply_catalog(catalog(), &query);
        assert_eq!(titles(&result), ["Advanced Python Patterns"]);
    }

    #[test]
    fn sorts_titles_ignoring_case() {
        let query = CatalogQuery {
            sort: TitleSort::TitleAsc,
            ..Default::default()
        };
        let result = apply_catalog(catalog(), &query);
        assert_eq!(
            titles(&result),
            [
                "Advanced Python Patterns",
                "intro to python",
                "Python for Data Science",
                "Rust Systems Programming",
            ]
        );

        let query = CatalogQuery {
            sort: TitleSort::TitleDesc,
            ..Default::default()
        };
        let result = apply_catalog(catalog(), &query);
        assert_eq!(result[0].title, "Rust Systems Programming");
    }

    #[test]
    fn parses_query_parameters() {
        assert_eq!("All".parse::<DifficultyFilter>().unwrap(), DifficultyFilter::All);
        assert_eq!(
            "beginner".parse::<DifficultyFilter>().unwrap(),
            DifficultyFilter::Only(Difficulty::Beginner)
        );
        assert_eq!("title_desc".parse::<TitleSort>().unwrap(), TitleSort::TitleDesc);
        assert!("price_asc".parse::<TitleSort>().is_err());
    }
}
