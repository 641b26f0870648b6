//! Progress aggregation for lessons, courses and the student dashboard

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::UnknownVariant;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Percentage of `finished` over `total`, 0 when there is nothing to finish
pub fn completion_rate(finished: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    finished as f64 / total as f64 * 100.0
}

/// Finished versus total lessons for one scope (user, course or lesson)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LessonProgress {
    pub total: u64,
    pub finished: u64,
    pub unfinished: u64,
    pub completion_rate: f64,
}

impl LessonProgress {
    pub fn new(finished: u64, total: u64) -> Self {
        let finished = finished.min(total);
        Self {
            total,
            finished,
            unfinished: total - finished,
            completion_rate: completion_rate(finished, total),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.finished == self.total
    }
}

/// Dashboard tab selecting which enrolled courses are displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTab {
    #[default]
    All,
    InProgress,
    Completed,
}

impl DashboardTab {
    /// Whether a course at `progress` percent belongs on this tab
    pub fn matches(&self, progress: f64) -> bool {
        match self {
            DashboardTab::All => true,
            DashboardTab::InProgress => progress < 100.0,
            DashboardTab::Completed => progress >= 100.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardTab::All => "all",
            DashboardTab::InProgress => "in-progress",
            DashboardTab::Completed => "completed",
        }
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardTab {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(DashboardTab::All),
            "in-progress" | "in_progress" | "inprogress" => Ok(DashboardTab::InProgress),
            "completed" => Ok(DashboardTab::Completed),
            _ => Err(UnknownVariant {
                kind: "dashboard tab",
                value: s.to_string(),
            }),
        }
    }
}

/// Mean of the given percentages, 0 for an empty set
pub fn average_progress<I>(progress: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = progress
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), p| (sum + p, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_of_ten_is_sixty_percent() {
        assert_eq!(completion_rate(6, 10), 60.0);
        let progress = LessonProgress::new(6, 10);
        assert_eq!(progress.unfinished, 4);
        assert_eq!(progress.completion_rate, 60.0);
    }

    #[test]
    fn nothing_to_finish_is_zero_percent() {
        assert_eq!(completion_rate(0, 0), 0.0);
        assert!(!LessonProgress::new(0, 0).is_complete());
    }

    #[test]
    fn finished_never_exceeds_total() {
        let progress = LessonProgress::new(12, 10);
        assert_eq!(progress.finished, 10);
        assert_eq!(progress.completion_rate, 100.0);
        assert!(progress.is_complete());
    }

    #[test]
    fn tabs_split_on_full_completion() {
        assert!(DashboardTab::All.matches(0.0));
        assert!(DashboardTab::InProgress.matches(99.9));
        assert!(!DashboardTab::InProgress.matches(100.0));
        assert!(DashboardTab::Completed.matches(100.0));
        assert!(!DashboardTab::Completed.matches(50.0));
    }

    #[test]
    fn tab_parses_wire_names() {
        assert_eq!("in-progress".parse::<DashboardTab>().unwrap(), DashboardTab::InProgress);
        assert_eq!("Completed".parse::<DashboardTab>().unwrap(), DashboardTab::Completed);
        assert!("archived".parse::<DashboardTab>().is_err());
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average_progress(Vec::new()), 0.0);
        assert_eq!(average_progress([100.0, 50.0, 0.0]), 50.0);
    }
}
