//! Aggregate queries spanning several tables

use mudemy_core::{
    eligibility, DashboardTab, EnrollmentStatus, LessonProgress, PrerequisiteRef,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;
use std::collections::HashSet;

use crate::entities::{
    course, enrollment, enrollment::EnrollmentState, lesson, module, prerequisite, quiz,
    quiz_submission, take,
};

/// Prerequisites of `course_id` in declaration order
pub async fn declared_prerequisites<C>(
    conn: &C,
    course_id: &str,
) -> Result<Vec<PrerequisiteRef>, DbErr>
where
    C: ConnectionTrait,
{
    let rows: Vec<(String, String)> = prerequisite::Entity::find()
        .select_only()
        .column(prerequisite::Column::RequiredCourseId)
        .column(course::Column::Title)
        .join(JoinType::InnerJoin, prerequisite::Relation::RequiredCourse.def())
        .filter(prerequisite::Column::CourseId.eq(course_id))
        .order_by_asc(prerequisite::Column::DeclaredAt)
        .order_by_asc(prerequisite::Column::RequiredCourseId)
        .into_tuple()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(course_id, title)| PrerequisiteRef { course_id, title })
        .collect())
}

/// Courses in which the student holds a completed enrollment
pub async fn completed_course_ids<C>(conn: &C, student_id: &str) -> Result<Vec<String>, DbErr>
where
    C: ConnectionTrait,
{
    enrollment::Entity::find()
        .select_only()
        .column(enrollment::Column::CourseId)
        .filter(enrollment::Column::StudentId.eq(student_id))
        .filter(enrollment::Column::Status.eq(EnrollmentState::Completed))
        .distinct()
        .into_tuple()
        .all(conn)
        .await
}

/// Prerequisites of `course_id` that `student_id` has not completed yet
pub async fn missing_prerequisites<C>(
    conn: &C,
    course_id: &str,
    student_id: &str,
) -> Result<Vec<PrerequisiteRef>, DbErr>
where
    C: ConnectionTrait,
{
    let declared = declared_prerequisites(conn, course_id).await?;
    if declared.is_empty() {
        return Ok(declared);
    }

    let completed = completed_course_ids(conn, student_id).await?;
    Ok(eligibility::missing_prerequisites(
        declared,
        completed.iter().map(String::as_str),
    ))
}

/// Takes recorded by one user across all lessons
pub async fn user_progress<C>(conn: &C, user_id: &str) -> Result<LessonProgress, DbErr>
where
    C: ConnectionTrait,
{
    let total = take::Entity::find()
        .filter(take::Column::UserId.eq(user_id))
        .count(conn)
        .await?;
    let finished = take::Entity::find()
        .filter(take::Column::UserId.eq(user_id))
        .filter(take::Column::IsFinished.eq(true))
        .count(conn)
        .await?;

    Ok(LessonProgress::new(finished, total))
}

/// Share of a course's lessons the user has finished
pub async fn course_progress<C>(
    conn: &C,
    course_id: &str,
    user_id: &str,
) -> Result<LessonProgress, DbErr>
where
    C: ConnectionTrait,
{
    let total = lesson::Entity::find()
        .inner_join(module::Entity)
        .filter(module::Column::CourseId.eq(course_id))
        .count(conn)
        .await?;

    let finished = take::Entity::find()
        .inner_join(lesson::Entity)
        .join(JoinType::InnerJoin, lesson::Relation::Module.def())
        .filter(module::Column::CourseId.eq(course_id))
        .filter(take::Column::UserId.eq(user_id))
        .filter(take::Column::IsFinished.eq(true))
        .count(conn)
        .await?;

    Ok(LessonProgress::new(finished, total))
}

/// How many students started and finished one lesson
pub async fn lesson_completion<C>(conn: &C, lesson_id: &str) -> Result<LessonProgress, DbErr>
where
    C: ConnectionTrait,
{
    let total = take::Entity::find()
        .filter(take::Column::LessonId.eq(lesson_id))
        .count(conn)
        .await?;
    let finished = take::Entity::find()
        .filter(take::Column::LessonId.eq(lesson_id))
        .filter(take::Column::IsFinished.eq(true))
        .count(conn)
        .await?;

    Ok(LessonProgress::new(finished, total))
}

/// One enrolled course on the student dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCourse {
    pub course_id: String,
    pub title: String,
    pub difficulty: course::DifficultyLevel,
    pub status: EnrollmentStatus,
    pub progress: f64,
}

/// Enrolled courses of `student_id` shown on `tab`, oldest enrollment first
pub async fn dashboard_courses<C>(
    conn: &C,
    student_id: &str,
    tab: DashboardTab,
) -> Result<Vec<DashboardCourse>, DbErr>
where
    C: ConnectionTrait,
{
    let enrollments = enrollment::Entity::find()
        .find_also_related(course::Entity)
        .filter(enrollment::Column::StudentId.eq(student_id))
        .order_by_asc(enrollment::Column::EnrolledAt)
        .order_by_asc(enrollment::Column::Id)
        .all(conn)
        .await?;

    let mut seen = HashSet::new();
    let mut courses = Vec::new();

    for (enrollment, course) in enrollments {
        let Some(course) = course else { continue };
        // repeat enrollments in one course show once
        if !seen.insert(course.id.clone()) {
            continue;
        }

        let progress = course_progress(conn, &course.id, student_id).await?;
        if !tab.matches(progress.completion_rate) {
            continue;
        }

        courses.push(DashboardCourse {
            course_id: course.id,
            title: course.title,
            difficulty: course.difficulty,
            status: enrollment.status.into(),
            progress: progress.completion_rate,
        });
    }

    Ok(courses)
}

/// Grade summary of one quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizStats {
    pub quiz_id: String,
    pub title: String,
    pub submissions: u64,
    pub average_grade: f64,
    pub highest_grade: f64,
    pub lowest_grade: f64,
}

/// Count, mean, max and min of a set of grades; `None` when empty
pub fn summarize_grades(grades: &[f64]) -> Option<(u64, f64, f64, f64)> {
    if grades.is_empty() {
        return None;
    }
    let sum: f64 = grades.iter().sum();
    let highest = grades.iter().copied().fold(f64::MIN, f64::max);
    let lowest = grades.iter().copied().fold(f64::MAX, f64::min);
    Some((grades.len() as u64, sum / grades.len() as f64, highest, lowest))
}

/// Graded-submission statistics for every quiz in a module
///
/// Quizzes with fewer than `min_submissions` graded submissions are left
/// out, as are quizzes nobody has been graded on.
pub async fn quiz_stats<C>(
    conn: &C,
    module_id: &str,
    min_submissions: u64,
) -> Result<Vec<QuizStats>, DbErr>
where
    C: ConnectionTrait,
{
    let quizzes = quiz::Entity::find()
        .filter(quiz::Column::ModuleId.eq(module_id))
        .order_by_asc(quiz::Column::Id)
        .all(conn)
        .await?;

    let mut stats = Vec::with_capacity(quizzes.len());
    for quiz in quizzes {
        let grades: Vec<Option<f64>> = quiz_submission::Entity::find()
            .select_only()
            .column(quiz_submission::Column::Grade)
            .filter(quiz_submission::Column::QuizId.eq(quiz.id.as_str()))
            .filter(quiz_submission::Column::Grade.is_not_null())
            .into_tuple()
            .all(conn)
            .await?;
        let grades: Vec<f64> = grades.into_iter().flatten().collect();

        let Some((submissions, average_grade, highest_grade, lowest_grade)) =
            summarize_grades(&grades)
        else {
            continue;
        };
        if submissions < min_submissions {
            continue;
        }

        stats.push(QuizStats {
            quiz_id: quiz.id,
            title: quiz.title,
            submissions,
            average_grade,
            highest_grade,
            lowest_grade,
        });
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_empty_grades() {
        assert_eq!(summarize_grades(&[]), None);
    }

    #[test]
    fn summarize_grades_reports_extremes() {
        let (count, average, highest, lowest) = summarize_grades(&[6.0, 9.0, 7.5]).unwrap();
        assert_eq!(count, 3);
        assert_eq!(average, 7.5);
        assert_eq!(highest, 9.0);
        assert_eq!(lowest, 6.0);
    }
}
