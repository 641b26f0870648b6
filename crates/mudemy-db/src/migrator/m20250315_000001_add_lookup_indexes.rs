//! Indexes for the foreign keys walked by progress and eligibility queries

use sea_orm_migration::prelude::*;

use super::m20250301_000001_init_schema::{Enrollment, Lesson, Module, Prerequisite, Take};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_modules_course_id")
                    .table(Module::Table)
                    .col(Module::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lessons_module_id")
                    .table(Lesson::Table)
                    .col(Lesson::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_takes_lesson_id")
                    .table(Take::Table)
                    .col(Take::LessonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_student_status")
                    .table(Enrollment::Table)
                    .col(Enrollment::StudentId)
                    .col(Enrollment::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prerequisites_required_course_id")
                    .table(Prerequisite::Table)
                    .col(Prerequisite::RequiredCourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_prerequisites_required_course_id")
                    .table(Prerequisite::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollments_student_status")
                    .table(Enrollment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_takes_lesson_id")
                    .table(Take::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_lessons_module_id")
                    .table(Lesson::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_modules_course_id")
                    .table(Module::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
