//! Initial Mudemy schema

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. users
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(User::Username).string_len(100).not_null().unique_key())
                    .col(ColumnDef::new(User::Email).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(User::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(User::FullName).string_len(255).not_null())
                    .col(ColumnDef::new(User::City).string_len(100).null())
                    .col(ColumnDef::new(User::Country).string_len(100).null())
                    .col(ColumnDef::new(User::Phone).string_len(20).null())
                    .col(ColumnDef::new(User::DateOfBirth).date().null())
                    .col(ColumnDef::new(User::LastLogin).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(User::IsInstructor).boolean().not_null().default(false))
                    .col(ColumnDef::new(User::IsStudent).boolean().not_null().default(true))
                    .col(ColumnDef::new(User::IsAdmin).boolean().not_null().default(false))
                    .col(ColumnDef::new(User::Bio).text().null())
                    .col(ColumnDef::new(User::YearsOfExperience).integer().null())
                    .col(ColumnDef::new(User::TotalEnrollments).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 2. interests
        manager
            .create_table(
                Table::create()
                    .table(Interest::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Interest::UserId).string_len(8).not_null())
                    .col(ColumnDef::new(Interest::Interest).string_len(100).not_null())
                    .primary_key(
                        Index::create()
                            .col(Interest::UserId)
                            .col(Interest::Interest),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interests_user_id")
                            .from(Interest::Table, Interest::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 3. qualifications
        manager
            .create_table(
                Table::create()
                    .table(Qualification::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Qualification::UserId).string_len(8).not_null())
                    .col(ColumnDef::new(Qualification::Qualification).string_len(255).not_null())
                    .primary_key(
                        Index::create()
                            .col(Qualification::UserId)
                            .col(Qualification::Qualification),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_qualifications_user_id")
                            .from(Qualification::Table, Qualification::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 4. courses
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Course::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Course::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Course::Difficulty).string_len(32).not_null())
                    .col(ColumnDef::new(Course::Language).string_len(50).not_null())
                    .col(ColumnDef::new(Course::Description).text().null())
                    .col(ColumnDef::new(Course::Price).big_integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Course::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 5. categories
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Category::CourseId).string_len(8).not_null())
                    .col(ColumnDef::new(Category::Category).string_len(100).not_null())
                    .primary_key(
                        Index::create()
                            .col(Category::CourseId)
                            .col(Category::Category),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_course_id")
                            .from(Category::Table, Category::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 6. prerequisites
        manager
            .create_table(
                Table::create()
                    .table(Prerequisite::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Prerequisite::CourseId).string_len(8).not_null())
                    .col(ColumnDef::new(Prerequisite::RequiredCourseId).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Prerequisite::DeclaredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Prerequisite::CourseId)
                            .col(Prerequisite::RequiredCourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prerequisites_course_id")
                            .from(Prerequisite::Table, Prerequisite::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prerequisites_required_course_id")
                            .from(Prerequisite::Table, Prerequisite::RequiredCourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 7. instructs
        manager
            .create_table(
                Table::create()
                    .table(Instruct::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Instruct::UserId).string_len(8).not_null())
                    .col(ColumnDef::new(Instruct::CourseId).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Instruct::AssignedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Instruct::UserId)
                            .col(Instruct::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instructs_user_id")
                            .from(Instruct::Table, Instruct::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instructs_course_id")
                            .from(Instruct::Table, Instruct::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 8. modules
        manager
            .create_table(
                Table::create()
                    .table(Module::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Module::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Module::CourseId).string_len(8).not_null())
                    .col(ColumnDef::new(Module::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Module::Position).integer().not_null().default(1))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_modules_course_id")
                            .from(Module::Table, Module::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 9. lessons
        manager
            .create_table(
                Table::create()
                    .table(Lesson::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lesson::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Lesson::ModuleId).string_len(8).not_null())
                    .col(ColumnDef::new(Lesson::Kind).string_len(32).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lessons_module_id")
                            .from(Lesson::Table, Lesson::ModuleId)
                            .to(Module::Table, Module::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 10. contents
        manager
            .create_table(
                Table::create()
                    .table(Content::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Content::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Content::ModuleId).string_len(8).not_null())
                    .col(ColumnDef::new(Content::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Content::Slides).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contents_id")
                            .from(Content::Table, Content::Id)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 11. content_media
        manager
            .create_table(
                Table::create()
                    .table(ContentMedia::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ContentMedia::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(ContentMedia::ContentId).string_len(8).not_null())
                    .col(ColumnDef::new(ContentMedia::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(ContentMedia::Body).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_media_content_id")
                            .from(ContentMedia::Table, ContentMedia::ContentId)
                            .to(Content::Table, Content::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 12. payments
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Payment::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Payment::UserId).string_len(8).not_null())
                    .col(ColumnDef::new(Payment::Amount).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Payment::Method).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Payment::PaidAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_user_id")
                            .from(Payment::Table, Payment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 13. enrollments
        manager
            .create_table(
                Table::create()
                    .table(Enrollment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Enrollment::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Enrollment::CourseId).string_len(8).not_null())
                    .col(ColumnDef::new(Enrollment::StudentId).string_len(8).not_null())
                    .col(ColumnDef::new(Enrollment::PaymentId).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Enrollment::Status)
                            .string_len(32)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Enrollment::EnrolledAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_course_id")
                            .from(Enrollment::Table, Enrollment::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_student_id")
                            .from(Enrollment::Table, Enrollment::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_payment_id")
                            .from(Enrollment::Table, Enrollment::PaymentId)
                            .to(Payment::Table, Payment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 14. certificates
        manager
            .create_table(
                Table::create()
                    .table(Certificate::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Certificate::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Certificate::CourseId).string_len(8).not_null())
                    .col(ColumnDef::new(Certificate::StudentId).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Certificate::CertificateNumber)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Certificate::IssuedOn).date().not_null())
                    .col(ColumnDef::new(Certificate::ExpiresOn).date().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_certificates_course_id")
                            .from(Certificate::Table, Certificate::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_certificates_student_id")
                            .from(Certificate::Table, Certificate::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 15. assignments
        manager
            .create_table(
                Table::create()
                    .table(Assignment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Assignment::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Assignment::ModuleId).string_len(8).not_null())
                    .col(ColumnDef::new(Assignment::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Assignment::Description).text().null())
                    .col(ColumnDef::new(Assignment::Deadline).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignments_id")
                            .from(Assignment::Table, Assignment::Id)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 16. quizzes
        manager
            .create_table(
                Table::create()
                    .table(Quiz::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Quiz::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Quiz::ModuleId).string_len(8).not_null())
                    .col(ColumnDef::new(Quiz::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Quiz::TimeLimitSecs).integer().null())
                    .col(ColumnDef::new(Quiz::MaxAttempts).integer().not_null().default(1))
                    .col(ColumnDef::new(Quiz::Deadline).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quizzes_id")
                            .from(Quiz::Table, Quiz::Id)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 17. questions
        manager
            .create_table(
                Table::create()
                    .table(Question::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Question::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Question::QuizId).string_len(8).not_null())
                    .col(ColumnDef::new(Question::Content).text().not_null())
                    .col(ColumnDef::new(Question::CorrectAnswer).string_len(255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questions_quiz_id")
                            .from(Question::Table, Question::QuizId)
                            .to(Quiz::Table, Quiz::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 18. answers
        manager
            .create_table(
                Table::create()
                    .table(Answer::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Answer::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Answer::QuestionId).string_len(8).not_null())
                    .col(ColumnDef::new(Answer::Body).string_len(255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_answers_question_id")
                            .from(Answer::Table, Answer::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 19. assignment_submissions
        manager
            .create_table(
                Table::create()
                    .table(AssignmentSubmission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentSubmission::Id)
                            .string_len(8)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmission::AssignmentId)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmission::UserId).string_len(8).not_null())
                    .col(ColumnDef::new(AssignmentSubmission::Content).text().not_null())
                    .col(ColumnDef::new(AssignmentSubmission::Grade).double().null())
                    .col(
                        ColumnDef::new(AssignmentSubmission::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_submissions_assignment_id")
                            .from(AssignmentSubmission::Table, AssignmentSubmission::AssignmentId)
                            .to(Assignment::Table, Assignment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_submissions_user_id")
                            .from(AssignmentSubmission::Table, AssignmentSubmission::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 20. quiz_submissions
        manager
            .create_table(
                Table::create()
                    .table(QuizSubmission::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(QuizSubmission::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(QuizSubmission::QuizId).string_len(8).not_null())
                    .col(ColumnDef::new(QuizSubmission::UserId).string_len(8).not_null())
                    .col(ColumnDef::new(QuizSubmission::Content).text().not_null())
                    .col(ColumnDef::new(QuizSubmission::Grade).double().null())
                    .col(
                        ColumnDef::new(QuizSubmission::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quiz_submissions_quiz_id")
                            .from(QuizSubmission::Table, QuizSubmission::QuizId)
                            .to(Quiz::Table, Quiz::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quiz_submissions_user_id")
                            .from(QuizSubmission::Table, QuizSubmission::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 21. takes
        manager
            .create_table(
                Table::create()
                    .table(Take::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Take::UserId).string_len(8).not_null())
                    .col(ColumnDef::new(Take::LessonId).string_len(8).not_null())
                    .col(ColumnDef::new(Take::IsFinished).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Take::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Take::UserId)
                            .col(Take::LessonId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_takes_user_id")
                            .from(Take::Table, Take::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_takes_lesson_id")
                            .from(Take::Table, Take::LessonId)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 22. resources
        manager
            .create_table(
                Table::create()
                    .table(Resource::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Resource::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Resource::FileName).string_len(255).not_null())
                    .col(ColumnDef::new(Resource::FileLink).string_len(500).not_null())
                    .col(ColumnDef::new(Resource::ExternalLink).string_len(500).null())
                    .to_owned(),
            )
            .await?;

        // 23. provide_resources
        manager
            .create_table(
                Table::create()
                    .table(ProvideResource::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProvideResource::ResourceId).string_len(8).not_null())
                    .col(ColumnDef::new(ProvideResource::LessonId).string_len(8).not_null())
                    .primary_key(
                        Index::create()
                            .col(ProvideResource::ResourceId)
                            .col(ProvideResource::LessonId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provide_resources_resource_id")
                            .from(ProvideResource::Table, ProvideResource::ResourceId)
                            .to(Resource::Table, Resource::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provide_resources_lesson_id")
                            .from(ProvideResource::Table, ProvideResource::LessonId)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_course_payment_student")
                    .table(Enrollment::Table)
                    .col(Enrollment::CourseId)
                    .col(Enrollment::PaymentId)
                    .col(Enrollment::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_certificates_course_student")
                    .table(Certificate::Table)
                    .col(Certificate::CourseId)
                    .col(Certificate::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse creation order so foreign keys never dangle
        manager
            .drop_table(Table::drop().table(ProvideResource::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Resource::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Take::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(QuizSubmission::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AssignmentSubmission::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Answer::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Question::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Quiz::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Assignment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Certificate::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ContentMedia::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Content::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lesson::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Module::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Instruct::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Prerequisite::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Qualification::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Interest::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

// ============================================================
// Table identifiers
// ============================================================

#[derive(DeriveIden)]
pub(crate) enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FullName,
    City,
    Country,
    Phone,
    DateOfBirth,
    LastLogin,
    IsInstructor,
    IsStudent,
    IsAdmin,
    Bio,
    YearsOfExperience,
    TotalEnrollments,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Interest {
    #[sea_orm(iden = "interests")]
    Table,
    UserId,
    Interest,
}

#[derive(DeriveIden)]
pub(crate) enum Qualification {
    #[sea_orm(iden = "qualifications")]
    Table,
    UserId,
    Qualification,
}

#[derive(DeriveIden)]
pub(crate) enum Course {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Title,
    Difficulty,
    Language,
    Description,
    Price,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Category {
    #[sea_orm(iden = "categories")]
    Table,
    CourseId,
    Category,
}

#[derive(DeriveIden)]
pub(crate) enum Prerequisite {
    #[sea_orm(iden = "prerequisites")]
    Table,
    CourseId,
    RequiredCourseId,
    DeclaredAt,
}

#[derive(DeriveIden)]
pub(crate) enum Instruct {
    #[sea_orm(iden = "instructs")]
    Table,
    UserId,
    CourseId,
    AssignedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Module {
    #[sea_orm(iden = "modules")]
    Table,
    Id,
    CourseId,
    Title,
    Position,
}

#[derive(DeriveIden)]
pub(crate) enum Lesson {
    #[sea_orm(iden = "lessons")]
    Table,
    Id,
    ModuleId,
    Kind,
}

#[derive(DeriveIden)]
pub(crate) enum Content {
    #[sea_orm(iden = "contents")]
    Table,
    Id,
    ModuleId,
    Title,
    Slides,
}

#[derive(DeriveIden)]
pub(crate) enum ContentMedia {
    #[sea_orm(iden = "content_media")]
    Table,
    Id,
    ContentId,
    Kind,
    Body,
}

#[derive(DeriveIden)]
pub(crate) enum Payment {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    UserId,
    Amount,
    Method,
    PaidAt,
}

#[derive(DeriveIden)]
pub(crate) enum Enrollment {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
    CourseId,
    StudentId,
    PaymentId,
    Status,
    EnrolledAt,
}

#[derive(DeriveIden)]
pub(crate) enum Certificate {
    #[sea_orm(iden = "certificates")]
    Table,
    Id,
    CourseId,
    StudentId,
    CertificateNumber,
    IssuedOn,
    ExpiresOn,
}

#[derive(DeriveIden)]
pub(crate) enum Assignment {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    ModuleId,
    Title,
    Description,
    Deadline,
}

#[derive(DeriveIden)]
pub(crate) enum Quiz {
    #[sea_orm(iden = "quizzes")]
    Table,
    Id,
    ModuleId,
    Title,
    TimeLimitSecs,
    MaxAttempts,
    Deadline,
}

#[derive(DeriveIden)]
pub(crate) enum Question {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    QuizId,
    Content,
    CorrectAnswer,
}

#[derive(DeriveIden)]
pub(crate) enum Answer {
    #[sea_orm(iden = "answers")]
    Table,
    Id,
    QuestionId,
    Body,
}

#[derive(DeriveIden)]
pub(crate) enum AssignmentSubmission {
    #[sea_orm(iden = "assignment_submissions")]
    Table,
    Id,
    AssignmentId,
    UserId,
    Content,
    Grade,
    SubmittedAt,
}

#[derive(DeriveIden)]
pub(crate) enum QuizSubmission {
    #[sea_orm(iden = "quiz_submissions")]
    Table,
    Id,
    QuizId,
    UserId,
    Content,
    Grade,
    SubmittedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Take {
    #[sea_orm(iden = "takes")]
    Table,
    UserId,
    LessonId,
    IsFinished,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Resource {
    #[sea_orm(iden = "resources")]
    Table,
    Id,
    FileName,
    FileLink,
    ExternalLink,
}

#[derive(DeriveIden)]
pub(crate) enum ProvideResource {
    #[sea_orm(iden = "provide_resources")]
    Table,
    ResourceId,
    LessonId,
}
