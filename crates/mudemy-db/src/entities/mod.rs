//! Database entities

pub mod answer;
pub mod assignment;
pub mod assignment_submission;
pub mod category;
pub mod certificate;
pub mod content;
pub mod content_media;
pub mod course;
pub mod enrollment;
pub mod instruct;
pub mod interest;
pub mod lesson;
pub mod module;
pub mod payment;
pub mod prerequisite;
pub mod provide_resource;
pub mod qualification;
pub mod question;
pub mod quiz;
pub mod quiz_submission;
pub mod resource;
pub mod take;
pub mod user;

pub use answer::Entity as Answer;
pub use assignment::Entity as Assignment;
pub use assignment_submission::Entity as AssignmentSubmission;
pub use category::Entity as Category;
pub use certificate::Entity as Certificate;
pub use content::Entity as Content;
pub use content_media::Entity as ContentMedia;
pub use course::Entity as Course;
pub use enrollment::Entity as Enrollment;
pub use instruct::Entity as Instruct;
pub use interest::Entity as Interest;
pub use lesson::Entity as Lesson;
pub use module::Entity as Module;
pub use payment::Entity as Payment;
pub use prerequisite::Entity as Prerequisite;
pub use provide_resource::Entity as ProvideResource;
pub use qualification::Entity as Qualification;
pub use question::Entity as Question;
pub use quiz::Entity as Quiz;
pub use quiz_submission::Entity as QuizSubmission;
pub use resource::Entity as Resource;
pub use take::Entity as Take;
pub use user::Entity as User;

pub mod prelude {
    pub use super::answer::Entity as Answer;
    pub use super::assignment::Entity as Assignment;
    pub use super::assignment_submission::Entity as AssignmentSubmission;
    pub use super::category::Entity as Category;
    pub use super::certificate::Entity as Certificate;
    pub use super::content::Entity as Content;
    pub use super::content_media::Entity as ContentMedia;
    pub use super::course::Entity as Course;
    pub use super::enrollment::Entity as Enrollment;
    pub use super::instruct::Entity as Instruct;
    pub use super::interest::Entity as Interest;
    pub use super::lesson::Entity as Lesson;
    pub use super::module::Entity as Module;
    pub use super::payment::Entity as Payment;
    pub use super::prerequisite::Entity as Prerequisite;
    pub use super::provide_resource::Entity as ProvideResource;
    pub use super::qualification::Entity as Qualification;
    pub use super::question::Entity as Question;
    pub use super::quiz::Entity as Quiz;
    pub use super::quiz_submission::Entity as QuizSubmission;
    pub use super::resource::Entity as Resource;
    pub use super::take::Entity as Take;
    pub use super::user::Entity as User;
}
