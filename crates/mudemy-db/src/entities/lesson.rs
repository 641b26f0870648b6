//! Lessons: the shared supertype of content, assignments and quizzes
//!
//! Every content, assignment and quiz row has a lesson row with the same id.
//! Progress (takes) and resource attachments reference lessons.

use mudemy_core::LessonKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum LessonType {
    #[sea_orm(string_value = "content")]
    Content,

    #[sea_orm(string_value = "assignment")]
    Assignment,

    #[sea_orm(string_value = "quiz")]
    Quiz,
}

impl From<LessonKind> for LessonType {
    fn from(value: LessonKind) -> Self {
        match value {
            LessonKind::Content => LessonType::Content,
            LessonKind::Assignment => LessonType::Assignment,
            LessonKind::Quiz => LessonType::Quiz,
        }
    }
}

impl From<LessonType> for LessonKind {
    fn from(value: LessonType) -> Self {
        match value {
            LessonType::Content => LessonKind::Content,
            LessonType::Assignment => LessonKind::Assignment,
            LessonType::Quiz => LessonKind::Quiz,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub module_id: String,
    pub kind: LessonType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::module::Entity",
        from = "Column::ModuleId",
        to = "super::module::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Module,

    #[sea_orm(has_many = "super::take::Entity")]
    Takes,

    #[sea_orm(has_many = "super::provide_resource::Entity")]
    ProvidedResources,
}

impl Related<super::module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl Related<super::take::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Takes.def()
    }
}

impl Related<super::provide_resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProvidedResources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
