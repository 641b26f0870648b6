//! Required-course relation gating enrollment

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prerequisites")]
pub struct Model {
    /// Course that declares the requirement
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: String,

    /// Course that must be completed first
    #[sea_orm(primary_key, auto_increment = false)]
    pub required_course_id: String,

    /// Declaration order of a course's prerequisites
    pub declared_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::RequiredCourseId",
        to = "super::course::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    RequiredCourse,
}

impl ActiveModelBehavior for ActiveModel {}
