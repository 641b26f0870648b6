//! Student enrollments in courses

use mudemy_core::EnrollmentStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum EnrollmentState {
    #[sea_orm(string_value = "Active")]
    Active,

    #[sea_orm(string_value = "Completed")]
    Completed,

    #[sea_orm(string_value = "Dropped")]
    Dropped,
}

impl From<EnrollmentStatus> for EnrollmentState {
    fn from(value: EnrollmentStatus) -> Self {
        match value {
            EnrollmentStatus::Active => EnrollmentState::Active,
            EnrollmentStatus::Completed => EnrollmentState::Completed,
            EnrollmentStatus::Dropped => EnrollmentState::Dropped,
        }
    }
}

impl From<EnrollmentState> for EnrollmentStatus {
    fn from(value: EnrollmentState) -> Self {
        match value {
            EnrollmentState::Active => EnrollmentStatus::Active,
            EnrollmentState::Completed => EnrollmentStatus::Completed,
            EnrollmentState::Dropped => EnrollmentStatus::Dropped,
        }
    }
}

/// Unique on (course_id, payment_id, student_id)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub course_id: String,
    pub student_id: String,
    pub payment_id: String,
    pub status: EnrollmentState,
    pub enrolled_at: ChronoDateTimeUtc,
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
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::payment::Entity",
        from = "Column::PaymentId",
        to = "super::payment::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Payment,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
