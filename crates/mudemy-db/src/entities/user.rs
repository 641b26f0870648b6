//! User accounts
//!
//! A single row may be instructor, student and admin at once; the role a
//! session acts as is chosen at login and must be permitted by these flags.

use mudemy_core::Role;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// `USR00001` style code
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub full_name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub last_login: Option<ChronoDateTimeUtc>,

    /// IFlag
    pub is_instructor: bool,
    /// SFlag
    pub is_student: bool,
    pub is_admin: bool,

    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub years_of_experience: Option<i32>,
    pub total_enrollments: i32,

    pub created_at: ChronoDateTimeUtc,
}

impl Model {
    /// Whether the account flags allow acting as `role`
    pub fn permits(&self, role: Role) -> bool {
        match role {
            Role::Tutor => self.is_instructor,
            Role::Tutee => self.is_student,
            Role::Admin => self.is_admin,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::interest::Entity")]
    Interests,

    #[sea_orm(has_many = "super::qualification::Entity")]
    Qualifications,

    #[sea_orm(has_many = "super::instruct::Entity")]
    Instructs,

    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,

    #[sea_orm(has_many = "super::take::Entity")]
    Takes,
}

impl Related<super::interest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Interests.def()
    }
}

impl Related<super::qualification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Qualifications.def()
    }
}

impl Related<super::instruct::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructs.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::take::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Takes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
