//! Reading material lessons

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contents")]
pub struct Model {
    /// Same code as the owning lesson
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub module_id: String,
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub slides: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lesson::Entity",
        from = "Column::Id",
        to = "super::lesson::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Lesson,

    #[sea_orm(has_many = "super::content_media::Entity")]
    Media,
}

impl Related<super::lesson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl Related<super::content_media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Media.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
