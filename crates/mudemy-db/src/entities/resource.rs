//! Downloadable files and links

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub file_name: String,
    pub file_link: String,
    pub external_link: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::provide_resource::Entity")]
    Provided,
}

impl Related<super::provide_resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Provided.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
