//! Courses offered in the catalog

use mudemy_core::Difficulty;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Difficulty as stored in `courses.difficulty`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum DifficultyLevel {
    #[sea_orm(string_value = "Beginner")]
    Beginner,

    #[sea_orm(string_value = "Intermediate")]
    Intermediate,

    #[sea_orm(string_value = "Advanced")]
    Advanced,
}

impl From<Difficulty> for DifficultyLevel {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Beginner => DifficultyLevel::Beginner,
            Difficulty::Intermediate => DifficultyLevel::Intermediate,
            Difficulty::Advanced => DifficultyLevel::Advanced,
        }
    }
}

impl From<DifficultyLevel> for Difficulty {
    fn from(value: DifficultyLevel) -> Self {
        match value {
            DifficultyLevel::Beginner => Difficulty::Beginner,
            DifficultyLevel::Intermediate => Difficulty::Intermediate,
            DifficultyLevel::Advanced => Difficulty::Advanced,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,
    pub difficulty: DifficultyLevel,
    pub language: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Whole currency units, never negative
    pub price: i64,

    pub created_at: ChronoDateTimeUtc,
}

impl mudemy_core::CatalogEntry for Model {
    fn title(&self) -> &str {
        &self.title
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty.into()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::category::Entity")]
    Categories,

    #[sea_orm(has_many = "super::module::Entity")]
    Modules,

    #[sea_orm(has_many = "super::instruct::Entity")]
    Instructs,

    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Modules.def()
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

impl ActiveModelBehavior for ActiveModel {}
