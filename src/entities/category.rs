//! Category entity - Groups the property objects relevant to a kind of item.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub title: String,
    /// URL-safe slug
    pub slug: String,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Association rows linking this category to property objects
    #[sea_orm(has_many = "super::category_property::Entity")]
    CategoryProperty,
}

impl Related<super::category_property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryProperty.def()
    }
}

impl Related<super::property_object::Entity> for Entity {
    fn to() -> RelationDef {
        super::category_property::Relation::PropertyObject.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::category_property::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
