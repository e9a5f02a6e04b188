//! Junction table between categories and property objects.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category ↔ property object association
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category_properties")]
pub struct Model {
    /// Associated category
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: i64,
    /// Associated property object
    #[sea_orm(primary_key, auto_increment = false)]
    pub property_object_id: i64,
}

/// Both sides of the association
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The category side
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    /// The property object side
    #[sea_orm(
        belongs_to = "super::property_object::Entity",
        from = "Column::PropertyObjectId",
        to = "super::property_object::Column::Id",
        on_delete = "Cascade"
    )]
    PropertyObject,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::property_object::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyObject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
