//! Junction table between products and the property values they carry.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product ↔ property value association
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_properties")]
pub struct Model {
    /// Associated property value
    #[sea_orm(primary_key, auto_increment = false)]
    pub property_value_id: i64,
    /// Associated product
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
}

/// Both sides of the association
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The property value side
    #[sea_orm(
        belongs_to = "super::property_value::Entity",
        from = "Column::PropertyValueId",
        to = "super::property_value::Column::Id",
        on_delete = "Cascade"
    )]
    PropertyValue,
    /// The product side
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::property_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyValue.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
