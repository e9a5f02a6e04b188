//! Property object entity - Defines a kind of property (e.g. "Color").
//!
//! The value type decides which column of the dependent property values is
//! active. Values are protected: a property object cannot be deleted while any
//! value still references it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which value column a property object's values use
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Free text, stored in `value_string`
    #[sea_orm(string_value = "string")]
    String,
    /// Fixed-point number, stored in `value_decimal`
    #[sea_orm(string_value = "decimal")]
    Decimal,
}

impl ValueType {
    /// Stored label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Decimal => "decimal",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Property object database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property_objects")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g. "Color")
    pub title: String,
    /// URL-safe code
    pub code: String,
    /// Type of the values
    pub value_type: ValueType,
}

/// Defines relationships between `PropertyObject` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One property object has many values
    #[sea_orm(has_many = "super::property_value::Entity")]
    PropertyValues,
    /// Association rows linking this property object to categories
    #[sea_orm(has_many = "super::category_property::Entity")]
    CategoryProperty,
}

impl Related<super::property_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyValues.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::category_property::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::category_property::Relation::PropertyObject.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.value_type)
    }
}
