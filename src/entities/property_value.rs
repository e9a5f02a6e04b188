//! Property value entity - One concrete value of a property object (e.g. "Red").
//!
//! Exactly one of `value_string` / `value_decimal` is populated, matching the
//! parent's [`ValueType`](super::property_object::ValueType). Rows are only
//! built through [`PropertyValueData`], so the two can't disagree.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::property_object::ValueType;

/// Property value database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property_values")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Parent property object
    pub property_object_id: i64,
    /// Active when the parent is a string property
    pub value_string: Option<String>,
    /// Active when the parent is a decimal property
    #[sea_orm(column_type = "Decimal(Some((11, 2)))", nullable)]
    pub value_decimal: Option<Decimal>,
    /// URL-safe code
    pub code: String,
}

/// Defines relationships between `PropertyValue` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each value belongs to one property object, which may not be deleted while referenced
    #[sea_orm(
        belongs_to = "super::property_object::Entity",
        from = "Column::PropertyObjectId",
        to = "super::property_object::Column::Id",
        on_delete = "Restrict"
    )]
    PropertyObject,
    /// Association rows linking this value to products
    #[sea_orm(has_many = "super::product_property::Entity")]
    ProductProperty,
}

impl Related<super::property_object::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyObject.def()
    }
}

impl Related<super::product_property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductProperty.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_property::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_property::Relation::PropertyValue.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A typed property value
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValueData {
    /// Value of a string property
    Text(String),
    /// Value of a decimal property
    Decimal(Decimal),
}

impl PropertyValueData {
    /// The value type this data belongs to
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Text(_) => ValueType::String,
            Self::Decimal(_) => ValueType::Decimal,
        }
    }

    /// Splits the value into its `(value_string, value_decimal)` columns
    #[must_use]
    pub fn into_columns(self) -> (Option<String>, Option<Decimal>) {
        match self {
            Self::Text(text) => (Some(text), None),
            Self::Decimal(number) => (None, Some(number)),
        }
    }
}

impl fmt::Display for PropertyValueData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Decimal(number) => write!(f, "{number}"),
        }
    }
}

impl Model {
    /// Typed view of whichever value column is populated
    #[must_use]
    pub fn value(&self) -> Option<PropertyValueData> {
        match (&self.value_string, self.value_decimal) {
            (Some(text), _) => Some(PropertyValueData::Text(text.clone())),
            (None, Some(number)) => Some(PropertyValueData::Decimal(number)),
            (None, None) => None,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => value.fmt(f),
            None => f.write_str("None"),
        }
    }
}
