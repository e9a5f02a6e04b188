//! Product entity - A catalog item identified externally by its sku.
//!
//! The `image` column holds the storage-relative path of the uploaded original
//! (e.g. `images/widget.png`). Generated variants are siblings of that file and
//! are not referenced from the row; `variant_status` records the outcome of the
//! last generation attempt.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability of a product
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ProductStatus {
    /// Available right now
    #[sea_orm(string_value = "in stock")]
    #[serde(rename = "in stock")]
    InStock,
    /// Can be ordered from the supplier
    #[default]
    #[sea_orm(string_value = "on order")]
    #[serde(rename = "on order")]
    OnOrder,
    /// A delivery is on its way
    #[sea_orm(string_value = "receipt expected")]
    #[serde(rename = "receipt expected")]
    ReceiptExpected,
    /// Cannot be obtained at the moment
    #[sea_orm(string_value = "not available")]
    #[serde(rename = "not available")]
    NotAvailable,
    /// Discontinued
    #[sea_orm(string_value = "not produced")]
    #[serde(rename = "not produced")]
    NotProduced,
}

impl ProductStatus {
    /// Stored label, identical to the serialized form
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "in stock",
            Self::OnOrder => "on order",
            Self::ReceiptExpected => "receipt expected",
            Self::NotAvailable => "not available",
            Self::NotProduced => "not produced",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of the last web variant generation for a product image
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum VariantStatus {
    /// No image attached
    #[default]
    #[sea_orm(string_value = "none")]
    #[serde(rename = "none")]
    NoImage,
    /// A `.webp` sibling was written
    #[sea_orm(string_value = "generated")]
    Generated,
    /// The image extension is not one we convert
    #[sea_orm(string_value = "skipped")]
    Skipped,
    /// Decoding or encoding failed
    #[sea_orm(string_value = "failed")]
    Failed,
}

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub title: String,
    /// Stock keeping unit, unique across all products
    #[sea_orm(unique)]
    pub sku: String,
    /// Unit price with two decimal places
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub price: Decimal,
    /// Availability
    pub status: ProductStatus,
    /// Storage-relative path of the uploaded image, if any
    pub image: Option<String>,
    /// Result of the last variant generation
    pub variant_status: VariantStatus,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Association rows linking this product to property values
    #[sea_orm(has_many = "super::product_property::Entity")]
    ProductProperty,
}

impl Related<super::product_property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductProperty.def()
    }
}

impl Related<super::property_value::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_property::Relation::PropertyValue.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_property::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
