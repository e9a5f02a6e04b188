//! Entity module - Contains all SeaORM entity definitions for the catalog.
//! Each entity has a Model struct for data and an Entity struct for operations.
//! The two `*_property` modules are junction tables for many-to-many links.

pub mod category;
pub mod category_property;
pub mod product;
pub mod product_property;
pub mod property_object;
pub mod property_value;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use category_property::Entity as CategoryProperty;
pub use product::{
    Column as ProductColumn, Entity as Product, Model as ProductModel, ProductStatus,
    VariantStatus,
};
pub use product_property::Entity as ProductProperty;
pub use property_object::{
    Column as PropertyObjectColumn, Entity as PropertyObject, Model as PropertyObjectModel,
    ValueType,
};
pub use property_value::{
    Column as PropertyValueColumn, Entity as PropertyValue, Model as PropertyValueModel,
    PropertyValueData,
};
