//! Catalog seed configuration loaded from a TOML file.
//!
//! The seed file declares property objects (with their initial values),
//! categories (with the codes of the property objects they use) and products.
//! It is applied by [`crate::core::seed::seed_catalog`].

use crate::entities::{ProductStatus, ValueType};
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the whole seed file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Property objects to create
    #[serde(default)]
    pub property_objects: Vec<PropertyObjectConfig>,
    /// Categories to create
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Products to create
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

/// A property object and its initial values
#[derive(Debug, Deserialize, Clone)]
pub struct PropertyObjectConfig {
    /// Display name
    pub title: String,
    /// URL-safe code, derived from the title when absent
    pub code: Option<String>,
    /// `"string"` or `"decimal"`
    pub value_type: ValueType,
    /// Initial values, parsed according to `value_type`
    #[serde(default)]
    pub values: Vec<String>,
}

/// A category and the property objects it uses
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Display name
    pub title: String,
    /// URL-safe slug, derived from the title when absent
    pub slug: Option<String>,
    /// Codes of property objects relevant to this category
    #[serde(default)]
    pub properties: Vec<String>,
}

/// A product, identified by its sku
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Display name
    pub title: String,
    /// Unique stock keeping unit
    pub sku: String,
    /// Unit price, e.g. `"15.50"`
    pub price: Decimal,
    /// Availability label, `"on order"` when absent
    #[serde(default)]
    pub status: ProductStatus,
    /// Image already present under the media root, e.g. `"images/widget.png"`
    pub image: Option<String>,
}

/// Loads a catalog seed file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path = path.as_ref();
    tracing::debug!("Loading catalog seed from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read catalog seed {}: {e}", path.display()),
    })?;

    parse_catalog(&contents)
}

/// Parses the contents of a catalog seed file
pub fn parse_catalog(contents: &str) -> Result<CatalogConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog seed: {e}"),
    })
}
