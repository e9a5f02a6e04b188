//! Core business logic - framework-agnostic catalog operations.
//!
//! Functions here take a database connection (and, for products, the media
//! storage) and return [`crate::errors::Result`]. They are what the read API
//! and any administrative tooling build on.

/// Category operations and category ↔ property object links
pub mod category;
/// Field validation and slug helpers
pub mod fields;
/// Product operations, including web variant generation on write
pub mod product;
/// Property objects, property values and product ↔ value links
pub mod property;
/// Catalog seeding from a TOML file
pub mod seed;
