//! Shared test utilities for the catalog.
//!
//! This module provides helpers for setting up an in-memory database, a
//! temporary media root, and test products with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::product::{self, NewProduct},
    entities,
    errors::Result,
    media::{MediaStorage, VariantFailurePolicy},
};
use image::{ImageFormat, Rgba, RgbaImage};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A media root in a temporary directory with an empty `images/` folder.
/// The directory is removed when this is dropped.
pub struct TestMedia {
    /// Storage rooted in the temporary directory, served under `/media/`
    pub storage: MediaStorage,
    _temp: TempDir,
}

impl TestMedia {
    /// Creates the temporary media root.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        std::fs::create_dir_all(temp.path().join(crate::media::IMAGES_DIR))?;
        Ok(Self {
            storage: MediaStorage::new(temp.path(), "/media/"),
            _temp: temp,
        })
    }

    /// Writes a small RGBA png into `images/` and returns its stored name.
    pub fn store_png(&self, filename: &str) -> String {
        let name = format!("{}/{filename}", crate::media::IMAGES_DIR);
        std::fs::write(self.storage.path(&name), png_bytes()).unwrap();
        name
    }
}

/// Encodes a 4x4 half-transparent red png.
#[must_use]
pub fn png_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 128]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Sets up a database and a media root together.
pub async fn setup_catalog() -> Result<(DatabaseConnection, TestMedia)> {
    Ok((setup_test_db().await?, TestMedia::new()?))
}

/// A new product without image.
///
/// # Defaults
/// * price: 15.50
/// * status: on order
#[must_use]
pub fn new_product(title: &str, sku: &str) -> NewProduct {
    NewProduct {
        title: title.to_string(),
        sku: sku.to_string(),
        price: Decimal::new(1550, 2),
        ..Default::default()
    }
}

/// Creates a test product without image.
pub async fn create_test_product(
    db: &DatabaseConnection,
    media: &TestMedia,
    title: &str,
    sku: &str,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        &media.storage,
        VariantFailurePolicy::Abort,
        new_product(title, sku),
    )
    .await
}
