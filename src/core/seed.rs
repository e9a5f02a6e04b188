//! Seeds property objects, their values, categories and products from a
//! [`CatalogConfig`].
//!
//! Seeding can run on every start: objects and categories whose code or slug
//! already exist, values already present on their object, and products whose
//! sku is taken are left untouched. Seeded products go through
//! [`product::create_product`], so their images get web variants under the
//! configured [`VariantFailurePolicy`].

use crate::{
    config::catalog::CatalogConfig,
    core::{
        category,
        fields::slugify,
        product::{self, NewProduct},
        property,
    },
    entities::{PropertyValueData, property_value},
    errors::{Error, Result},
    media::{MediaStorage, VariantFailurePolicy},
};
use sea_orm::prelude::*;

/// What a seeding run created
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Property objects created
    pub property_objects: usize,
    /// Property values created
    pub property_values: usize,
    /// Categories created
    pub categories: usize,
    /// Products created
    pub products: usize,
}

/// Applies a catalog seed.
///
/// # Errors
/// Returns an error if a value cannot be parsed for its property object's type,
/// a category names a property code that does not exist, or a product fails
/// validation or variant generation under [`VariantFailurePolicy::Abort`].
pub async fn seed_catalog(
    db: &DatabaseConnection,
    storage: &MediaStorage,
    policy: VariantFailurePolicy,
    config: &CatalogConfig,
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for entry in &config.property_objects {
        let code = entry.code.clone().unwrap_or_else(|| slugify(&entry.title));
        let object = match property::get_property_object_by_code(db, &code).await? {
            Some(object) => object,
            None => {
                summary.property_objects += 1;
                property::create_property_object(db, &entry.title, Some(&code), entry.value_type)
                    .await?
            }
        };

        let mut existing: Vec<PropertyValueData> =
            property::list_property_values(db, Some(object.id))
                .await?
                .iter()
                .filter_map(property_value::Model::value)
                .collect();

        for raw in &entry.values {
            let value = property::parse_value(&object, raw)?;
            if existing.iter().any(|known| same_value(known, &value)) {
                continue;
            }
            property::create_property_value(db, object.id, value.clone(), None).await?;
            existing.push(value);
            summary.property_values += 1;
        }
    }

    for entry in &config.categories {
        let slug = entry.slug.clone().unwrap_or_else(|| slugify(&entry.title));
        let created = match category::get_category_by_slug(db, &slug).await? {
            Some(existing) => existing,
            None => {
                summary.categories += 1;
                category::create_category(db, &entry.title, Some(&slug)).await?
            }
        };

        for code in &entry.properties {
            let object = property::get_property_object_by_code(db, code)
                .await?
                .ok_or_else(|| Error::Config {
                    message: format!(
                        "Category '{}' uses unknown property code '{code}'",
                        entry.title
                    ),
                })?;
            category::add_property_object(db, created.id, object.id).await?;
        }
    }

    for entry in &config.products {
        if product::get_product_by_sku(db, &entry.sku).await?.is_some() {
            continue;
        }
        product::create_product(
            db,
            storage,
            policy,
            NewProduct {
                title: entry.title.clone(),
                sku: entry.sku.clone(),
                price: entry.price,
                status: entry.status,
                image: entry.image.clone(),
            },
        )
        .await?;
        summary.products += 1;
    }

    tracing::info!(
        "Seeded {} property object(s), {} value(s), {} categor(ies), {} product(s)",
        summary.property_objects,
        summary.property_values,
        summary.categories,
        summary.products
    );
    Ok(summary)
}

/// Decimal values compare at the stored two decimal places
fn same_value(a: &PropertyValueData, b: &PropertyValueData) -> bool {
    match (a, b) {
        (PropertyValueData::Decimal(a), PropertyValueData::Decimal(b)) => {
            a.round_dp(2) == b.round_dp(2)
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::{Settings, catalog::parse_catalog};
    use crate::entities::{ProductStatus, VariantStatus};
    use crate::test_utils::*;
    use rust_decimal::Decimal;

    const SEED: &str = r#"
        [[property_objects]]
        title = "Color"
        value_type = "string"
        values = ["Red", "Blue"]

        [[property_objects]]
        title = "Size"
        value_type = "decimal"
        values = ["42", "44.5"]

        [[categories]]
        title = "Shoes"
        properties = ["color", "size"]

        [[products]]
        title = "Runner"
        sku = "RUN-1"
        price = "59.50"
        status = "in stock"
    "#;

    #[tokio::test]
    async fn test_seed_catalog() -> Result<()> {
        let (db, media) = setup_catalog().await?;
        let config = parse_catalog(SEED)?;

        let summary = seed_catalog(&db, &media.storage, VariantFailurePolicy::Abort, &config).await?;

        assert_eq!(
            summary,
            SeedSummary {
                property_objects: 2,
                property_values: 4,
                categories: 1,
                products: 1,
            }
        );
        let shoes = category::get_category_by_slug(&db, "shoes").await?.unwrap();
        let codes: Vec<String> = category::get_category_property_objects(&db, shoes.id)
            .await?
            .into_iter()
            .map(|o| o.code)
            .collect();
        assert_eq!(codes, vec!["color", "size"]);

        let runner = product::get_product_by_sku(&db, "RUN-1").await?.unwrap();
        assert_eq!(runner.price, Decimal::new(5950, 2));
        assert_eq!(runner.status, ProductStatus::InStock);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let (db, media) = setup_catalog().await?;
        let config = parse_catalog(SEED)?;

        seed_catalog(&db, &media.storage, VariantFailurePolicy::Abort, &config).await?;
        let second = seed_catalog(&db, &media.storage, VariantFailurePolicy::Abort, &config).await?;

        assert_eq!(second, SeedSummary::default());
        assert_eq!(property::list_property_values(&db, None).await?.len(), 4);
        assert_eq!(product::list_products(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_decimals_sharing_digits_are_both_seeded() -> Result<()> {
        let (db, media) = setup_catalog().await?;
        let config = parse_catalog(
            r#"
            [[property_objects]]
            title = "Size"
            value_type = "decimal"
            values = ["44.5", "4.45", "44.50"]
            "#,
        )?;

        let summary = seed_catalog(&db, &media.storage, VariantFailurePolicy::Abort, &config).await?;
        let again = seed_catalog(&db, &media.storage, VariantFailurePolicy::Abort, &config).await?;

        assert_eq!(summary.property_values, 2);
        assert_eq!(again.property_values, 0);
        let mut codes: Vec<String> = property::list_property_values(&db, None)
            .await?
            .into_iter()
            .map(|v| v.code)
            .collect();
        codes.sort();
        assert_eq!(codes, vec!["4-45", "44-5"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_cyrillic_entries_get_codes() -> Result<()> {
        let (db, media) = setup_catalog().await?;
        let config = parse_catalog(
            r#"
            [[property_objects]]
            title = "Цвет"
            code = "color"
            value_type = "string"
            values = ["Красный"]

            [[categories]]
            title = "Обувь"
            properties = ["color"]
            "#,
        )?;

        let summary = seed_catalog(&db, &media.storage, VariantFailurePolicy::Abort, &config).await?;

        assert_eq!(summary.property_values, 1);
        assert!(category::get_category_by_slug(&db, "obuv").await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_seeded_product_image_follows_failure_policy() -> Result<()> {
        let (db, media) = setup_catalog().await?;
        media.store_png("good.png");
        std::fs::write(media.storage.path("images/broken.png"), b"garbage")?;
        let config = parse_catalog(
            r#"
            [[products]]
            title = "Good"
            sku = "G-1"
            price = "1.00"
            image = "images/good.png"

            [[products]]
            title = "Broken"
            sku = "B-1"
            price = "1.00"
            image = "images/broken.png"
            "#,
        )?;

        let aborted = seed_catalog(&db, &media.storage, VariantFailurePolicy::Abort, &config).await;
        assert!(matches!(aborted, Err(Error::Image(_))));
        assert!(product::get_product_by_sku(&db, "B-1").await?.is_none());

        let summary = seed_catalog(&db, &media.storage, VariantFailurePolicy::Record, &config).await?;
        assert_eq!(summary.products, 1);
        let good = product::get_product_by_sku(&db, "G-1").await?.unwrap();
        let broken = product::get_product_by_sku(&db, "B-1").await?.unwrap();
        assert_eq!(good.variant_status, VariantStatus::Generated);
        assert_eq!(broken.variant_status, VariantStatus::Failed);
        Ok(())
    }

    #[tokio::test]
    async fn test_variant_failure_setting_reaches_seeded_products() -> Result<()> {
        let (db, media) = setup_catalog().await?;
        std::fs::write(media.storage.path("images/broken.jpg"), b"garbage")?;
        let settings = Settings::from_lookup(|key| {
            (key == "VARIANT_FAILURE").then(|| "record".to_string())
        })?;
        let config = parse_catalog(
            r#"
            [[products]]
            title = "Broken"
            sku = "B-1"
            price = "2.00"
            image = "images/broken.jpg"
            "#,
        )?;

        seed_catalog(&db, &media.storage, settings.variant_failure, &config).await?;

        let broken = product::get_product_by_sku(&db, "B-1").await?.unwrap();
        assert_eq!(broken.variant_status, VariantStatus::Failed);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_property_code() -> Result<()> {
        let (db, media) = setup_catalog().await?;
        let config = parse_catalog(
            r#"
            [[categories]]
            title = "Hats"
            properties = ["brim"]
            "#,
        )?;

        assert!(matches!(
            seed_catalog(&db, &media.storage, VariantFailurePolicy::Abort, &config).await,
            Err(Error::Config { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_decimal_value() -> Result<()> {
        let (db, media) = setup_catalog().await?;
        let config = parse_catalog(
            r#"
            [[property_objects]]
            title = "Size"
            value_type = "decimal"
            values = ["huge"]
            "#,
        )?;

        assert!(matches!(
            seed_catalog(&db, &media.storage, VariantFailurePolicy::Abort, &config).await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }
}
