//! JSON shape of products on the read API.

use crate::{
    entities::{ProductStatus, product},
    errors::Result,
    media::{FormatMatch, MediaStorage, list_variant_formats},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as returned by the API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product id
    pub id: i64,
    /// Display name
    pub title: String,
    /// Stock keeping unit
    pub sku: String,
    /// Price with exactly two decimal places, as a string
    pub price: String,
    /// Availability label
    pub status: ProductStatus,
    /// Image location and available formats, `null` without image
    pub image: Option<ImageRecord>,
}

/// Where a product image lives and which formats exist for it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Image URL without its extension
    pub path: String,
    /// Extensions found next to the image, sorted
    pub formats: Vec<String>,
}

/// Builds the API record of a product, scanning storage for its image formats.
pub async fn serialize_product(
    storage: &MediaStorage,
    mode: FormatMatch,
    product: product::Model,
) -> Result<ProductRecord> {
    let image = match product.image.as_deref() {
        Some(image) => Some(ImageRecord {
            path: strip_extension(&storage.url(image)),
            formats: list_variant_formats(storage, image, mode)
                .await?
                .into_iter()
                .collect(),
        }),
        None => None,
    };

    Ok(ProductRecord {
        id: product.id,
        title: product.title,
        sku: product.sku,
        price: format_price(product.price),
        status: product.status,
        image,
    })
}

/// Renders a price with two decimal places.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    let mut price = price.round_dp(2);
    price.rescale(2);
    price.to_string()
}

/// Removes the extension of the last path segment of `url`.
#[must_use]
pub fn strip_extension(url: &str) -> String {
    let segment_start = url.rfind('/').map_or(0, |i| i + 1);
    match url[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => url[..segment_start + dot].to_string(),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::VariantStatus;
    use crate::test_utils::TestMedia;

    fn model(image: Option<&str>) -> product::Model {
        product::Model {
            id: 7,
            title: "Widget".to_string(),
            sku: "W-7".to_string(),
            price: Decimal::new(155, 1),
            status: ProductStatus::InStock,
            image: image.map(ToString::to_string),
            variant_status: VariantStatus::NoImage,
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(155, 1)), "15.50");
        assert_eq!(format_price(Decimal::ZERO), "0.00");
        assert_eq!(format_price(Decimal::new(19999, 3)), "20.00");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("/media/images/widget.png"), "/media/images/widget");
        assert_eq!(strip_extension("/media/images/my.photo.jpg"), "/media/images/my.photo");
        assert_eq!(strip_extension("https://cdn.example.com/images/a"), "https://cdn.example.com/images/a");
        assert_eq!(strip_extension("/media/images/.hidden"), "/media/images/.hidden");
    }

    #[tokio::test]
    async fn test_serialize_with_image() -> Result<()> {
        let media = TestMedia::new()?;
        media.store_png("widget.png");
        std::fs::write(media.storage.path("images/widget.webp"), b"x")?;

        let record =
            serialize_product(&media.storage, FormatMatch::Stem, model(Some("images/widget.png")))
                .await?;

        assert_eq!(record.price, "15.50");
        assert_eq!(
            record.image,
            Some(ImageRecord {
                path: "/media/images/widget".to_string(),
                formats: vec!["png".to_string(), "webp".to_string()],
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_serialize_without_image() -> Result<()> {
        let media = TestMedia::new()?;

        let record = serialize_product(&media.storage, FormatMatch::Stem, model(None)).await?;

        assert_eq!(record.image, None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "in stock");
        assert!(json["image"].is_null());
        Ok(())
    }
}
