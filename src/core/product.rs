//! Product business logic - Handles all product-related operations.
//!
//! Every successful product write with an image attached runs the web variant
//! generator before the write is committed. With
//! [`VariantFailurePolicy::Abort`] a generation failure rolls the write back and
//! is returned to the caller; with [`VariantFailurePolicy::Record`] the write is
//! kept and the product's `variant_status` is set to `failed`.
//!
//! Deleting a product removes its row and property associations but leaves the
//! image files on disk.

use crate::{
    core::fields::{clean_price, clean_text},
    entities::{Product, ProductProperty, ProductStatus, VariantStatus, product, product_property},
    errors::{Error, Result},
    media::{MediaStorage, VariantFailurePolicy, VariantOutcome, generate_variant},
};
use rust_decimal::Decimal;
use sea_orm::{
    ConnectionTrait, PaginatorTrait, QueryOrder, Set, TransactionTrait, Unchanged, prelude::*,
};

/// Fields of a product to be created
#[derive(Clone, Debug, Default)]
pub struct NewProduct {
    /// Display name
    pub title: String,
    /// Unique stock keeping unit
    pub sku: String,
    /// Unit price
    pub price: Decimal,
    /// Availability, `on order` by default
    pub status: ProductStatus,
    /// Storage-relative name of an already stored image
    pub image: Option<String>,
}

/// Partial update of a product; `None` leaves a field unchanged
#[derive(Clone, Debug, Default)]
pub struct ProductChanges {
    /// New display name
    pub title: Option<String>,
    /// New sku
    pub sku: Option<String>,
    /// New price
    pub price: Option<Decimal>,
    /// New availability
    pub status: Option<ProductStatus>,
    /// `Some(None)` detaches the image, `Some(Some(name))` replaces it
    pub image: Option<Option<String>>,
}

/// Retrieves all products, ordered by title.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Title)
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by its id.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by its sku.
pub async fn get_product_by_sku(
    db: &DatabaseConnection,
    sku: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Sku.eq(sku.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a product and generates the web variant of its image.
///
/// # Errors
/// Returns an error if:
/// - The title or sku is empty or longer than 255 characters
/// - The price is negative or has more than two decimal places
/// - Another product already has this sku
/// - Variant generation fails under [`VariantFailurePolicy::Abort`]
/// - The database insert fails
pub async fn create_product(
    db: &DatabaseConnection,
    storage: &MediaStorage,
    policy: VariantFailurePolicy,
    new: NewProduct,
) -> Result<product::Model> {
    let title = clean_text("title", &new.title)?;
    let sku = clean_text("sku", &new.sku)?;
    let price = clean_price(new.price)?;
    let image = clean_image(new.image);

    let txn = db.begin().await?;
    ensure_sku_available(&txn, &sku, None).await?;

    let product = product::ActiveModel {
        title: Set(title),
        sku: Set(sku),
        price: Set(price),
        status: Set(new.status),
        image: Set(image),
        variant_status: Set(VariantStatus::NoImage),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let product = apply_variants(&txn, storage, policy, product).await?;
    txn.commit().await?;

    tracing::info!("Created product {} ({})", product.id, product.sku);
    Ok(product)
}

/// Updates a product and regenerates the web variant of its image.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist
/// - A changed field fails the same validation as [`create_product`]
/// - Another product already has the new sku
/// - Variant generation fails under [`VariantFailurePolicy::Abort`]
pub async fn update_product(
    db: &DatabaseConnection,
    storage: &MediaStorage,
    policy: VariantFailurePolicy,
    product_id: i64,
    changes: ProductChanges,
) -> Result<product::Model> {
    let txn = db.begin().await?;
    let existing = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let title = match changes.title {
        Some(title) => clean_text("title", &title)?,
        None => existing.title,
    };
    let sku = match changes.sku {
        Some(sku) => {
            let sku = clean_text("sku", &sku)?;
            ensure_sku_available(&txn, &sku, Some(product_id)).await?;
            sku
        }
        None => existing.sku,
    };
    let price = match changes.price {
        Some(price) => clean_price(price)?,
        None => existing.price,
    };
    let image = match changes.image {
        Some(image) => clean_image(image),
        None => existing.image,
    };

    let product = product::ActiveModel {
        id: Unchanged(product_id),
        title: Set(title),
        sku: Set(sku),
        price: Set(price),
        status: Set(changes.status.unwrap_or(existing.status)),
        image: Set(image),
        variant_status: Set(existing.variant_status),
    }
    .update(&txn)
    .await?;

    let product = apply_variants(&txn, storage, policy, product).await?;
    txn.commit().await?;

    tracing::info!("Updated product {} ({})", product.id, product.sku);
    Ok(product)
}

/// Stores an uploaded image and attaches it to a product.
///
/// The upload is written to the images directory first; the product is then
/// saved through [`update_product`], which generates the web variant. If that
/// save fails, the stored upload is removed again.
pub async fn attach_image(
    db: &DatabaseConnection,
    storage: &MediaStorage,
    policy: VariantFailurePolicy,
    product_id: i64,
    filename: &str,
    data: &[u8],
) -> Result<product::Model> {
    if get_product_by_id(db, product_id).await?.is_none() {
        return Err(Error::ProductNotFound { id: product_id });
    }

    let name = storage.save_upload(filename, data).await?;
    let result = update_product(
        db,
        storage,
        policy,
        product_id,
        ProductChanges {
            image: Some(Some(name.clone())),
            ..Default::default()
        },
    )
    .await;

    if result.is_err() {
        storage.remove(&name).await;
    }
    result
}

/// Re-runs variant generation for a product and records the outcome.
///
/// Failures do not return an error; they are visible as
/// [`VariantStatus::Failed`] on the returned product.
pub async fn regenerate_variants(
    db: &DatabaseConnection,
    storage: &MediaStorage,
    product_id: i64,
) -> Result<product::Model> {
    let product = get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    apply_variants(db, storage, VariantFailurePolicy::Record, product).await
}

/// Deletes a product and its property associations.
///
/// Image files are not removed.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let txn = db.begin().await?;
    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    ProductProperty::delete_many()
        .filter(product_property::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    Product::delete_by_id(product_id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!("Deleted product {} ({})", product.id, product.sku);
    Ok(product)
}

fn clean_image(image: Option<String>) -> Option<String> {
    image
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

async fn ensure_sku_available<C: ConnectionTrait>(
    conn: &C,
    sku: &str,
    except_id: Option<i64>,
) -> Result<()> {
    let mut query = Product::find().filter(product::Column::Sku.eq(sku));
    if let Some(id) = except_id {
        query = query.filter(product::Column::Id.ne(id));
    }

    if query.count(conn).await? > 0 {
        return Err(Error::DuplicateSku {
            sku: sku.to_string(),
        });
    }
    Ok(())
}

async fn apply_variants<C: ConnectionTrait>(
    conn: &C,
    storage: &MediaStorage,
    policy: VariantFailurePolicy,
    product: product::Model,
) -> Result<product::Model> {
    let status = match product.image.as_deref() {
        None => VariantStatus::NoImage,
        Some(image) => match generate_variant(storage, image).await {
            Ok(VariantOutcome::Generated(_)) => VariantStatus::Generated,
            Ok(VariantOutcome::Skipped) => VariantStatus::Skipped,
            Err(e) if policy == VariantFailurePolicy::Record => {
                tracing::warn!(
                    "Variant generation failed for product {} ({}): {}",
                    product.id,
                    image,
                    e
                );
                VariantStatus::Failed
            }
            Err(e) => return Err(e),
        },
    };

    if status == product.variant_status {
        return Ok(product);
    }

    let mut active: product::ActiveModel = product.into();
    active.variant_status = Set(status);
    active.update(conn).await.map_err(Into::into)
}
