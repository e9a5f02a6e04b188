//! Category business logic - categories and the property objects relevant to them.

use crate::{
    core::fields::{clean_slug, clean_text},
    entities::{Category, CategoryProperty, PropertyObject, category, category_property, property_object},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, Unchanged, prelude::*};

/// Partial update of a category; `None` leaves a field unchanged
#[derive(Clone, Debug, Default)]
pub struct CategoryChanges {
    /// New display name
    pub title: Option<String>,
    /// New slug
    pub slug: Option<String>,
}

/// Retrieves all categories, ordered by title.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Title)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a category by id.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its slug.
pub async fn get_category_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a category. The slug is derived from the title when not given.
pub async fn create_category(
    db: &DatabaseConnection,
    title: &str,
    slug: Option<&str>,
) -> Result<category::Model> {
    let title = clean_text("title", title)?;
    let slug = clean_slug("slug", slug, &title)?;

    let category = category::ActiveModel {
        title: Set(title),
        slug: Set(slug),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!("Created category {} ({})", category.title, category.slug);
    Ok(category)
}

/// Updates a category's title and slug.
pub async fn update_category(
    db: &DatabaseConnection,
    category_id: i64,
    changes: CategoryChanges,
) -> Result<category::Model> {
    let existing = get_category_by_id(db, category_id)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    let title = match changes.title {
        Some(title) => clean_text("title", &title)?,
        None => existing.title,
    };
    let slug = match changes.slug {
        Some(slug) => clean_slug("slug", Some(&slug), &title)?,
        None => existing.slug,
    };

    category::ActiveModel {
        id: Unchanged(category_id),
        title: Set(title),
        slug: Set(slug),
    }
    .update(db)
    .await
    .map_err(Into::into)
}

/// Deletes a category and its property object links.
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<category::Model> {
    let category = get_category_by_id(db, category_id)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    let txn = db.begin().await?;
    CategoryProperty::delete_many()
        .filter(category_property::Column::CategoryId.eq(category_id))
        .exec(&txn)
        .await?;
    Category::delete_by_id(category_id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!("Deleted category {} ({})", category.title, category.slug);
    Ok(category)
}

/// Links a property object to a category. Linking twice is a no-op.
pub async fn add_property_object(
    db: &DatabaseConnection,
    category_id: i64,
    object_id: i64,
) -> Result<()> {
    if get_category_by_id(db, category_id).await?.is_none() {
        return Err(Error::CategoryNotFound { id: category_id });
    }
    if PropertyObject::find_by_id(object_id).one(db).await?.is_none() {
        return Err(Error::PropertyObjectNotFound { id: object_id });
    }
    if CategoryProperty::find_by_id((category_id, object_id))
        .one(db)
        .await?
        .is_some()
    {
        return Ok(());
    }

    category_property::ActiveModel {
        category_id: Set(category_id),
        property_object_id: Set(object_id),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Unlinks a property object from a category. Returns whether a link existed.
pub async fn remove_property_object(
    db: &DatabaseConnection,
    category_id: i64,
    object_id: i64,
) -> Result<bool> {
    let result = CategoryProperty::delete_by_id((category_id, object_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Property objects linked to a category, ordered by title.
pub async fn get_category_property_objects(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Vec<property_object::Model>> {
    let category = get_category_by_id(db, category_id)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    category
        .find_related(PropertyObject)
        .order_by_asc(property_object::Column::Title)
        .all(db)
        .await
        .map_err(Into::into)
}
