//! Property business logic - property objects, their values, and which products
//! carry which values.
//!
//! A property value is always built from a [`PropertyValueData`] whose variant
//! must match the parent's [`ValueType`]; a mismatch is rejected before
//! anything is written. Property objects are protected: deleting one that
//! still has values fails with [`Error::ProtectedPropertyObject`].

use crate::{
    core::fields::{VALUE_PRECISION, clean_slug, clean_text, fits_precision, slugify},
    entities::{
        CategoryProperty, Product, ProductProperty, PropertyObject, PropertyValue,
        PropertyValueData, ValueType, category_property, product, product_property,
        property_object, property_value,
    },
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, Unchanged, prelude::*};

/// Partial update of a property object; `None` leaves a field unchanged
#[derive(Clone, Debug, Default)]
pub struct PropertyObjectChanges {
    /// New display name
    pub title: Option<String>,
    /// New code
    pub code: Option<String>,
    /// New value type, only allowed while no values exist
    pub value_type: Option<ValueType>,
}

/// Partial update of a property value; `None` leaves a field unchanged
#[derive(Clone, Debug, Default)]
pub struct PropertyValueChanges {
    /// New value, must match the parent's value type
    pub value: Option<PropertyValueData>,
    /// New code
    pub code: Option<String>,
}

/// Builds a typed value from text according to the property object's value type.
pub fn parse_value(object: &property_object::Model, raw: &str) -> Result<PropertyValueData> {
    match object.value_type {
        ValueType::String => Ok(PropertyValueData::Text(raw.trim().to_string())),
        ValueType::Decimal => raw
            .trim()
            .parse::<Decimal>()
            .map(PropertyValueData::Decimal)
            .map_err(|e| Error::Validation {
                field: "value_decimal",
                message: format!("'{raw}' is not a decimal number: {e}"),
            }),
    }
}

/// Code of a value when none is given.
///
/// Decimal points become hyphens so `44.5` and `4.45` stay distinct.
#[must_use]
pub fn default_value_code(value: &PropertyValueData) -> String {
    match value {
        PropertyValueData::Text(text) => slugify(text),
        PropertyValueData::Decimal(number) => {
            let text = number.to_string().replace('.', "-");
            match text.strip_prefix('-') {
                Some(positive) => format!("minus-{positive}"),
                None => text,
            }
        }
    }
}

/// Retrieves all property objects, ordered by title.
pub async fn list_property_objects(
    db: &DatabaseConnection,
) -> Result<Vec<property_object::Model>> {
    PropertyObject::find()
        .order_by_asc(property_object::Column::Title)
        .order_by_asc(property_object::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a property object by id.
pub async fn get_property_object_by_id(
    db: &DatabaseConnection,
    object_id: i64,
) -> Result<Option<property_object::Model>> {
    PropertyObject::find_by_id(object_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a property object by its code.
pub async fn get_property_object_by_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<property_object::Model>> {
    PropertyObject::find()
        .filter(property_object::Column::Code.eq(code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a property object. The code is derived from the title when not given.
pub async fn create_property_object(
    db: &DatabaseConnection,
    title: &str,
    code: Option<&str>,
    value_type: ValueType,
) -> Result<property_object::Model> {
    let title = clean_text("title", title)?;
    let code = clean_slug("code", code, &title)?;

    let object = property_object::ActiveModel {
        title: Set(title),
        code: Set(code),
        value_type: Set(value_type),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!("Created property object {}", object);
    Ok(object)
}

/// Updates a property object.
///
/// # Errors
/// Changing the value type while values depend on the object returns
/// [`Error::ProtectedPropertyObject`].
pub async fn update_property_object(
    db: &DatabaseConnection,
    object_id: i64,
    changes: PropertyObjectChanges,
) -> Result<property_object::Model> {
    let existing = get_property_object_by_id(db, object_id)
        .await?
        .ok_or(Error::PropertyObjectNotFound { id: object_id })?;

    let title = match changes.title {
        Some(title) => clean_text("title", &title)?,
        None => existing.title,
    };
    let code = match changes.code {
        Some(code) => clean_slug("code", Some(&code), &title)?,
        None => existing.code,
    };
    let value_type = changes.value_type.unwrap_or(existing.value_type);
    if value_type != existing.value_type {
        let dependents = count_values(db, object_id).await?;
        if dependents > 0 {
            return Err(Error::ProtectedPropertyObject {
                id: object_id,
                dependents,
            });
        }
    }

    property_object::ActiveModel {
        id: Unchanged(object_id),
        title: Set(title),
        code: Set(code),
        value_type: Set(value_type),
    }
    .update(db)
    .await
    .map_err(Into::into)
}

/// Deletes a property object that has no values.
///
/// Category links to the object are removed with it.
pub async fn delete_property_object(
    db: &DatabaseConnection,
    object_id: i64,
) -> Result<property_object::Model> {
    let object = get_property_object_by_id(db, object_id)
        .await?
        .ok_or(Error::PropertyObjectNotFound { id: object_id })?;

    let dependents = count_values(db, object_id).await?;
    if dependents > 0 {
        return Err(Error::ProtectedPropertyObject {
            id: object_id,
            dependents,
        });
    }

    let txn = db.begin().await?;
    CategoryProperty::delete_many()
        .filter(category_property::Column::PropertyObjectId.eq(object_id))
        .exec(&txn)
        .await?;
    PropertyObject::delete_by_id(object_id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!("Deleted property object {}", object);
    Ok(object)
}

/// Retrieves the values of one property object, or of all objects when `object_id` is `None`.
///
/// Ordered by `value_string`, then `value_decimal`.
pub async fn list_property_values(
    db: &DatabaseConnection,
    object_id: Option<i64>,
) -> Result<Vec<property_value::Model>> {
    let mut query = PropertyValue::find();
    if let Some(object_id) = object_id {
        query = query.filter(property_value::Column::PropertyObjectId.eq(object_id));
    }
    query
        .order_by_asc(property_value::Column::ValueString)
        .order_by_asc(property_value::Column::ValueDecimal)
        .order_by_asc(property_value::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a property value by id.
pub async fn get_property_value_by_id(
    db: &DatabaseConnection,
    value_id: i64,
) -> Result<Option<property_value::Model>> {
    PropertyValue::find_by_id(value_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a value for a property object.
///
/// The code is derived from the value when not given.
///
/// # Errors
/// Returns an error if:
/// - The property object does not exist
/// - `value` does not match the object's value type
/// - A text value is empty or too long, or a decimal does not fit 11 digits with 2 places
pub async fn create_property_value(
    db: &DatabaseConnection,
    object_id: i64,
    value: PropertyValueData,
    code: Option<&str>,
) -> Result<property_value::Model> {
    let object = get_property_object_by_id(db, object_id)
        .await?
        .ok_or(Error::PropertyObjectNotFound { id: object_id })?;

    let value = clean_value(&object, value)?;
    let derived = default_value_code(&value);
    let code = clean_slug("code", Some(code.unwrap_or(derived.as_str())), "")?;
    let (value_string, value_decimal) = value.into_columns();

    let created = property_value::ActiveModel {
        property_object_id: Set(object.id),
        value_string: Set(value_string),
        value_decimal: Set(value_decimal),
        code: Set(code),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!("Created value '{}' for {}", created, object);
    Ok(created)
}

/// Updates a property value.
pub async fn update_property_value(
    db: &DatabaseConnection,
    value_id: i64,
    changes: PropertyValueChanges,
) -> Result<property_value::Model> {
    let existing = get_property_value_by_id(db, value_id)
        .await?
        .ok_or(Error::PropertyValueNotFound { id: value_id })?;

    let value = match changes.value {
        Some(value) => {
            let object = get_property_object_by_id(db, existing.property_object_id)
                .await?
                .ok_or(Error::PropertyObjectNotFound {
                    id: existing.property_object_id,
                })?;
            clean_value(&object, value)?
        }
        None => existing.value().ok_or_else(|| Error::Validation {
            field: "value",
            message: format!("property value {value_id} has no value"),
        })?,
    };
    let code = match changes.code {
        Some(code) => clean_slug("code", Some(&code), &value.to_string())?,
        None => existing.code,
    };
    let (value_string, value_decimal) = value.into_columns();

    property_value::ActiveModel {
        id: Unchanged(value_id),
        property_object_id: Unchanged(existing.property_object_id),
        value_string: Set(value_string),
        value_decimal: Set(value_decimal),
        code: Set(code),
    }
    .update(db)
    .await
    .map_err(Into::into)
}

/// Deletes a property value and its product associations.
pub async fn delete_property_value(
    db: &DatabaseConnection,
    value_id: i64,
) -> Result<property_value::Model> {
    let value = get_property_value_by_id(db, value_id)
        .await?
        .ok_or(Error::PropertyValueNotFound { id: value_id })?;

    let txn = db.begin().await?;
    ProductProperty::delete_many()
        .filter(product_property::Column::PropertyValueId.eq(value_id))
        .exec(&txn)
        .await?;
    PropertyValue::delete_by_id(value_id).exec(&txn).await?;
    txn.commit().await?;

    Ok(value)
}

/// Gives a product a property value. Assigning twice is a no-op.
pub async fn assign_to_product(db: &DatabaseConnection, value_id: i64, product_id: i64) -> Result<()> {
    if get_property_value_by_id(db, value_id).await?.is_none() {
        return Err(Error::PropertyValueNotFound { id: value_id });
    }
    if Product::find_by_id(product_id).one(db).await?.is_none() {
        return Err(Error::ProductNotFound { id: product_id });
    }
    if ProductProperty::find_by_id((value_id, product_id))
        .one(db)
        .await?
        .is_some()
    {
        return Ok(());
    }

    product_property::ActiveModel {
        property_value_id: Set(value_id),
        product_id: Set(product_id),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Removes a property value from a product. Returns whether a link existed.
pub async fn unassign_from_product(
    db: &DatabaseConnection,
    value_id: i64,
    product_id: i64,
) -> Result<bool> {
    let result = ProductProperty::delete_by_id((value_id, product_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Property values carried by a product, each with its property object.
pub async fn get_product_properties(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<(property_value::Model, Option<property_object::Model>)>> {
    PropertyValue::find()
        .inner_join(ProductProperty)
        .filter(product_property::Column::ProductId.eq(product_id))
        .find_also_related(PropertyObject)
        .order_by_asc(property_value::Column::ValueString)
        .order_by_asc(property_value::Column::ValueDecimal)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Products carrying a property value, ordered by title.
pub async fn get_value_products(
    db: &DatabaseConnection,
    value_id: i64,
) -> Result<Vec<product::Model>> {
    let value = get_property_value_by_id(db, value_id)
        .await?
        .ok_or(Error::PropertyValueNotFound { id: value_id })?;

    value
        .find_related(Product)
        .order_by_asc(product::Column::Title)
        .all(db)
        .await
        .map_err(Into::into)
}

fn clean_value(
    object: &property_object::Model,
    value: PropertyValueData,
) -> Result<PropertyValueData> {
    if value.value_type() != object.value_type {
        return Err(Error::ValueTypeMismatch {
            expected: object.value_type.to_string(),
            actual: value.value_type().to_string(),
        });
    }

    match value {
        PropertyValueData::Text(text) => Ok(PropertyValueData::Text(clean_text(
            "value_string",
            &text,
        )?)),
        PropertyValueData::Decimal(number) if fits_precision(number, VALUE_PRECISION) => {
            Ok(PropertyValueData::Decimal(number))
        }
        PropertyValueData::Decimal(number) => Err(Error::Validation {
            field: "value_decimal",
            message: format!("{number} does not fit 11 digits with 2 decimal places"),
        }),
    }
}

async fn count_values(db: &DatabaseConnection, object_id: i64) -> Result<u64> {
    PropertyValue::find()
        .filter(property_value::Column::PropertyObjectId.eq(object_id))
        .count(db)
        .await
        .map_err(Into::into)
}
