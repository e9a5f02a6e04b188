//! Database configuration module for the catalog.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs,
//! including the unique sku index and the foreign keys declared on the relations.

use crate::entities::{
    Category, CategoryProperty, Product, ProductProperty, PropertyObject, PropertyValue,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

/// Default database location when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://catalog.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    tracing::debug!("Connecting to database at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all catalog tables that do not exist yet.
///
/// Parent tables are created before the tables that reference them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Product).await?;
    create_table(db, &schema, PropertyObject).await?;
    create_table(db, &schema, PropertyValue).await?;
    create_table(db, &schema, Category).await?;
    create_table(db, &schema, CategoryProperty).await?;
    create_table(db, &schema, ProductProperty).await?;

    Ok(())
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CategoryModel, ProductModel, PropertyObjectModel, PropertyValueModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist if they can be queried
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<PropertyObjectModel> = PropertyObject::find().limit(1).all(&db).await?;
        let _: Vec<PropertyValueModel> = PropertyValue::find().limit(1).all(&db).await?;
        let _ = CategoryProperty::find().limit(1).all(&db).await?;
        let _ = ProductProperty::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
