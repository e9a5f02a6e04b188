//! Unified error type for the catalog.
//!
//! Every catalog, media and configuration operation returns [`Result`]. The
//! HTTP layer turns these into responses in [`crate::api::ApiError`].

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Catalog error
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Failure reported by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Generic filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image could not be decoded or encoded
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// A field failed validation before reaching the database
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Price is negative or does not fit the stored precision
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: Decimal,
    },

    /// Another product already uses this sku
    #[error("A product with sku '{sku}' already exists")]
    DuplicateSku {
        /// The conflicting sku
        sku: String,
    },

    /// No product with this id
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Requested id
        id: i64,
    },

    /// No category with this id
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// Requested id
        id: i64,
    },

    /// No property object with this id
    #[error("Property object not found: {id}")]
    PropertyObjectNotFound {
        /// Requested id
        id: i64,
    },

    /// No property value with this id
    #[error("Property value not found: {id}")]
    PropertyValueNotFound {
        /// Requested id
        id: i64,
    },

    /// Property object still has dependent values
    #[error("Property object {id} is referenced by {dependents} value(s)")]
    ProtectedPropertyObject {
        /// Property object id
        id: i64,
        /// Number of values referencing it
        dependents: u64,
    },

    /// A value does not match its property object's value type
    #[error("Value type mismatch: expected {expected}, got {actual}")]
    ValueTypeMismatch {
        /// Type declared by the property object
        expected: String,
        /// Type that was supplied
        actual: String,
    },

    /// The image storage directory is missing or unreadable
    #[error("Image storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        /// Directory that could not be listed
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A blocking image task panicked or was cancelled
    #[error("Background task error: {0}")]
    Task(String),
}

impl Error {
    /// Returns true for the not-found family of errors
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound { .. }
                | Self::CategoryNotFound { .. }
                | Self::PropertyObjectNotFound { .. }
                | Self::PropertyValueNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
