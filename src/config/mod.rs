/// Catalog seed file loading (property objects and categories)
pub mod catalog;

/// Database configuration and connection management
pub mod database;

/// Environment-driven runtime settings
pub mod settings;

pub use settings::Settings;
