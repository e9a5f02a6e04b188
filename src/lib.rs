//! `ShopCatalog` - a small product catalog with a read-only JSON API
//!
//! This crate stores products, categories and typed product properties in a
//! SQL database, keeps a `.webp` variant next to every png/jpg product image,
//! and exposes products with their available image formats over HTTP.

#![deny(
    unsafe_code,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    // Library code propagates errors instead of panicking
    clippy::expect_used,
    clippy::panic,
    clippy::unwrap_used,
    clippy::dbg_macro,
    clippy::todo,
    // Decimal money, no float comparisons
    clippy::float_cmp,
    clippy::needless_pass_by_value,
    clippy::redundant_closure_for_method_calls,
    clippy::wildcard_imports,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

/// Read API - routes, serializers and error responses
pub mod api;
/// Configuration management for database, settings and catalog seeds
pub mod config;
/// Core business logic - products, properties, categories and seeding
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Image storage, variant generation and format discovery
pub mod media;
/// HTTP server startup
pub mod server;

#[cfg(test)]
pub mod test_utils;
