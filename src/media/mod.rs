//! Product image storage, web variant generation and format discovery.
//!
//! All images live side by side in one flat `images/` directory under the
//! media root. An original and its generated variant differ only in extension.

pub mod formats;
pub mod storage;
pub mod variants;

pub use formats::{FormatMatch, list_variant_formats};
pub use storage::{IMAGES_DIR, MediaStorage};
pub use variants::{VariantFailurePolicy, VariantOutcome, generate_variant};
