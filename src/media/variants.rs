//! Web variant generation for product images.
//!
//! After a product with an image is written, a `.webp` copy of a `png` / `jpg`
//! original is placed beside it, sharing the stem. The copy is always
//! three-channel RGB. Re-running overwrites the same target.

use super::MediaStorage;
use crate::errors::{Error, Result};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Extensions that get a web variant (case-sensitive)
pub const SOURCE_EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// Extension of the generated variant
pub const VARIANT_EXTENSION: &str = "webp";

/// Result of a generation attempt that did not fail
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VariantOutcome {
    /// The variant was written to this path
    Generated(PathBuf),
    /// The source extension is not convertible; nothing was written
    Skipped,
}

/// What a product write does when variant generation fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VariantFailurePolicy {
    /// Roll the write back and return the error
    #[default]
    Abort,
    /// Keep the write and mark the product's variant status as failed
    Record,
}

impl FromStr for VariantFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "abort" => Ok(Self::Abort),
            "record" => Ok(Self::Record),
            other => Err(Error::Config {
                message: format!("unknown variant failure policy '{other}' (expected abort or record)"),
            }),
        }
    }
}

/// True when `source` has one of [`SOURCE_EXTENSIONS`]
#[must_use]
pub fn is_convertible(source: &Path) -> bool {
    source
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Where the variant of `source` is written
#[must_use]
pub fn variant_path(source: &Path) -> PathBuf {
    source.with_extension(VARIANT_EXTENSION)
}

/// Converts `source` to an RGB webp sibling, blocking the current thread.
///
/// The image format is sniffed from the file contents, not the extension.
pub fn generate_variant_blocking(source: &Path) -> Result<VariantOutcome> {
    if !is_convertible(source) {
        tracing::debug!("No web variant for {}", source.display());
        return Ok(VariantOutcome::Skipped);
    }

    let decoded = ImageReader::open(source)?.with_guessed_format()?.decode()?;
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let target = variant_path(source);
    if let Err(e) = rgb.save_with_format(&target, ImageFormat::WebP) {
        // no half-written variant
        std::fs::remove_file(&target).ok();
        return Err(e.into());
    }

    tracing::info!("Generated web variant {}", target.display());
    Ok(VariantOutcome::Generated(target))
}

/// Generates the web variant of the stored image `image` on the blocking pool.
pub async fn generate_variant(storage: &MediaStorage, image: &str) -> Result<VariantOutcome> {
    let source = storage.path(image);
    tokio::task::spawn_blocking(move || generate_variant_blocking(&source))
        .await
        .map_err(|e| Error::Task(format!("Image processing task join error: {e}")))?
}
