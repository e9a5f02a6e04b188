//! Discovery of the formats stored for a product image.
//!
//! Variants are not referenced from the database; they are found by listing the
//! images directory and matching file names against the image's stem.

use super::MediaStorage;
use crate::errors::{Error, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

/// How directory entries are matched against an image stem
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatMatch {
    /// Entry stem must equal the image stem
    #[default]
    Stem,
    /// Entry name must start with the image stem. `widget-2.jpg` then counts
    /// as a format of `widget`; kept for compatibility with existing clients.
    Prefix,
}

impl FromStr for FormatMatch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "stem" => Ok(Self::Stem),
            "prefix" => Ok(Self::Prefix),
            other => Err(Error::Config {
                message: format!("unknown format match mode '{other}' (expected stem or prefix)"),
            }),
        }
    }
}

impl FormatMatch {
    fn matches(self, entry: &str, stem: &str) -> bool {
        match self {
            Self::Stem => Path::new(entry)
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s == stem),
            Self::Prefix => entry.starts_with(stem),
        }
    }
}

/// Lists the extensions present in the images directory for `image`.
///
/// `image` is the storage-relative path stored on the product. A missing or
/// unreadable images directory is an error, not an empty set. Entries without
/// an extension are ignored.
pub async fn list_variant_formats(
    storage: &MediaStorage,
    image: &str,
    mode: FormatMatch,
) -> Result<BTreeSet<String>> {
    let stem = Path::new(image)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::Validation {
            field: "image",
            message: format!("no file name in '{image}'"),
        })?;

    let dir = storage.images_dir();
    let unavailable = |source| Error::StorageUnavailable {
        path: dir.clone(),
        source,
    };

    let mut entries = tokio::fs::read_dir(&dir).await.map_err(unavailable)?;
    let mut formats = BTreeSet::new();
    while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !mode.matches(name, stem) {
            continue;
        }
        if let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) {
            formats.insert(ext.to_string());
        }
    }

    tracing::debug!("Formats for {}: {:?}", image, formats);
    Ok(formats)
}
