//! Flat file storage for uploaded product images.
//!
//! Paths handed out by [`MediaStorage`] are relative to the media root and use
//! forward slashes (`images/widget.png`); they are what the product row stores.

use crate::errors::{Error, Result};
use rand::{Rng, distributions::Alphanumeric};
use std::path::{Path, PathBuf};

/// Directory under the media root holding every product image and its variants
pub const IMAGES_DIR: &str = "images";

const SUFFIX_LEN: usize = 7;

/// Media root on disk plus the URL prefix it is served under
#[derive(Clone, Debug)]
pub struct MediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStorage {
    /// Creates a storage rooted at `root`, served under `url_prefix`
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let mut url_prefix = url_prefix.into();
        if !url_prefix.ends_with('/') {
            url_prefix.push('/');
        }
        Self {
            root: root.into(),
            url_prefix,
        }
    }

    /// Media root on disk
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL prefix, always ending in `/`
    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// The shared images directory
    #[must_use]
    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    /// Absolute location of a storage-relative name
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Public URL of a storage-relative name
    #[must_use]
    pub fn url(&self, name: &str) -> String {
        format!("{}{}", self.url_prefix, name.trim_start_matches('/'))
    }

    /// Removes a stored file. A missing file is not an error; other failures
    /// are logged.
    pub async fn remove(&self, name: &str) {
        let path = self.path(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!("Removed {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
        }
    }

    /// Writes an uploaded image into the images directory.
    ///
    /// The filename is reduced to its last path component and to the
    /// characters `[-\w.]`. If the name is taken, a random 7-character suffix
    /// is appended to the stem. Returns the storage-relative name.
    pub async fn save_upload(&self, filename: &str, data: &[u8]) -> Result<String> {
        let clean = clean_filename(filename).ok_or_else(|| Error::Validation {
            field: "image",
            message: format!("unusable file name '{filename}'"),
        })?;

        let dir = self.images_dir();
        tokio::fs::create_dir_all(&dir).await?;

        let mut name = clean.clone();
        while tokio::fs::try_exists(dir.join(&name)).await? {
            name = with_random_suffix(&clean);
        }

        tokio::fs::write(dir.join(&name), data).await?;
        let relative = format!("{IMAGES_DIR}/{name}");
        tracing::info!("Stored upload as {}", relative);
        Ok(relative)
    }
}

fn clean_filename(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        None
    } else {
        Some(cleaned)
    }
}

fn with_random_suffix(name: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();

    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{suffix}.{ext}"),
        _ => format!("{name}_{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_url_joins_prefix() {
        let storage = MediaStorage::new("/srv/media", "/media");
        assert_eq!(storage.url("images/widget.png"), "/media/images/widget.png");

        let storage = MediaStorage::new("/srv/media", "https://cdn.example.com/m/");
        assert_eq!(
            storage.url("images/widget.png"),
            "https://cdn.example.com/m/images/widget.png"
        );
    }

    #[test]
    fn test_clean_filename() {
        assert_eq!(clean_filename("widget.png").unwrap(), "widget.png");
        assert_eq!(clean_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(clean_filename("my photo (1).jpg").unwrap(), "my_photo_1.jpg");
        assert!(clean_filename("..").is_none());
        assert!(clean_filename("   ").is_none());
    }

    #[tokio::test]
    async fn test_save_upload_writes_into_images_dir() -> Result<()> {
        let temp = TempDir::new()?;
        let storage = MediaStorage::new(temp.path(), "/media/");

        let name = storage.save_upload("widget.png", b"data").await?;

        assert_eq!(name, "images/widget.png");
        assert_eq!(std::fs::read(storage.path(&name))?, b"data");
        Ok(())
    }

    #[tokio::test]
    async fn test_save_upload_avoids_overwriting() -> Result<()> {
        let temp = TempDir::new()?;
        let storage = MediaStorage::new(temp.path(), "/media/");

        let first = storage.save_upload("widget.png", b"one").await?;
        let second = storage.save_upload("widget.png", b"two").await?;

        assert_ne!(first, second);
        assert!(second.starts_with("images/widget_"));
        assert!(second.ends_with(".png"));
        assert_eq!(second.len(), "images/widget_.png".len() + SUFFIX_LEN);
        assert_eq!(std::fs::read(storage.path(&first))?, b"one");
        assert_eq!(std::fs::read(storage.path(&second))?, b"two");
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_deletes_only_the_named_file() -> Result<()> {
        let temp = TempDir::new()?;
        let storage = MediaStorage::new(temp.path(), "/media/");
        let name = storage.save_upload("widget.png", b"data").await?;
        std::fs::write(storage.path("images/widget.webp"), b"variant")?;

        storage.remove(&name).await;
        storage.remove("images/never-existed.png").await;

        assert!(!storage.path(&name).exists());
        assert!(storage.path("images/widget.webp").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_upload_rejects_empty_name() {
        let temp = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp.path(), "/media/");

        let result = storage.save_upload("///", b"data").await;
        assert!(matches!(result, Err(Error::Validation { field: "image", .. })));
    }
}
