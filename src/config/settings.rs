//! Application settings loaded from environment variables.
//!
//! Values come from the process environment (a `.env` file is loaded by the
//! binary before this runs). Every variable has a default; malformed values are
//! configuration errors.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use crate::media::{FormatMatch, MediaStorage, VariantFailurePolicy};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime settings
#[derive(Clone, Debug)]
pub struct Settings {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `MEDIA_ROOT`: directory holding `images/`
    pub media_root: PathBuf,
    /// `MEDIA_URL`: URL prefix media files are served under
    pub media_url: String,
    /// `BIND_ADDR`: address of the read API
    pub bind_addr: SocketAddr,
    /// `CATALOG_SEED`: optional TOML file to seed property objects and categories from
    pub catalog_seed: Option<PathBuf>,
    /// `VARIANT_FAILURE`: `abort` or `record`, applied to products written by seeding
    pub variant_failure: VariantFailurePolicy,
    /// `FORMAT_MATCH`: `stem` or `prefix`
    pub format_match: FormatMatch,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            media_root: PathBuf::from("media"),
            media_url: "/media/".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            catalog_seed: None,
            variant_failure: VariantFailurePolicy::default(),
            format_match: FormatMatch::default(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(addr) => addr.trim().parse().map_err(|e| Error::Config {
                message: format!("Invalid BIND_ADDR '{addr}': {e}"),
            })?,
            None => defaults.bind_addr,
        };

        let settings = Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            media_root: get("MEDIA_ROOT").map_or(defaults.media_root, PathBuf::from),
            media_url: get("MEDIA_URL").unwrap_or(defaults.media_url),
            bind_addr,
            catalog_seed: get("CATALOG_SEED").map(PathBuf::from),
            variant_failure: get("VARIANT_FAILURE")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(defaults.variant_failure),
            format_match: get("FORMAT_MATCH")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(defaults.format_match),
        };

        tracing::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Media storage described by these settings
    #[must_use]
    pub fn storage(&self) -> MediaStorage {
        MediaStorage::new(&self.media_root, &self.media_url)
    }
}
