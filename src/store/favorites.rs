//! Persistent favorite currencies.
//!
//! Favorites are a small ordered list of currency codes kept in a JSON
//! file under the data directory. Reads never fail; a missing or corrupt
//! file degrades to the default set so the converter always has a list to
//! cycle through.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::config::AppConfig;

/// Starter set for first launch.
pub const DEFAULT_FAVORITES: [&str; 4] = ["USD", "IDR", "EUR", "GBP"];

const FAVORITES_FILE: &str = "favorites.json";

pub fn default_set() -> Vec<String> {
    DEFAULT_FAVORITES.iter().map(|code| code.to_string()).collect()
}

pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FavoritesStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the configured data directory.
    pub fn open_default(config: &AppConfig) -> Result<Self> {
        let data_path = config.default_data_path()?;
        Ok(Self::new(data_path.join(FAVORITES_FILE)))
    }

    /// Loads the favorite codes, oldest first. Missing or unreadable
    /// state yields the default set.
    pub fn load(&self) -> Vec<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("No favorites at {}: {}", self.path.display(), e);
                return default_set();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(favorites) => favorites,
            Err(e) => {
                debug!("Discarding corrupt favorites file: {}", e);
                default_set()
            }
        }
    }

    pub fn save(&self, favorites: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }
        let contents = serde_json::to_string(favorites)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write favorites: {}", self.path.display()))?;
        debug!(count = favorites.len(), "Saved favorites");
        Ok(())
    }

    /// Adds `code` to the favorites, or removes it when already present.
    /// Returns the new list and whether the code was added.
    pub fn toggle(&self, code: &str) -> Result<(Vec<String>, bool)> {
        let mut favorites = self.load();
        let added = match favorites.iter().position(|c| c == code) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(code.to_string());
                true
            }
        };
        self.save(&favorites)?;
        Ok((favorites, added))
    }
}
