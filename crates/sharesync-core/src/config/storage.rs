//! Local storage locations.

use serde::{Deserialize, Serialize};

/// Where originals are read from and derived thumbnails are cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base path that file names of share records are relative to.
    #[serde(default = "default_originals_path")]
    pub originals_path: String,
    /// Root of the content-hash-addressed thumbnail cache.
    #[serde(default = "default_thumbnails_path")]
    pub thumbnails_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            originals_path: default_originals_path(),
            thumbnails_path: default_thumbnails_path(),
        }
    }
}

fn default_originals_path() -> String {
    "./data/originals".to_string()
}

fn default_thumbnails_path() -> String {
    "./data/cache/thumbnails".to_string()
}
