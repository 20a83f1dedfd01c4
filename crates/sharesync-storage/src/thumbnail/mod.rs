//! Thumbnail size registry and derivation.

pub mod generator;
pub mod size;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use sharesync_core::result::AppResult;

pub use generator::ThumbnailGenerator;
pub use size::{Resample, ThumbSize, UnknownThumbSize};

/// Produces a resized variant of a local file.
#[async_trait]
pub trait ThumbnailDeriver: Send + Sync {
    /// Return the path of the `size` variant of `source`, generating it if
    /// it is not cached yet. `hash` is the content hash of `source`.
    async fn derive(&self, source: &Path, hash: &str, size: ThumbSize) -> AppResult<PathBuf>;
}
