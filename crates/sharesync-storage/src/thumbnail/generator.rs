//! Content-hash-addressed thumbnail generator.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use sharesync_core::error::{AppError, ErrorKind};
use sharesync_core::result::AppResult;

use super::size::{Resample, ThumbSize};
use super::ThumbnailDeriver;

/// Generates thumbnails into a cache directory keyed by file hash.
#[derive(Debug, Clone)]
pub struct ThumbnailGenerator {
    /// Root of the thumbnail cache.
    cache_dir: PathBuf,
}

impl ThumbnailGenerator {
    /// Create a new generator writing below `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Cache location of the `size` variant for `hash`.
    ///
    /// Layout: `{cache}/{h0}/{h1}/{h2}/{hash}_{w}x{h}_{resample}.jpg`.
    pub fn thumb_path(&self, hash: &str, size: ThumbSize) -> AppResult<PathBuf> {
        if hash.len() < 3 || !hash.is_ascii() {
            return Err(AppError::validation(format!(
                "File hash '{hash}' is empty or too short"
            )));
        }
        let (width, height) = size.dimensions();
        let name = format!(
            "{hash}_{width}x{height}_{}.jpg",
            size.resample().suffix()
        );

        Ok(self
            .cache_dir
            .join(&hash[0..1])
            .join(&hash[1..2])
            .join(&hash[2..3])
            .join(name))
    }

    fn render(source: &Path, target: &Path, size: ThumbSize) -> AppResult<()> {
        let img = image::open(source).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to decode {}", source.display()),
                e,
            )
        })?;

        let (width, height) = size.dimensions();
        let resized = resize(img, width, height, size.resample());

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        resized
            .to_rgb8()
            .save_with_format(target, ImageFormat::Jpeg)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write thumbnail {}", target.display()),
                    e,
                )
            })
    }
}

#[async_trait]
impl ThumbnailDeriver for ThumbnailGenerator {
    async fn derive(&self, source: &Path, hash: &str, size: ThumbSize) -> AppResult<PathBuf> {
        let target = self.thumb_path(hash, size)?;

        if tokio::fs::try_exists(&target).await.unwrap_or(false) {
            tracing::debug!(thumb = %target.display(), "Thumbnail cache hit");
            return Ok(target);
        }

        let source_path = source.to_path_buf();
        let target_path = target.clone();
        tokio::task::spawn_blocking(move || Self::render(&source_path, &target_path, size))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Thumbnail task panicked", e))??;

        tracing::debug!(
            source = %source.display(),
            size = %size,
            output = %target.display(),
            "Generated thumbnail"
        );

        Ok(target)
    }
}

fn resize(img: DynamicImage, width: u32, height: u32, resample: Resample) -> DynamicImage {
    match resample {
        Resample::Fit => {
            if img.width() <= width && img.height() <= height {
                img
            } else {
                img.resize(width, height, FilterType::Lanczos3)
            }
        }
        Resample::FillCenter => img.resize_to_fill(width, height, FilterType::Lanczos3),
        Resample::FillTopLeft | Resample::FillBottomRight => {
            let scale = f64::max(
                f64::from(width) / f64::from(img.width()),
                f64::from(height) / f64::from(img.height()),
            );
            let scaled_w = ((f64::from(img.width()) * scale).ceil() as u32).max(width);
            let scaled_h = ((f64::from(img.height()) * scale).ceil() as u32).max(height);
            let scaled = img.resize_exact(scaled_w, scaled_h, FilterType::Lanczos3);

            let (x, y) = if resample == Resample::FillTopLeft {
                (0, 0)
            } else {
                (scaled_w - width, scaled_h - height)
            };
            scaled.crop_imm(x, y, width, height)
        }
    }
}
