//! Known thumbnail sizes.

use std::fmt;
use std::str::FromStr;

use sharesync_core::error::{AppError, ErrorKind};

/// How a source image is fitted into the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resample {
    /// Scale down to fit inside the box, keeping the aspect ratio.
    Fit,
    /// Fill the box and crop around the center.
    FillCenter,
    /// Fill the box and keep the top-left corner.
    FillTopLeft,
    /// Fill the box and keep the bottom-right corner.
    FillBottomRight,
}

impl Resample {
    /// File name suffix distinguishing variants of the same dimensions.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::FillCenter => "center",
            Self::FillTopLeft => "left",
            Self::FillBottomRight => "right",
        }
    }
}

/// A thumbnail size an account can select for sharing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbSize {
    Tile50,
    Tile100,
    Tile224,
    Tile500,
    Left224,
    Right224,
    Fit720,
    Fit1280,
    Fit1920,
    Fit2048,
    Fit2560,
    Fit3840,
}

impl ThumbSize {
    /// Every registered size.
    pub const ALL: [ThumbSize; 12] = [
        Self::Tile50,
        Self::Tile100,
        Self::Tile224,
        Self::Tile500,
        Self::Left224,
        Self::Right224,
        Self::Fit720,
        Self::Fit1280,
        Self::Fit1920,
        Self::Fit2048,
        Self::Fit2560,
        Self::Fit3840,
    ];

    /// The configuration identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tile50 => "tile_50",
            Self::Tile100 => "tile_100",
            Self::Tile224 => "tile_224",
            Self::Tile500 => "tile_500",
            Self::Left224 => "left_224",
            Self::Right224 => "right_224",
            Self::Fit720 => "fit_720",
            Self::Fit1280 => "fit_1280",
            Self::Fit1920 => "fit_1920",
            Self::Fit2048 => "fit_2048",
            Self::Fit2560 => "fit_2560",
            Self::Fit3840 => "fit_3840",
        }
    }

    /// Target box as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Tile50 => (50, 50),
            Self::Tile100 => (100, 100),
            Self::Tile224 | Self::Left224 | Self::Right224 => (224, 224),
            Self::Tile500 => (500, 500),
            Self::Fit720 => (720, 720),
            Self::Fit1280 => (1280, 1024),
            Self::Fit1920 => (1920, 1200),
            Self::Fit2048 => (2048, 2048),
            Self::Fit2560 => (2560, 1600),
            Self::Fit3840 => (3840, 2400),
        }
    }

    /// How the source is fitted into the box.
    pub fn resample(&self) -> Resample {
        match self {
            Self::Tile50 | Self::Tile100 | Self::Tile224 | Self::Tile500 => Resample::FillCenter,
            Self::Left224 => Resample::FillTopLeft,
            Self::Right224 => Resample::FillBottomRight,
            _ => Resample::Fit,
        }
    }
}

impl fmt::Display for ThumbSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A size identifier that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown thumbnail size '{0}'")]
pub struct UnknownThumbSize(pub String);

impl From<UnknownThumbSize> for AppError {
    fn from(err: UnknownThumbSize) -> Self {
        AppError::new(ErrorKind::Configuration, err.to_string())
    }
}

impl FromStr for ThumbSize {
    type Err = UnknownThumbSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| UnknownThumbSize(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_sizes() {
        for size in ThumbSize::ALL {
            assert_eq!(size.as_str().parse::<ThumbSize>(), Ok(size));
        }
        assert_eq!("fit_1920".parse::<ThumbSize>().unwrap().dimensions(), (1920, 1200));
    }

    #[test]
    fn test_unknown_size() {
        let err = "fit_9999".parse::<ThumbSize>().unwrap_err();
        assert_eq!(err, UnknownThumbSize("fit_9999".to_string()));

        let app: AppError = err.into();
        assert_eq!(app.kind, ErrorKind::Configuration);
        assert!(app.message.contains("fit_9999"));
    }

    #[test]
    fn test_resample_options() {
        assert_eq!(ThumbSize::Tile224.resample(), Resample::FillCenter);
        assert_eq!(ThumbSize::Left224.resample(), Resample::FillTopLeft);
        assert_eq!(ThumbSize::Right224.resample(), Resample::FillBottomRight);
        assert_eq!(ThumbSize::Fit720.resample(), Resample::Fit);
    }
}
