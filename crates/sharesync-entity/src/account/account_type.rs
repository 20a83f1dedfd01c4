//! Remote account type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The remote service an account points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// WebDAV file server.
    Webdav,
    /// Facebook.
    Facebook,
    /// Twitter.
    Twitter,
    /// Flickr.
    Flickr,
    /// Instagram.
    Instagram,
    /// EyeEm.
    Eyeem,
    /// Telegram.
    Telegram,
    /// WhatsApp.
    Whatsapp,
    /// Google Photos.
    Gphotos,
    /// Google Drive.
    Gdrive,
    /// Microsoft OneDrive.
    Onedrive,
}

impl AccountType {
    /// Return the account type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webdav => "webdav",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::Flickr => "flickr",
            Self::Instagram => "instagram",
            Self::Eyeem => "eyeem",
            Self::Telegram => "telegram",
            Self::Whatsapp => "whatsapp",
            Self::Gphotos => "gphotos",
            Self::Gdrive => "gdrive",
            Self::Onedrive => "onedrive",
        }
    }

    /// Whether the share worker can replicate files to this kind of account.
    pub fn supports_file_sync(&self) -> bool {
        matches!(self, Self::Webdav)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = sharesync_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "webdav" => Ok(Self::Webdav),
            "facebook" => Ok(Self::Facebook),
            "twitter" => Ok(Self::Twitter),
            "flickr" => Ok(Self::Flickr),
            "instagram" => Ok(Self::Instagram),
            "eyeem" => Ok(Self::Eyeem),
            "telegram" => Ok(Self::Telegram),
            "whatsapp" => Ok(Self::Whatsapp),
            "gphotos" => Ok(Self::Gphotos),
            "gdrive" => Ok(Self::Gdrive),
            "onedrive" => Ok(Self::Onedrive),
            _ => Err(sharesync_core::AppError::validation(format!(
                "Invalid account type: '{s}'"
            ))),
        }
    }
}
