//! File share status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a share record.
///
/// ```text
/// New ──upload ok──▶ Shared ──expired + delete ok──▶ Removed
///  │                                                   ▲
///  └──retry limit exceeded──▶ Error ──expired + delete ok┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "file_share_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileShareStatus {
    /// Queued for upload.
    New,
    /// Uploading failed more often than the account's retry limit allows.
    Error,
    /// Present on the remote account.
    Shared,
    /// Deleted from the remote account after expiring.
    Removed,
}

impl FileShareStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Error => "error",
            Self::Shared => "shared",
            Self::Removed => "removed",
        }
    }

    /// Whether an expired record in this state still has a remote copy to clean up.
    pub fn is_removable(&self) -> bool {
        matches!(self, Self::Shared | Self::Error)
    }
}

impl fmt::Display for FileShareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
