//! File reference value object.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The local file behind a share record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileRef {
    /// File name relative to the originals path.
    pub file_name: String,
    /// Content hash; addresses derived thumbnails.
    pub file_hash: String,
}
