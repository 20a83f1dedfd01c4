//! Share-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to replicating shared files to remote accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShareEvent {
    /// A file was uploaded to a remote account.
    Uploaded {
        /// The share record ID.
        share_id: Uuid,
        /// The account the file was uploaded to.
        account_id: Uuid,
        /// Display name of the account.
        account_name: String,
        /// Remote target path.
        remote_name: String,
    },
    /// An expired file was removed from a remote account.
    Removed {
        /// The share record ID.
        share_id: Uuid,
        /// The account the file was removed from.
        account_id: Uuid,
        /// Display name of the account.
        account_name: String,
        /// Remote target path.
        remote_name: String,
    },
}
