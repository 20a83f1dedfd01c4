//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use sharesync_core::types::RetryLimit;

use super::account_type::AccountType;

/// A configured remote destination and its sharing policy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Display name.
    pub acc_name: String,
    /// Remote service type.
    pub acc_type: AccountType,
    /// Endpoint URL.
    pub acc_url: String,
    /// Login user.
    pub acc_user: String,
    /// Login secret.
    #[serde(skip_serializing)]
    pub acc_pass: String,
    /// Whether files may be shared to this account.
    pub acc_share: bool,
    /// Thumbnail size identifier to upload instead of the original.
    pub share_size: Option<String>,
    /// Seconds after which shared files are removed again (`<= 0` keeps them).
    pub share_expires: i32,
    /// Number of tolerated transfer failures (negative = unbounded).
    pub retry_limit: i32,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Whether the share worker should process this account at all.
    pub fn is_share_target(&self) -> bool {
        self.acc_share && self.acc_type.supports_file_sync()
    }

    /// The configured thumbnail size identifier, if any.
    pub fn share_size(&self) -> Option<&str> {
        self.share_size.as_deref().filter(|s| !s.is_empty())
    }

    /// Resolved retry limit.
    pub fn retry_limit(&self) -> RetryLimit {
        RetryLimit::from(self.retry_limit)
    }

    /// Whether shared files expire for this account.
    pub fn shares_expire(&self) -> bool {
        self.share_expires > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            acc_name: "Nextcloud".to_string(),
            acc_type: AccountType::Webdav,
            acc_url: "https://cloud.example.com/remote.php/webdav/".to_string(),
            acc_user: "alice".to_string(),
            acc_pass: "secret".to_string(),
            acc_share: true,
            share_size: None,
            share_expires: 0,
            retry_limit: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_share_target() {
        let mut acc = account();
        assert!(acc.is_share_target());

        acc.acc_share = false;
        assert!(!acc.is_share_target());

        acc.acc_share = true;
        acc.acc_type = AccountType::Flickr;
        assert!(!acc.is_share_target());
    }

    #[test]
    fn test_empty_share_size_is_none() {
        let mut acc = account();
        acc.share_size = Some(String::new());
        assert_eq!(acc.share_size(), None);

        acc.share_size = Some("fit_1920".to_string());
        assert_eq!(acc.share_size(), Some("fit_1920"));
    }

    #[test]
    fn test_retry_limit() {
        let mut acc = account();
        assert_eq!(acc.retry_limit(), RetryLimit::Max(3));
        acc.retry_limit = -1;
        assert_eq!(acc.retry_limit(), RetryLimit::Unbounded);
    }

    #[test]
    fn test_password_not_serialized() {
        let json = serde_json::to_value(account()).unwrap();
        assert!(json.get("acc_pass").is_none());
        assert_eq!(json["acc_type"], "webdav");
    }
}
