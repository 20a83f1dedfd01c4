//! Read and persistence seams consumed by the share worker.

use async_trait::async_trait;
use uuid::Uuid;

use sharesync_core::result::AppResult;
use sharesync_entity::account::Account;
use sharesync_entity::share::FileShare;

/// Account queries.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// All accounts with sharing enabled, regardless of account type.
    async fn find_share_enabled(&self) -> AppResult<Vec<Account>>;
}

/// Share record queries and persistence.
#[async_trait]
pub trait FileShareStore: Send + Sync {
    /// Records of `account_id` waiting for upload, oldest first.
    async fn find_new(&self, account_id: Uuid) -> AppResult<Vec<FileShare>>;

    /// Records of `account` whose share period is over and whose remote copy
    /// should be deleted, oldest first.
    async fn find_expired(&self, account: &Account) -> AppResult<Vec<FileShare>>;

    /// Persist status, error bookkeeping and the shared marker of a record.
    async fn save(&self, share: &FileShare) -> AppResult<()>;
}
