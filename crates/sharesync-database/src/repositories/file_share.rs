//! File share repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use sharesync_core::error::{AppError, ErrorKind};
use sharesync_core::result::AppResult;
use sharesync_entity::account::Account;
use sharesync_entity::share::{FileShare, FileShareStatus};

use crate::store::FileShareStore;

const SELECT_WITH_FILE: &str = "SELECT s.*, f.file_name, f.file_hash \
     FROM file_shares s JOIN files f ON f.id = s.file_id";

/// Repository for share record queries and updates.
#[derive(Debug, Clone)]
pub struct FileShareRepository {
    pool: PgPool,
    /// Maximum number of records returned per query.
    batch_size: i64,
}

impl FileShareRepository {
    /// Create a new file share repository.
    pub fn new(pool: PgPool, batch_size: u32) -> Self {
        Self {
            pool,
            batch_size: i64::from(batch_size.max(1)),
        }
    }
}

/// Records shared (or created, if never shared) before the returned instant are expired.
///
/// Returns `None` when the account keeps shared files forever.
pub fn expiry_cutoff(account: &Account, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if !account.shares_expire() {
        return None;
    }
    Some(now - Duration::seconds(i64::from(account.share_expires)))
}

#[async_trait]
impl FileShareStore for FileShareRepository {
    async fn find_new(&self, account_id: Uuid) -> AppResult<Vec<FileShare>> {
        sqlx::query_as::<_, FileShare>(&format!(
            "{SELECT_WITH_FILE} WHERE s.account_id = $1 AND s.status = $2 \
             ORDER BY s.created_at ASC LIMIT $3"
        ))
        .bind(account_id)
        .bind(FileShareStatus::New)
        .bind(self.batch_size)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list new file shares", e)
        })
    }

    async fn find_expired(&self, account: &Account) -> AppResult<Vec<FileShare>> {
        let Some(cutoff) = expiry_cutoff(account, Utc::now()) else {
            return Ok(Vec::new());
        };

        sqlx::query_as::<_, FileShare>(&format!(
            "{SELECT_WITH_FILE} WHERE s.account_id = $1 AND s.status IN ($2, $3) \
             AND COALESCE(s.shared_at, s.created_at) < $4 \
             ORDER BY s.created_at ASC LIMIT $5"
        ))
        .bind(account.id)
        .bind(FileShareStatus::Shared)
        .bind(FileShareStatus::Error)
        .bind(cutoff)
        .bind(self.batch_size)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list expired file shares", e)
        })
    }

    async fn save(&self, share: &FileShare) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE file_shares SET status = $2, error = $3, errors = $4, shared_at = $5, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(share.id)
        .bind(share.status)
        .bind(&share.error)
        .bind(share.errors)
        .bind(share.shared_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save file share", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "File share {} not found",
                share.id
            )));
        }
        Ok(())
    }
}
