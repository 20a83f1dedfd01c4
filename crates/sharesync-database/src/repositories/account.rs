//! Account repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use sharesync_core::error::{AppError, ErrorKind};
use sharesync_core::result::AppResult;
use sharesync_entity::account::Account;

use crate::store::AccountStore;

/// Repository for account lookups.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_share_enabled(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE acc_share = TRUE ORDER BY acc_name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list sharing accounts", e)
        })
    }
}
