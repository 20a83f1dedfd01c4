//! Share worker: replicates shared files to remote accounts and removes
//! them again once their share period is over.
//!
//! A run has two phases over the same set of share-enabled accounts:
//!
//! 1. **Upload**: every `new` record is uploaded (optionally as a thumbnail
//!    variant). Failures are counted on the record; once the account's retry
//!    limit is exceeded the record is demoted to `error`.
//! 2. **Expire**: every expired `shared`/`error` record is deleted from the
//!    remote account and marked `removed`.
//!
//! Infrastructure problems (directory provisioning, thumbnail configuration
//! or derivation) skip the record without touching its retry bookkeeping.
//! Only transfer failures count against the retry limit.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;

use sharesync_core::events::{EventBus, ShareEvent, SystemEvent};
use sharesync_core::result::AppResult;
use sharesync_core::traits::remote::{RemoteClient, RemoteConnector};
use sharesync_database::store::{AccountStore, FileShareStore};
use sharesync_entity::account::Account;
use sharesync_entity::share::FileShare;
use sharesync_storage::thumbnail::{ThumbSize, ThumbnailDeriver};

use crate::gate::{ExecutionGate, RunGuard};

const WORKER_NAME: &str = "share";

/// Counters describing one share worker run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareRunReport {
    /// Records uploaded successfully.
    pub uploaded: usize,
    /// Upload attempts that failed.
    pub upload_failed: usize,
    /// Records demoted to the error state in this run.
    pub demoted: usize,
    /// Expired records deleted from their remote account.
    pub removed: usize,
    /// Remote deletions that failed.
    pub remove_failed: usize,
    /// Records skipped without touching their bookkeeping.
    pub skipped: usize,
    /// Records whose updated state could not be persisted.
    pub save_failed: usize,
    /// Whether the run stopped early on a cancellation request.
    pub canceled: bool,
}

/// Replicates share records to their remote accounts.
pub struct ShareWorker {
    gate: Arc<ExecutionGate>,
    accounts: Arc<dyn AccountStore>,
    shares: Arc<dyn FileShareStore>,
    connector: Arc<dyn RemoteConnector>,
    thumbnails: Arc<dyn ThumbnailDeriver>,
    events: EventBus,
    /// Base path that record file names are relative to.
    originals_path: PathBuf,
}

impl std::fmt::Debug for ShareWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareWorker")
            .field("gate", &self.gate)
            .field("originals_path", &self.originals_path)
            .finish()
    }
}

impl ShareWorker {
    /// Create a new share worker.
    pub fn new(
        gate: Arc<ExecutionGate>,
        accounts: Arc<dyn AccountStore>,
        shares: Arc<dyn FileShareStore>,
        connector: Arc<dyn RemoteConnector>,
        thumbnails: Arc<dyn ThumbnailDeriver>,
        events: EventBus,
        originals_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            gate,
            accounts,
            shares,
            connector,
            thumbnails,
            events,
            originals_path: originals_path.into(),
        }
    }

    /// The gate guarding this worker.
    pub fn gate(&self) -> &Arc<ExecutionGate> {
        &self.gate
    }

    /// Run both phases once.
    ///
    /// Fails only if another run is active or the account query fails.
    /// A cancellation request ends the run early with `Ok`.
    pub async fn start(&self) -> AppResult<ShareRunReport> {
        let guard = match self.gate.start() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::warn!("share: {}", e.message);
                self.publish_failure(&e.message);
                return Err(e);
            }
        };

        self.events.publish(SystemEvent::WorkerStarted {
            worker: WORKER_NAME.to_string(),
        });

        let accounts = match self.accounts.find_share_enabled().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::error!(error = %e, "share: failed to find sharing accounts");
                self.publish_failure(&e.to_string());
                return Err(e);
            }
        };

        let mut report = ShareRunReport::default();
        let outcome = self.run(&guard, &accounts, &mut report).await;
        report.canceled = outcome.is_break();

        if report.canceled {
            tracing::info!(?report, "share: run canceled");
        } else {
            tracing::info!(?report, "share: run completed");
        }

        self.events.publish(SystemEvent::WorkerCompleted {
            worker: WORKER_NAME.to_string(),
            canceled: report.canceled,
        });

        Ok(report)
    }

    async fn run(
        &self,
        guard: &RunGuard<'_>,
        accounts: &[Account],
        report: &mut ShareRunReport,
    ) -> ControlFlow<()> {
        for account in accounts {
            if guard.canceled() {
                return ControlFlow::Break(());
            }
            if !account.is_share_target() {
                continue;
            }
            self.upload_pending(guard, account, report).await?;
        }

        for account in accounts {
            if guard.canceled() {
                return ControlFlow::Break(());
            }
            if !account.is_share_target() {
                continue;
            }
            self.remove_expired(guard, account, report).await?;
        }

        ControlFlow::Continue(())
    }

    /// Upload phase for one account.
    async fn upload_pending(
        &self,
        guard: &RunGuard<'_>,
        account: &Account,
        report: &mut ShareRunReport,
    ) -> ControlFlow<()> {
        let shares = match self.shares.find_new(account.id).await {
            Ok(shares) => shares,
            Err(e) => {
                tracing::warn!(account = %account.acc_name, error = %e, "share: failed to find new file shares");
                return ControlFlow::Continue(());
            }
        };

        if shares.is_empty() {
            return ControlFlow::Continue(());
        }

        let Some(client) = self.connect(account, shares.len(), report).await else {
            return ControlFlow::Continue(());
        };

        let retry_limit = account.retry_limit();
        let mut existing_dirs: HashSet<String> = HashSet::new();

        for mut share in shares {
            if guard.canceled() {
                return ControlFlow::Break(());
            }

            if let Some(dir) = share.remote_dir() {
                if existing_dirs.contains(dir) {
                    tracing::debug!(dir, "share: directory already provisioned");
                } else if let Err(e) = client.create_dir(dir).await {
                    tracing::error!(account = %account.acc_name, dir, error = %e, "share: could not create folder");
                    report.skipped += 1;
                    continue;
                } else {
                    existing_dirs.insert(dir.to_string());
                }
            }

            let source = match self.upload_source(account, &share).await {
                Ok(source) => source,
                Err(e) => {
                    tracing::error!(
                        account = %account.acc_name,
                        remote_name = %share.remote_name,
                        error = %e,
                        "share: could not prepare upload"
                    );
                    report.skipped += 1;
                    continue;
                }
            };

            match client.upload(&source, &share.remote_name).await {
                Ok(()) => {
                    tracing::info!(
                        account = %account.acc_name,
                        remote_name = %share.remote_name,
                        "share: uploaded file"
                    );
                    share.mark_shared();
                    report.uploaded += 1;
                    self.events.publish(ShareEvent::Uploaded {
                        share_id: share.id,
                        account_id: account.id,
                        account_name: account.acc_name.clone(),
                        remote_name: share.remote_name.clone(),
                    });
                }
                Err(e) => {
                    tracing::error!(
                        account = %account.acc_name,
                        remote_name = %share.remote_name,
                        error = %e,
                        "share: upload failed"
                    );
                    share.record_failure(e.to_string());
                    report.upload_failed += 1;
                }
            }

            if share.apply_retry_limit(retry_limit) {
                tracing::warn!(
                    account = %account.acc_name,
                    remote_name = %share.remote_name,
                    errors = share.errors,
                    "share: retry limit exceeded, giving up"
                );
                report.demoted += 1;
            }

            if guard.canceled() {
                return ControlFlow::Break(());
            }

            self.persist(&share, report).await;
        }

        ControlFlow::Continue(())
    }

    /// Expiration phase for one account.
    async fn remove_expired(
        &self,
        guard: &RunGuard<'_>,
        account: &Account,
        report: &mut ShareRunReport,
    ) -> ControlFlow<()> {
        let shares = match self.shares.find_expired(account).await {
            Ok(shares) => shares,
            Err(e) => {
                tracing::warn!(account = %account.acc_name, error = %e, "share: failed to find expired file shares");
                return ControlFlow::Continue(());
            }
        };

        if shares.is_empty() {
            return ControlFlow::Continue(());
        }

        let Some(client) = self.connect(account, shares.len(), report).await else {
            return ControlFlow::Continue(());
        };

        for mut share in shares {
            if guard.canceled() {
                return ControlFlow::Break(());
            }

            match client.delete(&share.remote_name).await {
                Ok(()) => {
                    tracing::info!(
                        account = %account.acc_name,
                        remote_name = %share.remote_name,
                        "share: removed file"
                    );
                    share.mark_removed();
                    report.removed += 1;
                    self.events.publish(ShareEvent::Removed {
                        share_id: share.id,
                        account_id: account.id,
                        account_name: account.acc_name.clone(),
                        remote_name: share.remote_name.clone(),
                    });
                }
                Err(e) => {
                    tracing::error!(
                        account = %account.acc_name,
                        remote_name = %share.remote_name,
                        error = %e,
                        "share: remove failed"
                    );
                    share.record_failure(e.to_string());
                    report.remove_failed += 1;
                }
            }

            if guard.canceled() {
                return ControlFlow::Break(());
            }

            self.persist(&share, report).await;
        }

        ControlFlow::Continue(())
    }

    async fn connect(
        &self,
        account: &Account,
        pending: usize,
        report: &mut ShareRunReport,
    ) -> Option<Box<dyn RemoteClient>> {
        match self
            .connector
            .connect(&account.acc_url, &account.acc_user, &account.acc_pass)
            .await
        {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(account = %account.acc_name, error = %e, "share: could not connect");
                report.skipped += pending;
                None
            }
        }
    }

    /// Local file to upload: the original, or its thumbnail variant if the
    /// account selects a share size.
    async fn upload_source(&self, account: &Account, share: &FileShare) -> AppResult<PathBuf> {
        let original = self
            .originals_path
            .join(share.file.file_name.trim_start_matches('/'));

        let Some(size) = account.share_size() else {
            return Ok(original);
        };
        let size: ThumbSize = size.parse()?;

        self.thumbnails
            .derive(&original, &share.file.file_hash, size)
            .await
    }

    async fn persist(&self, share: &FileShare, report: &mut ShareRunReport) {
        if let Err(e) = self.shares.save(share).await {
            tracing::error!(share_id = %share.id, error = %e, "share: failed to save file share");
            report.save_failed += 1;
        }
    }

    fn publish_failure(&self, message: &str) {
        self.events.publish(SystemEvent::WorkerFailed {
            worker: WORKER_NAME.to_string(),
            message: message.to_string(),
        });
    }
}
