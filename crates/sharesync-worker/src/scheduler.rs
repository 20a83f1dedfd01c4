//! Cron scheduler for periodic share runs.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use sharesync_core::config::ShareWorkerConfig;
use sharesync_core::error::{AppError, ErrorKind};

use crate::gate::ExecutionGate;
use crate::jobs::share::ShareWorker;

/// Cron-based scheduler triggering background workers.
pub struct CronScheduler {
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler })
    }

    /// Register the share worker on its configured schedule.
    ///
    /// A tick that fires while the previous run is still active is dropped
    /// by the worker's gate.
    pub async fn register_share_sync(
        &self,
        worker: Arc<ShareWorker>,
        config: &ShareWorkerConfig,
    ) -> Result<(), AppError> {
        if !config.enabled {
            tracing::info!("Share worker disabled, not scheduling");
            return Ok(());
        }

        let job = CronJob::new_async(config.schedule.as_str(), move |_uuid, _lock| {
            let worker = Arc::clone(&worker);
            Box::pin(async move {
                tracing::debug!("Triggering share run");
                match worker.start().await {
                    Ok(report) => tracing::debug!(?report, "Scheduled share run finished"),
                    Err(e) if e.is(ErrorKind::Conflict) => {
                        tracing::warn!("Skipping share tick: {}", e.message);
                    }
                    Err(e) => tracing::error!("Scheduled share run failed: {}", e),
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid share schedule '{}': {e}",
                config.schedule
            ))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add share schedule: {e}")))?;

        tracing::info!(schedule = %config.schedule, "Registered: share_sync");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Stop scheduling, cancel the run holding `gate` and wait for it to finish.
    ///
    /// Returns `false` if the run was still active after `drain`.
    pub async fn shutdown_gracefully(
        &mut self,
        gate: &ExecutionGate,
        drain: Duration,
    ) -> Result<bool, AppError> {
        // A tick after cancel() would start an uncanceled run.
        self.shutdown().await?;
        gate.cancel();
        Ok(gate.wait_idle(drain).await)
    }
}
