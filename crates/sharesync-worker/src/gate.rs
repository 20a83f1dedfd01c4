//! Exclusive run slot with cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use sharesync_core::error::AppError;
use sharesync_core::result::AppResult;

/// Guards a job so that at most one instance runs at a time.
///
/// The gate is owned by whoever triggers the job (scheduler, CLI) and shared
/// with the job via `Arc`. A stop request is observed by the running job
/// through [`ExecutionGate::canceled`].
#[derive(Debug)]
pub struct ExecutionGate {
    name: String,
    busy: AtomicBool,
    canceled: AtomicBool,
}

impl ExecutionGate {
    /// Create a new idle gate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            busy: AtomicBool::new(false),
            canceled: AtomicBool::new(false),
        }
    }

    /// Acquire the run slot.
    ///
    /// Fails immediately with a conflict error if another run holds it. The
    /// slot is released when the returned guard is dropped.
    pub fn start(&self) -> AppResult<RunGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::conflict(format!(
                "{} worker already running",
                self.name
            )));
        }
        self.canceled.store(false, Ordering::Release);
        Ok(RunGuard { gate: self })
    }

    /// Request the current run to stop at its next check.
    ///
    /// Has no effect when nothing is running.
    pub fn cancel(&self) {
        if self.is_running() {
            self.canceled.store(true, Ordering::Release);
        }
    }

    /// Whether a stop was requested for the current run.
    pub fn canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }

    /// Whether a run currently holds the slot.
    pub fn is_running(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Wait until no run holds the slot. Returns `false` on timeout.
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            while self.is_running() {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        })
        .await
        .is_ok()
    }
}

/// Holds the run slot of an [`ExecutionGate`] until dropped.
#[derive(Debug)]
pub struct RunGuard<'a> {
    gate: &'a ExecutionGate,
}

impl RunGuard<'_> {
    /// Whether a stop was requested for this run.
    pub fn canceled(&self) -> bool {
        self.gate.canceled()
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
