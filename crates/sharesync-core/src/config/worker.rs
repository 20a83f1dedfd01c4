//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkerConfig {
    /// Share worker settings.
    #[serde(default)]
    pub share: ShareWorkerConfig,
}

/// Share worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareWorkerConfig {
    /// Whether the scheduler triggers the share worker.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression (with seconds) for scheduled runs.
    #[serde(default = "default_schedule")]
    pub schedule: String,
    /// Maximum number of records fetched per account and phase in one run.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

impl Default for ShareWorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            schedule: default_schedule(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_schedule() -> String {
    "0 */15 * * * *".to_string()
}

fn default_batch_size() -> u32 {
    100
}
