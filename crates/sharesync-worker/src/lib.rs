//! Background share synchronization for ShareSync.
//!
//! This crate provides:
//! - An execution gate guaranteeing a single running instance with cooperative cancellation
//! - The share worker that uploads pending share records and removes expired ones
//! - A cron scheduler that triggers the share worker periodically

pub mod gate;
pub mod jobs;
pub mod scheduler;

pub use gate::{ExecutionGate, RunGuard};
pub use jobs::share::{ShareRunReport, ShareWorker};
pub use scheduler::CronScheduler;
