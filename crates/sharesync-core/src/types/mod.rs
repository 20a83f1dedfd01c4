//! Shared value types.

pub mod retry_limit;

pub use retry_limit::RetryLimit;
