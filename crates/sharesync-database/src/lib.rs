//! # sharesync-database
//!
//! PostgreSQL connection management, the store traits the share worker
//! consumes, and their sqlx implementations.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{AccountStore, FileShareStore};
