//! # sharesync-core
//!
//! Core crate for ShareSync. Contains the remote client capability traits,
//! configuration schemas, domain events and the event bus, the retry limit
//! type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ShareSync crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
