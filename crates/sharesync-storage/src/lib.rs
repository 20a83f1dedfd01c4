//! # sharesync-storage
//!
//! Remote client implementations and local derivative generation for
//! ShareSync. Provides the WebDAV client behind the core
//! [`RemoteClient`](sharesync_core::traits::RemoteClient) trait and the
//! content-hash-addressed thumbnail cache.

pub mod providers;
pub mod thumbnail;

pub use providers::{WebDavClient, WebDavConnector};
pub use thumbnail::{ThumbSize, ThumbnailDeriver, ThumbnailGenerator};
