//! Core traits defined in `sharesync-core` and implemented by other crates.

pub mod remote;

pub use remote::{RemoteClient, RemoteConnector};
