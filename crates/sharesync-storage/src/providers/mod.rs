//! Remote client implementations.

pub mod webdav;

pub use webdav::{WebDavClient, WebDavConnector};
