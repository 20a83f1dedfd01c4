//! File share domain entities.

pub mod model;
pub mod status;

pub use model::FileShare;
pub use status::FileShareStatus;
