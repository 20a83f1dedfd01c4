//! Repository implementations for ShareSync entities.

pub mod account;
pub mod file_share;

pub use account::AccountRepository;
pub use file_share::FileShareRepository;
