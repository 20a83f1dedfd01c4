//! Job implementations.

pub mod share;
