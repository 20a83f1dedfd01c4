//! Local file references.

pub mod model;

pub use model::FileRef;
