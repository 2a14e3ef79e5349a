//! Content domain models and URL helpers.

pub mod model;
pub mod url;

pub use model::*;
