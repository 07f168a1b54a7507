//! Domain models for the wardline system.

mod document;
mod draft;
mod patient;

pub use document::*;
pub use draft::*;
pub use patient::*;
