//! Common types and utilities shared across the crate.

// Submodule declarations
pub mod error;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use unit::LengthUnit;
