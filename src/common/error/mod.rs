//! Unified error types for images2pptx.
//!
//! Every failure aborts the whole generation run. Configuration problems are
//! reported before any layout work starts; lookup failures before any image
//! is opened.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
