//! Office Open XML (OOXML) writing.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): parts, relationships, content types and the ZIP
//!    container
//! 2. **PresentationML** (`pptx`): slides, shapes and package assembly
pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
