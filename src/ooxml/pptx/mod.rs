//! PowerPoint (.pptx) presentation writing.
//!
//! A [`MutablePresentation`] holds blank slides with text boxes and pictures
//! and serializes to a complete package: one slide master, one blank layout,
//! the Office theme, and a media part per picture.
//!
//! ```
//! use images2pptx::ooxml::pptx::MutablePresentation;
//!
//! let mut pres = MutablePresentation::new();
//! pres.add_slide()?.add_text_box("Sample1", 0, 0, 360_000, 360_000);
//! let bytes = pres.into_bytes()?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), images2pptx::ooxml::OoxmlError>(())
//! ```

pub mod format;
pub mod template;
pub mod writer;

pub use format::{ImageFormat, TextFormat};
pub use writer::{MutablePresentation, MutableShape, MutableSlide};
