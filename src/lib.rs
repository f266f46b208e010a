//! images2pptx - lay out multi-channel image sets as a PowerPoint grid
//!
//! Files named `<group>_<channel><extension>` are grouped by their group key.
//! Each group becomes one row: a label followed by one picture per channel,
//! in the configured channel order. Rows are split across slides, and the
//! slide size is derived from the first group's first-channel image so the
//! grid fits exactly.
//!
//! # Features
//!
//! - **Filename grouping**: groups discovered from the first channel's files
//! - **Pagination**: a fixed number of rows per slide, no empty slides
//! - **Aspect-preserving sizing**: each image's longer side fits the target
//! - **PPTX writer**: a self-contained OOXML package writer
//! - **YAML configuration**: all layout parameters with units
//!
//! # Example
//!
//! ```no_run
//! use images2pptx::{AssetCatalog, LayoutConfig, LayoutOptions, generate_to_path};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut options = LayoutOptions::default();
//! options.extension = ".png".to_string();
//! options.set_channels_str("blue green");
//! let config = LayoutConfig::try_from(options)?;
//!
//! let catalog = AssetCatalog::from_dir("images")?;
//! let summary = generate_to_path(&config, &catalog, "Presentation.pptx")?;
//! println!("{} slides", summary.slides);
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod common;
pub mod config;
pub mod generate;
pub mod layout;
pub mod ooxml;

pub use assets::{AssetCatalog, ImageAsset};
pub use common::{Error, Result};
pub use config::{LayoutConfig, LayoutOptions};
pub use generate::{
    GenerationSummary, build_presentation, generate_to_bytes, generate_to_path,
};
