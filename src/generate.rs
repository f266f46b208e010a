//! End-to-end generation: plan the grid, place it onto a presentation and
//! write the package.
//!
//! Failures anywhere abort the run. [`generate_to_path`] writes through a
//! temporary file in the destination directory, so an aborted run never
//! leaves a partial presentation behind.

use crate::assets::{AssetCatalog, ImageAsset};
use crate::common::unit::{MAX_SLIDE_EMU, emu_to_cm};
use crate::config::LayoutConfig;
use crate::layout::{Extent, LayoutPlan, Rect, SlideSink, place_all};
use crate::ooxml::OoxmlError;
use crate::ooxml::pptx::{MutablePresentation, MutableSlide};
use crate::Result;
use std::path::Path;
use tracing::{info, warn};

/// What a generation run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Number of group rows placed
    pub groups: usize,
    /// Number of slides written
    pub slides: usize,
    /// Slide size
    pub canvas: Extent,
    /// Grid cell derived from the representative image
    pub cell: Extent,
}

impl GenerationSummary {
    fn from_plan(plan: &LayoutPlan) -> Self {
        Self {
            groups: plan.groups.len(),
            slides: plan.slide_count(),
            canvas: plan.canvas,
            cell: plan.cell,
        }
    }
}

/// [`SlideSink`] over a [`MutablePresentation`], applying the configured
/// label font size.
pub struct PresentationSink<'a> {
    pres: &'a mut MutablePresentation,
    label_font_size: Option<f64>,
}

impl<'a> PresentationSink<'a> {
    pub fn new(pres: &'a mut MutablePresentation, label_font_size: Option<f64>) -> Self {
        Self {
            pres,
            label_font_size,
        }
    }

    fn current_slide(&mut self) -> Result<&mut MutableSlide> {
        self.pres.last_slide_mut().ok_or_else(|| {
            OoxmlError::InvalidFormat("shape placed before any slide was started".to_string())
                .into()
        })
    }
}

impl SlideSink for PresentationSink<'_> {
    fn start_slide(&mut self) -> Result<()> {
        self.pres.add_slide()?;
        Ok(())
    }

    fn place_label(&mut self, text: &str, frame: Rect) -> Result<()> {
        let font_size = self.label_font_size;
        let shape = self
            .current_slide()?
            .add_text_box(text, frame.x, frame.y, frame.width, frame.height);
        if let Some(size) = font_size {
            shape.font_size(size);
        }
        Ok(())
    }

    fn place_picture(&mut self, asset: ImageAsset, frame: Rect) -> Result<()> {
        let description = asset.file_name().to_string();
        self.current_slide()?.add_picture_from_bytes(
            asset.into_data(),
            frame.x,
            frame.y,
            frame.width,
            frame.height,
            Some(description),
        )?;
        Ok(())
    }
}

/// Plan the grid and place every group onto a new presentation.
pub fn build_presentation(
    config: &LayoutConfig,
    catalog: &AssetCatalog,
) -> Result<(MutablePresentation, GenerationSummary)> {
    let plan = LayoutPlan::build(config, catalog)?;

    if plan.canvas.width > MAX_SLIDE_EMU || plan.canvas.height > MAX_SLIDE_EMU {
        warn!(
            width_cm = emu_to_cm(plan.canvas.width),
            height_cm = emu_to_cm(plan.canvas.height),
            max_cm = emu_to_cm(MAX_SLIDE_EMU),
            "slide size exceeds what PowerPoint can display"
        );
    }

    let mut pres = MutablePresentation::new();
    pres.set_slide_size(plan.canvas.width, plan.canvas.height)?;
    if let Some(title) = config.title() {
        pres.set_title(title);
    }

    let mut sink = PresentationSink::new(&mut pres, config.label_font_size());
    place_all(&mut sink, &plan, catalog, config)?;

    Ok((pres, GenerationSummary::from_plan(&plan)))
}

/// Generate the presentation and return the `.pptx` bytes.
pub fn generate_to_bytes(
    config: &LayoutConfig,
    catalog: &AssetCatalog,
) -> Result<(Vec<u8>, GenerationSummary)> {
    let (pres, summary) = build_presentation(config, catalog)?;
    Ok((pres.into_bytes()?, summary))
}

/// Generate the presentation and write it to `path`.
///
/// The file only appears once the whole package has been written.
pub fn generate_to_path<P: AsRef<Path>>(
    config: &LayoutConfig,
    catalog: &AssetCatalog,
    path: P,
) -> Result<GenerationSummary> {
    let path = path.as_ref();
    let (pres, summary) = build_presentation(config, catalog)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    pres.write_to(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    let bytes = tmp.as_file().metadata()?.len();
    tmp.persist(path)?;

    info!(
        path = %path.display(),
        slides = summary.slides,
        groups = summary.groups,
        bytes,
        "presentation written"
    );
    Ok(summary)
}
