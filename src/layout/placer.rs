//! Grid placement of labels and pictures onto slides.
//!
//! Row `i` of a slide has its label at `(margin, margin + i * (cell.height +
//! label))` and its pictures one label-height below, one column per channel
//! stepping by `cell.width + spacing`. Every picture is resized on its own to
//! fit the target size, while the grid steps use the representative cell.

use crate::assets::{AssetCatalog, ImageAsset};
use crate::config::LayoutConfig;
use crate::layout::geometry::{Extent, Rect, fit_longest_side};
use crate::layout::plan::LayoutPlan;
use crate::{Error, Result};
use tracing::debug;

/// Document being built. Placements land on the slide most recently started.
pub trait SlideSink {
    /// Begin a new blank slide.
    fn start_slide(&mut self) -> Result<()>;

    /// Add a text label occupying `frame`.
    fn place_label(&mut self, text: &str, frame: Rect) -> Result<()>;

    /// Add a picture occupying `frame`. The asset is consumed.
    fn place_picture(&mut self, asset: ImageAsset, frame: Rect) -> Result<()>;
}

/// Frame of the label for row `row`.
pub fn label_frame(config: &LayoutConfig, cell: Extent, row: usize) -> Rect {
    let row = row as i64;
    let label = config.label_height();
    let y = config.margin() + cell.height * row + label * row;
    Rect::new(config.margin(), y, label, label)
}

/// Top-left corner of the picture at `(row, column)`.
pub fn picture_origin(config: &LayoutConfig, cell: Extent, row: usize, column: usize) -> (i64, i64) {
    let column = column as i64;
    let x = config.margin() + cell.width * column + config.spacing() * column;
    let y = label_frame(config, cell, row).y + config.label_height();
    (x, y)
}

/// Place every group of `plan` into `sink`, slide by slide, row by row,
/// column by column.
///
/// Each image is opened only for its own placement and handed to the sink.
/// Any failure aborts the run; the sink is left partially filled and should be
/// discarded.
pub fn place_all<S: SlideSink>(
    sink: &mut S,
    plan: &LayoutPlan,
    catalog: &AssetCatalog,
    config: &LayoutConfig,
) -> Result<()> {
    for (slide_index, page) in plan.pages.iter().enumerate() {
        sink.start_slide()?;
        debug!(slide = slide_index + 1, rows = page.len(), "placing slide");

        for (row, group) in plan.groups[page.clone()].iter().enumerate() {
            sink.place_label(&group.key, label_frame(config, plan.cell, row))?;

            for (column, (channel, file_name)) in group.images.iter().enumerate() {
                let entry = catalog.get(file_name).ok_or_else(|| Error::MissingAsset {
                    group: group.key.clone(),
                    channel: channel.clone(),
                    file_name: file_name.clone(),
                })?;
                let asset = ImageAsset::open(entry, config.dpi())?;
                let size = fit_longest_side(asset.intrinsic_extent(), config.image_size());
                let (x, y) = picture_origin(config, plan.cell, row, column);
                debug!(file = %file_name, x, y, width = size.width, height = size.height, "placing picture");
                sink.place_picture(asset, Rect::at(x, y, size))?;
            }
        }
    }
    Ok(())
}
