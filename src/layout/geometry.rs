//! Image sizing and slide canvas geometry. All values are EMUs.

use crate::config::LayoutConfig;

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: i64,
    pub height: i64,
}

impl Extent {
    #[inline]
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// A square of side `side`.
    #[inline]
    pub const fn square(side: i64) -> Self {
        Self::new(side, side)
    }
}

/// An absolutely positioned box on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    #[inline]
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Place `extent` with its top-left corner at `(x, y)`.
    #[inline]
    pub const fn at(x: i64, y: i64, extent: Extent) -> Self {
        Self::new(x, y, extent.width, extent.height)
    }
}

/// Scale `intrinsic` so its longer side equals `target`, keeping the aspect
/// ratio. The shorter side is truncated to whole EMUs.
///
/// ```
/// use images2pptx::layout::geometry::{Extent, fit_longest_side};
/// assert_eq!(fit_longest_side(Extent::new(300, 600), 1000), Extent::new(500, 1000));
/// assert_eq!(fit_longest_side(Extent::new(80, 80), 1000), Extent::square(1000));
/// ```
pub fn fit_longest_side(intrinsic: Extent, target: i64) -> Extent {
    let Extent { width, height } = intrinsic;
    if width <= 0 || height <= 0 || width == height {
        return Extent::square(target);
    }
    if height > width {
        Extent::new(scale(width, target, height), target)
    } else {
        Extent::new(target, scale(height, target, width))
    }
}

#[inline]
fn scale(value: i64, numerator: i64, denominator: i64) -> i64 {
    (value as i128 * numerator as i128 / denominator as i128) as i64
}

/// Slide size for a grid of `cell`-sized images.
///
/// Width holds one column per channel separated by the spacing; height holds
/// `images_per_slide` rows, each an image plus its label row. Both include the
/// margin on either side. Configuration validation bounds every input so the
/// sums stay well inside `i64`.
pub fn canvas_extent(cell: Extent, config: &LayoutConfig) -> Extent {
    let columns = config.channel_count() as i64;
    let rows = config.images_per_slide() as i64;
    let margins = 2 * config.margin();
    Extent::new(
        columns * cell.width + (columns - 1) * config.spacing() + margins,
        rows * cell.height + rows * config.label_height() + margins,
    )
}
