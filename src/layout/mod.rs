//! Grid layout engine.
//!
//! The pipeline is plain sequential composition:
//!
//! 1. [`naming`]: file names to group keys (first channel drives discovery)
//! 2. [`plan`]: group records, representative measurement, canvas
//! 3. [`paging`]: rows split into slides
//! 4. [`placer`]: label and picture coordinates pushed into a [`SlideSink`]
//!
//! [`geometry`] holds the sizing rules shared by planning and placement.

pub mod geometry;
pub mod naming;
pub mod paging;
pub mod placer;
pub mod plan;

pub use geometry::{Extent, Rect, canvas_extent, fit_longest_side};
pub use naming::GroupDiscovery;
pub use paging::paginate;
pub use placer::{SlideSink, place_all};
pub use plan::{GroupRecord, LayoutPlan};
