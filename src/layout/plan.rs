//! Group records and the complete layout plan for one generation run.

use crate::assets::{AssetCatalog, ImageAsset};
use crate::config::LayoutConfig;
use crate::layout::geometry::{Extent, canvas_extent, fit_longest_side};
use crate::layout::naming::{GroupDiscovery, channel_file_name, discover_groups};
use crate::layout::paging::paginate;
use crate::{Error, Result};
use std::ops::Range;
use tracing::{debug, info, warn};

/// One grid row: a group key and its image file for every channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    /// Group key, also the row label
    pub key: String,
    /// `(channel, file name)` in column order
    pub images: Vec<(String, String)>,
}

impl GroupRecord {
    /// Resolve the file for every channel of `key`.
    ///
    /// Fails with [`Error::MissingAsset`] on the first channel, in column
    /// order, that has no uploaded file.
    pub fn resolve(key: &str, config: &LayoutConfig, catalog: &AssetCatalog) -> Result<Self> {
        let images = config
            .channels()
            .iter()
            .map(|channel| {
                let file_name = channel_file_name(key, channel, config.extension());
                if catalog.contains(&file_name) {
                    Ok((channel.clone(), file_name))
                } else {
                    Err(Error::MissingAsset {
                        group: key.to_string(),
                        channel: channel.clone(),
                        file_name,
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            key: key.to_string(),
            images,
        })
    }

    /// Whether every channel of `key` has a file.
    fn is_complete(key: &str, config: &LayoutConfig, catalog: &AssetCatalog) -> bool {
        config
            .channels()
            .iter()
            .all(|channel| catalog.contains(&channel_file_name(key, channel, config.extension())))
    }
}

/// Everything the placer needs: rows, pages, and the uniform cell and canvas
/// sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Rows in discovery order
    pub groups: Vec<GroupRecord>,
    /// One range of row indices per slide
    pub pages: Vec<Range<usize>>,
    /// Grid cell derived from the representative image
    pub cell: Extent,
    /// Slide size
    pub canvas: Extent,
}

impl LayoutPlan {
    /// Discover groups, resolve their files, measure the representative image
    /// and derive the grid.
    ///
    /// The representative is the first group's first-channel image; it is
    /// opened, measured and dropped again. With no groups the cell falls back
    /// to a square of the target image size and the plan has no pages.
    pub fn build(config: &LayoutConfig, catalog: &AssetCatalog) -> Result<Self> {
        let keys = discover_groups(
            catalog.file_names(),
            config.first_channel(),
            config.extension(),
        );
        debug!(
            candidates = keys.len(),
            channel = config.first_channel(),
            "discovered group keys"
        );

        let keys: Vec<String> = match config.discovery() {
            GroupDiscovery::FirstChannel => keys,
            GroupDiscovery::AllChannels => keys
                .into_iter()
                .filter(|key| {
                    let complete = GroupRecord::is_complete(key, config, catalog);
                    if !complete {
                        warn!(group = %key, "skipping group with missing channels");
                    }
                    complete
                })
                .collect(),
        };

        let groups = keys
            .iter()
            .map(|key| GroupRecord::resolve(key, config, catalog))
            .collect::<Result<Vec<_>>>()?;

        let cell = match groups.first() {
            Some(first) => Self::measure_cell(first, config, catalog)?,
            None => {
                info!(
                    channel = config.first_channel(),
                    extension = config.extension(),
                    "no files match the first channel; the presentation will be empty"
                );
                Extent::square(config.image_size())
            },
        };
        let canvas = canvas_extent(cell, config);
        let pages = paginate(groups.len(), config.images_per_slide());

        info!(
            groups = groups.len(),
            slides = pages.len(),
            cell_width = cell.width,
            cell_height = cell.height,
            canvas_width = canvas.width,
            canvas_height = canvas.height,
            "layout planned"
        );

        Ok(Self {
            groups,
            pages,
            cell,
            canvas,
        })
    }

    fn measure_cell(
        representative: &GroupRecord,
        config: &LayoutConfig,
        catalog: &AssetCatalog,
    ) -> Result<Extent> {
        let (channel, file_name) = &representative.images[0];
        let entry = catalog.get(file_name).ok_or_else(|| Error::MissingAsset {
            group: representative.key.clone(),
            channel: channel.clone(),
            file_name: file_name.clone(),
        })?;
        let sample = ImageAsset::open(entry, config.dpi())?;
        let cell = fit_longest_side(sample.intrinsic_extent(), config.image_size());
        debug!(file = sample.file_name(), ?cell, "measured representative image");
        Ok(cell)
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutOptions;

    fn config(channels: &[&str], discovery: GroupDiscovery) -> LayoutConfig {
        LayoutConfig::try_from(LayoutOptions {
            extension: ".png".to_string(),
            channels: channels.iter().map(|c| c.to_string()).collect(),
            discovery,
            ..Default::default()
        })
        .unwrap()
    }

    fn catalog(names: &[&str]) -> AssetCatalog {
        AssetCatalog::from_entries(names.iter().map(|n| (*n, format!("/nonexistent/{}", n))))
    }

    #[test]
    fn test_resolve_lists_channels_in_column_order() {
        let cfg = config(&["blue", "green"], GroupDiscovery::FirstChannel);
        let cat = catalog(&["S1_green.png", "S1_blue.png"]);
        let record = GroupRecord::resolve("S1", &cfg, &cat).unwrap();
        assert_eq!(
            record.images,
            [
                ("blue".to_string(), "S1_blue.png".to_string()),
                ("green".to_string(), "S1_green.png".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_channel_is_fatal() {
        let cfg = config(&["blue", "green"], GroupDiscovery::FirstChannel);
        let cat = catalog(&["Sample1_blue.png", "Sample2_blue.png", "Sample2_green.png"]);
        let err = LayoutPlan::build(&cfg, &cat).unwrap_err();
        match err {
            Error::MissingAsset { group, channel, .. } => {
                assert_eq!(group, "Sample1");
                assert_eq!(channel, "green");
            },
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_no_groups_yields_empty_plan() {
        let cfg = config(&["blue"], GroupDiscovery::FirstChannel);
        let cat = catalog(&["Sample1_red.png", "README"]);
        let plan = LayoutPlan::build(&cfg, &cat).unwrap();
        assert!(plan.groups.is_empty());
        assert_eq!(plan.slide_count(), 0);
        assert_eq!(plan.cell, Extent::square(cfg.image_size()));
        assert_eq!(plan.canvas, canvas_extent(plan.cell, &cfg));
    }

    #[test]
    fn test_all_channels_skips_incomplete_groups() {
        let dir = tempfile::tempdir().unwrap();
        let mut cat = AssetCatalog::new();
        for name in ["S1_blue.png", "S2_blue.png", "S2_green.png"] {
            let path = dir.path().join(name);
            image::RgbImage::new(40, 20).save(&path).unwrap();
            cat.push(name, path);
        }

        let cfg = config(&["blue", "green"], GroupDiscovery::AllChannels);
        let plan = LayoutPlan::build(&cfg, &cat).unwrap();
        let keys: Vec<_> = plan.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["S2"]);
        assert_eq!(plan.cell.width, cfg.image_size());
        assert_eq!(plan.cell.height, cfg.image_size() / 2);
    }
}
