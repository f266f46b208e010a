//! Layout configuration.
//!
//! [`LayoutOptions`] is what a user writes: lengths as floating point values
//! in a [`LengthUnit`], loadable from YAML. [`LayoutConfig`] is the validated,
//! immutable form in EMUs that the planner and placer receive.
//!
//! # Example
//!
//! ```
//! use images2pptx::config::{LayoutConfig, LayoutOptions};
//!
//! let options = LayoutOptions::from_yaml_str(
//!     "extension: .png\nchannels: blue green red\nimages_per_slide: 2\n",
//! )?;
//! let config = LayoutConfig::try_from(options)?;
//! assert_eq!(config.channels(), ["blue", "green", "red"]);
//! assert_eq!(config.images_per_slide(), 2);
//! # Ok::<(), images2pptx::Error>(())
//! ```

use crate::common::unit::{EMUS_PER_CM, LengthUnit, MAX_SLIDE_EMU};
use crate::layout::naming::GroupDiscovery;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::Path;

/// Default pixel density assumed for images.
pub const DEFAULT_DPI: u32 = 72;

/// Upper bound on rows per slide. Together with lengths capped at the
/// largest slide side this keeps every canvas computation within `i64`.
pub const MAX_IMAGES_PER_SLIDE: usize = 1024;

/// User-facing layout options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutOptions {
    /// File extension including the dot, e.g. `.png`
    pub extension: String,
    /// Ordered channel identifiers; fixes column order. Accepts a YAML list or
    /// a whitespace-separated string.
    #[serde(deserialize_with = "deserialize_channels")]
    pub channels: Vec<String>,
    /// Unit for every length below
    pub unit: LengthUnit,
    /// Longest side of every placed image
    pub image_size: f64,
    /// Horizontal gap between columns
    pub spacing: f64,
    /// Slide margin on all four sides
    pub margin: f64,
    /// Group rows per slide
    pub images_per_slide: usize,
    /// Height (and width) of the label box above each row; 1 cm when unset
    pub label_height: Option<f64>,
    /// Label font size in points
    pub label_font_size: Option<f64>,
    /// Pixel density for the pixel to length conversion
    pub dpi: u32,
    /// How groups are discovered from file names
    pub discovery: GroupDiscovery,
    /// Document title; the writer's default is kept when unset
    pub title: Option<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            extension: String::new(),
            channels: Vec::new(),
            unit: LengthUnit::Centimeter,
            image_size: 6.0,
            spacing: 0.2,
            margin: 3.0,
            images_per_slide: 3,
            label_height: None,
            label_font_size: None,
            dpi: DEFAULT_DPI,
            discovery: GroupDiscovery::FirstChannel,
            title: None,
        }
    }
}

impl LayoutOptions {
    /// Parse options from a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    /// Read and parse a YAML options file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Replace the channel list with the tokens of a whitespace-separated string.
    pub fn set_channels_str(&mut self, channels: &str) {
        self.channels = parse_channel_list(channels);
    }
}

/// Split a whitespace-separated channel list into tokens.
///
/// Runs of whitespace count as one separator, so `"blue  green"` yields two
/// channels rather than an empty one in between.
pub fn parse_channel_list(channels: &str) -> Vec<String> {
    channels.split_whitespace().map(str::to_string).collect()
}

fn deserialize_channels<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChannelList {
        List(Vec<String>),
        Words(String),
    }

    Ok(match ChannelList::deserialize(deserializer)? {
        ChannelList::List(list) => list,
        ChannelList::Words(words) => parse_channel_list(&words),
    })
}

/// Validated layout configuration. All lengths are in EMUs.
///
/// Immutable for the duration of one generation run and passed explicitly to
/// every layout stage.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    extension: String,
    channels: Vec<String>,
    image_size: i64,
    spacing: i64,
    margin: i64,
    label_height: i64,
    images_per_slide: usize,
    label_font_size: Option<f64>,
    dpi: u32,
    discovery: GroupDiscovery,
    title: Option<String>,
}

impl LayoutConfig {
    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[inline]
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// The channel that drives group discovery.
    #[inline]
    pub fn first_channel(&self) -> &str {
        // Validation guarantees at least one channel
        &self.channels[0]
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn image_size(&self) -> i64 {
        self.image_size
    }

    #[inline]
    pub fn spacing(&self) -> i64 {
        self.spacing
    }

    #[inline]
    pub fn margin(&self) -> i64 {
        self.margin
    }

    #[inline]
    pub fn label_height(&self) -> i64 {
        self.label_height
    }

    #[inline]
    pub fn images_per_slide(&self) -> usize {
        self.images_per_slide
    }

    #[inline]
    pub fn label_font_size(&self) -> Option<f64> {
        self.label_font_size
    }

    #[inline]
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[inline]
    pub fn discovery(&self) -> GroupDiscovery {
        self.discovery
    }
}

impl TryFrom<LayoutOptions> for LayoutConfig {
    type Error = Error;

    fn try_from(options: LayoutOptions) -> Result<Self> {
        if options.extension.is_empty() {
            return Err(Error::config("extension must not be empty"));
        }
        if options.channels.is_empty() {
            return Err(Error::config("at least one channel is required"));
        }
        let mut seen = HashSet::with_capacity(options.channels.len());
        for channel in &options.channels {
            if channel.trim().is_empty() {
                return Err(Error::config("channel names must not be empty"));
            }
            if !seen.insert(channel.as_str()) {
                return Err(Error::config(format!("duplicate channel '{}'", channel)));
            }
        }
        if options.images_per_slide == 0 {
            return Err(Error::config("images_per_slide must be at least 1"));
        }
        if options.images_per_slide > MAX_IMAGES_PER_SLIDE {
            return Err(Error::config(format!(
                "images_per_slide must be at most {}, got {}",
                MAX_IMAGES_PER_SLIDE, options.images_per_slide
            )));
        }
        if options.dpi == 0 {
            return Err(Error::config("dpi must be at least 1"));
        }

        let unit = options.unit;
        let image_size = positive_length("image_size", options.image_size, unit)?;
        let spacing = positive_length("spacing", options.spacing, unit)?;
        let margin = positive_length("margin", options.margin, unit)?;
        let label_height = match options.label_height {
            Some(value) => positive_length("label_height", value, unit)?,
            None => EMUS_PER_CM,
        };

        if let Some(size) = options.label_font_size
            && !(size.is_finite() && size > 0.0)
        {
            return Err(Error::config(format!(
                "label_font_size must be a positive number, got {}",
                size
            )));
        }

        Ok(Self {
            extension: options.extension,
            channels: options.channels,
            image_size,
            spacing,
            margin,
            label_height,
            images_per_slide: options.images_per_slide,
            label_font_size: options.label_font_size,
            dpi: options.dpi,
            discovery: options.discovery,
            title: options.title,
        })
    }
}

fn positive_length(name: &str, value: f64, unit: LengthUnit) -> Result<i64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::config(format!(
            "{} must be greater than zero, got {}{}",
            name, value, unit
        )));
    }
    let emu = unit.to_emu(value);
    if emu <= 0 {
        return Err(Error::config(format!(
            "{} of {}{} is below one EMU",
            name, value, unit
        )));
    }
    // nothing longer than a slide side can be laid out
    if emu > MAX_SLIDE_EMU {
        return Err(Error::config(format!(
            "{} of {}{} exceeds the largest slide side ({} EMU)",
            name, value, unit, MAX_SLIDE_EMU
        )));
    }
    Ok(emu)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> LayoutOptions {
        LayoutOptions {
            extension: ".png".to_string(),
            channels: vec!["blue".to_string(), "green".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_convert_to_emu() {
        let config = LayoutConfig::try_from(options()).unwrap();
        assert_eq!(config.image_size(), 2_160_000);
        assert_eq!(config.spacing(), 72_000);
        assert_eq!(config.margin(), 1_080_000);
        assert_eq!(config.label_height(), EMUS_PER_CM);
        assert_eq!(config.images_per_slide(), 3);
        assert_eq!(config.first_channel(), "blue");
        assert_eq!(config.discovery(), GroupDiscovery::FirstChannel);
    }

    #[test]
    fn test_empty_channels_rejected() {
        let mut opts = options();
        opts.channels.clear();
        let err = LayoutConfig::try_from(opts).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_duplicate_channel_rejected() {
        let mut opts = options();
        opts.channels.push("blue".to_string());
        assert!(matches!(
            LayoutConfig::try_from(opts),
            Err(Error::Configuration(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn test_non_positive_lengths_rejected() {
        for field in ["image_size", "spacing", "margin"] {
            for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
                let mut opts = options();
                match field {
                    "image_size" => opts.image_size = bad,
                    "spacing" => opts.spacing = bad,
                    _ => opts.margin = bad,
                }
                assert!(
                    matches!(LayoutConfig::try_from(opts), Err(Error::Configuration(_))),
                    "{} = {} should be rejected",
                    field,
                    bad
                );
            }
        }
    }

    #[test]
    fn test_zero_images_per_slide_rejected() {
        let mut opts = options();
        opts.images_per_slide = 0;
        assert!(matches!(
            LayoutConfig::try_from(opts),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_oversized_lengths_rejected() {
        for field in ["image_size", "spacing", "margin", "label_height"] {
            let mut opts = options();
            match field {
                "image_size" => opts.image_size = 1e13,
                "spacing" => opts.spacing = 1e13,
                "margin" => opts.margin = 1e13,
                _ => opts.label_height = Some(1e13),
            }
            assert!(
                matches!(LayoutConfig::try_from(opts), Err(Error::Configuration(_))),
                "{} = 1e13 cm should be rejected",
                field
            );
        }

        // exactly the largest slide side is still accepted
        let mut opts = options();
        opts.unit = LengthUnit::Inch;
        opts.image_size = 56.0;
        assert_eq!(LayoutConfig::try_from(opts).unwrap().image_size(), MAX_SLIDE_EMU);
    }

    #[test]
    fn test_too_many_images_per_slide_rejected() {
        for per_slide in [MAX_IMAGES_PER_SLIDE + 1, usize::MAX] {
            let mut opts = options();
            opts.images_per_slide = per_slide;
            assert!(matches!(
                LayoutConfig::try_from(opts),
                Err(Error::Configuration(msg)) if msg.contains("images_per_slide")
            ));
        }
        let mut opts = options();
        opts.images_per_slide = MAX_IMAGES_PER_SLIDE;
        assert!(LayoutConfig::try_from(opts).is_ok());
    }

    #[test]
    fn test_empty_extension_rejected() {
        let mut opts = options();
        opts.extension.clear();
        assert!(LayoutConfig::try_from(opts).is_err());
    }

    #[test]
    fn test_label_height_uses_unit() {
        let mut opts = options();
        opts.unit = LengthUnit::Millimeter;
        opts.label_height = Some(5.0);
        let config = LayoutConfig::try_from(opts).unwrap();
        assert_eq!(config.label_height(), EMUS_PER_CM / 2);
    }

    #[test]
    fn test_channel_string_splits_on_whitespace() {
        let mut opts = options();
        opts.set_channels_str("blue-DAPI  green-ACTIN red-WGA\tMERGE");
        assert_eq!(
            opts.channels,
            ["blue-DAPI", "green-ACTIN", "red-WGA", "MERGE"]
        );
    }

    #[test]
    fn test_yaml_channel_list_forms() {
        let words = LayoutOptions::from_yaml_str("extension: .tif\nchannels: 5x 10x 20x\n").unwrap();
        assert_eq!(words.channels, ["5x", "10x", "20x"]);

        let list =
            LayoutOptions::from_yaml_str("extension: .tif\nchannels: [Rep1, Rep2]\n").unwrap();
        assert_eq!(list.channels, ["Rep1", "Rep2"]);
    }

    #[test]
    fn test_yaml_overrides_and_defaults() {
        let opts = LayoutOptions::from_yaml_str(
            "extension: .jpg\nchannels: a b\nunit: in\nimage_size: 2\ndiscovery: all-channels\n",
        )
        .unwrap();
        assert_eq!(opts.unit, LengthUnit::Inch);
        assert_eq!(opts.images_per_slide, 3);
        assert_eq!(opts.discovery, GroupDiscovery::AllChannels);
        let config = LayoutConfig::try_from(opts).unwrap();
        assert_eq!(config.image_size(), 2 * 914_400);
        assert_eq!(config.title(), None);
    }

    #[test]
    fn test_yaml_title() {
        let opts =
            LayoutOptions::from_yaml_str("extension: .png
channels: dapi
title: Cortex panel
")
                .unwrap();
        let config = LayoutConfig::try_from(opts).unwrap();
        assert_eq!(config.title(), Some("Cortex panel"));
    }

    #[test]
    fn test_yaml_unknown_key_is_parse_error() {
        let err = LayoutOptions::from_yaml_str("extension: .png\ncolumns: 3\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
