//! File name convention: `<group>_<channel><extension>`.
//!
//! A file belongs to a channel when its name ends with exactly
//! `_<channel><extension>`; whatever precedes that suffix is the group key and
//! must be identical across all channel variants of one sample. Groups are discovered from the first
//! channel only: a group without an image for that channel never becomes a
//! row, even if every other channel is present.

use serde::Deserialize;
use std::collections::HashSet;

/// How group keys are discovered from the uploaded file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupDiscovery {
    /// Every file carrying the first channel's suffix starts a group. A group
    /// that lacks a later channel fails the run with a missing asset error.
    #[default]
    FirstChannel,
    /// Only groups with a file for every channel are kept; incomplete ones
    /// are skipped.
    AllChannels,
}

/// Strip `_<channel><extension>` from the end of `file_name`.
///
/// Returns the group key, or `None` if the name doesn't end with that suffix.
///
/// ```
/// use images2pptx::layout::naming::group_key;
/// assert_eq!(group_key("Sample1_blue-DAPI.tif", "blue-DAPI", ".tif"), Some("Sample1"));
/// assert_eq!(group_key("Sample1_red.tif", "blue", ".tif"), None);
/// ```
pub fn group_key<'a>(file_name: &'a str, channel: &str, extension: &str) -> Option<&'a str> {
    file_name
        .strip_suffix(extension)?
        .strip_suffix(channel)?
        .strip_suffix('_')
}

/// The file name expected for `group` in `channel`.
#[inline]
pub fn channel_file_name(group: &str, channel: &str, extension: &str) -> String {
    let mut name = String::with_capacity(group.len() + channel.len() + extension.len() + 1);
    name.push_str(group);
    name.push('_');
    name.push_str(channel);
    name.push_str(extension);
    name
}

/// Collect the group keys that have an image for `channel`, in the order
/// their files appear, without duplicates.
pub fn discover_groups<'a, I>(file_names: I, channel: &str, extension: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    file_names
        .into_iter()
        .filter_map(|name| group_key(name, channel, extension))
        .filter(|key| seen.insert(*key))
        .map(str::to_string)
        .collect()
}
