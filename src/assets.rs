//! Uploaded image files and their lazily read contents.
//!
//! [`AssetCatalog`] is the flat, ordered list of `(file name, path)` pairs the
//! layout works from. Lookups are by exact file name; when a name occurs more
//! than once the first entry wins. [`ImageAsset`] is one opened image: its
//! bytes and intrinsic dimensions, read on demand and dropped once placed.

use crate::common::unit::px_to_emu;
use crate::layout::geometry::Extent;
use crate::ooxml::pptx::ImageFormat;
use crate::{Error, Result};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    /// Name used for grouping and lookup
    pub file_name: String,
    /// Where the bytes live
    pub path: PathBuf,
}

/// Ordered set of uploaded files addressable by exact file name.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    entries: Vec<AssetEntry>,
    by_name: HashMap<String, usize>,
}

impl AssetCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(file name, path)` pairs, keeping their order.
    pub fn from_entries<I, N, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<PathBuf>,
    {
        let mut catalog = Self::new();
        for (name, path) in entries {
            catalog.push(name, path);
        }
        catalog
    }

    /// Build a catalog from file paths; each file is known by its final
    /// path component.
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut catalog = Self::new();
        for path in paths {
            let path = path.into();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    Error::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("'{}' has no file name", path.display()),
                    ))
                })?;
            catalog.push(name, path);
        }
        Ok(catalog)
    }

    /// Build a catalog from the regular files directly inside `dir`, sorted by
    /// file name so runs over the same folder are reproducible.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut catalog = Self::new();
        for entry in WalkDir::new(dir.as_ref())
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                Error::Io(
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                )
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            catalog.push(name, entry.into_path());
        }
        Ok(catalog)
    }

    /// Append one file. A repeated name is kept in the listing but lookups
    /// still resolve to the first occurrence.
    pub fn push(&mut self, file_name: impl Into<String>, path: impl Into<PathBuf>) {
        let file_name = file_name.into();
        let index = self.entries.len();
        self.by_name.entry(file_name.clone()).or_insert(index);
        self.entries.push(AssetEntry {
            file_name,
            path: path.into(),
        });
    }

    /// File names in upload order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.file_name.as_str())
    }

    /// Look up an entry by exact file name.
    pub fn get(&self, file_name: &str) -> Option<&AssetEntry> {
        self.by_name.get(file_name).map(|&i| &self.entries[i])
    }

    #[inline]
    pub fn contains(&self, file_name: &str) -> bool {
        self.by_name.contains_key(file_name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An opened image: its bytes and intrinsic size.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    file_name: String,
    data: Vec<u8>,
    format: ImageFormat,
    width_px: u32,
    height_px: u32,
    dpi: u32,
}

impl ImageAsset {
    /// Read a catalog entry from disk and decode its dimensions.
    pub fn open(entry: &AssetEntry, dpi: u32) -> Result<Self> {
        let data = std::fs::read(&entry.path)?;
        Self::from_bytes(entry.file_name.clone(), data, dpi)
    }

    /// Decode the dimensions of an in-memory image. Only the header is parsed.
    pub fn from_bytes(file_name: impl Into<String>, data: Vec<u8>, dpi: u32) -> Result<Self> {
        let file_name = file_name.into();
        let format = ImageFormat::detect_from_bytes(&data).ok_or_else(|| Error::InvalidImage {
            file_name: file_name.clone(),
            reason: "unrecognized image format".to_string(),
        })?;
        let (width_px, height_px) =
            image::ImageReader::with_format(Cursor::new(data.as_slice()), format.codec())
                .into_dimensions()
                .map_err(|e| Error::InvalidImage {
                    file_name: file_name.clone(),
                    reason: e.to_string(),
                })?;
        if width_px == 0 || height_px == 0 {
            return Err(Error::InvalidImage {
                file_name,
                reason: format!("degenerate size {}x{}", width_px, height_px),
            });
        }
        Ok(Self {
            file_name,
            data,
            format,
            width_px,
            height_px,
            dpi,
        })
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Pixel dimensions as `(width, height)`.
    #[inline]
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Native size in EMUs at the configured DPI.
    pub fn intrinsic_extent(&self) -> Extent {
        Extent::new(
            px_to_emu(self.width_px, self.dpi),
            px_to_emu(self.height_px, self.dpi),
        )
    }

    /// Give up the encoded bytes, consuming the asset.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
