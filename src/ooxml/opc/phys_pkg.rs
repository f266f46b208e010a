//! Physical (ZIP) container for OPC packages.

use crate::ooxml::error::Result;
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Physical package writer for creating OPC packages in memory.
pub struct PhysPkgWriter {
    /// The underlying ZIP archive writer
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a member with Deflate compression.
    pub fn write(&mut self, membername: &str, blob: &[u8]) -> Result<()> {
        self.write_with(membername, blob, CompressionMethod::Deflated)
    }

    /// Write a member without compression (stored). Used for media that is
    /// already compressed.
    pub fn write_stored(&mut self, membername: &str, blob: &[u8]) -> Result<()> {
        self.write_with(membername, blob, CompressionMethod::Stored)
    }

    fn write_with(&mut self, membername: &str, blob: &[u8], method: CompressionMethod) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(method);
        self.archive.start_file(membername, options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}
