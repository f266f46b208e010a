/// Presentation writer for PPTX.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::PackageWriter;
use std::fmt::Write as FmtWrite;
use std::io::Write;

use super::super::format::ImageFormat;
use super::package::build_package;
use super::slide::MutableSlide;

/// A mutable PowerPoint presentation for writing.
///
/// Provides methods to add slides and set the slide size shared by every
/// slide.
#[derive(Debug)]
pub struct MutablePresentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<MutableSlide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    /// Document title written to the core properties
    title: String,
}

impl MutablePresentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: 9144000,  // 10 inches
            slide_height: 6858000, // 7.5 inches
            title: String::from("Presentation"),
        }
    }

    /// Add a new blank slide to the presentation.
    pub fn add_slide(&mut self) -> Result<&mut MutableSlide> {
        let slide_id = (self.slides.len() + 256) as u32;
        self.slides.push(MutableSlide::new(slide_id));
        let last = self.slides.len() - 1;
        Ok(&mut self.slides[last])
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    /// The most recently added slide.
    pub fn last_slide_mut(&mut self) -> Option<&mut MutableSlide> {
        self.slides.last_mut()
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Set the slide size in EMUs. Both sides must be positive.
    pub fn set_slide_size(&mut self, width: i64, height: i64) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Err(OoxmlError::InvalidFormat(format!(
                "slide size must be positive, got {}x{}",
                width, height
            )));
        }
        self.slide_width = width;
        self.slide_height = height;
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the document title written to `docProps/core.xml`.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Formats of all pictures, tagged with their slide index, in
    /// presentation order.
    pub(crate) fn image_formats(&self) -> Vec<(usize, ImageFormat)> {
        self.slides
            .iter()
            .enumerate()
            .flat_map(|(slide_index, slide)| {
                slide.image_formats().map(move |format| (slide_index, format))
            })
            .collect()
    }

    /// Generate presentation.xml content.
    ///
    /// # Arguments
    /// * `slide_rel_ids` - Relationship IDs of the slides, in slide order
    pub(crate) fn generate_presentation_xml(&self, slide_rel_ids: &[String]) -> Result<String> {
        if slide_rel_ids.len() != self.slides.len() {
            return Err(OoxmlError::Xml(format!(
                "{} slide relationship IDs for {} slides",
                slide_rel_ids.len(),
                self.slides.len()
            )));
        }

        let mut xml = String::with_capacity(1024 + self.slides.len() * 48);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        // Slide master is always rId1
        xml.push_str("<p:sldMasterIdLst>");
        xml.push_str(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#);
        xml.push_str("</p:sldMasterIdLst>");

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }

    /// Serialize the presentation to `.pptx` bytes.
    ///
    /// Picture data moves into the package's media parts, so the
    /// presentation is consumed.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let package = build_package(self)?;
        PackageWriter::to_bytes(&package)
    }

    /// Serialize the presentation into `writer`.
    pub fn write_to<W: Write>(self, writer: W) -> Result<()> {
        let package = build_package(self)?;
        PackageWriter::write_to_stream(writer, &package)
    }
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new()
    }
}
