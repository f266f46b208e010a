/// Slide types and implementation for PPTX presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::writer::relmap::RelationshipMapper;

use super::super::format::ImageFormat;
use super::shape::MutableShape;

/// A mutable slide in a presentation. Every slide uses the blank layout.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique identifier within the presentation)
    pub(crate) slide_id: u32,
    /// Shapes on the slide in z-order
    pub(crate) shapes: Vec<MutableShape>,
}

impl MutableSlide {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    // IDs: 1 = shape tree group, 2+ = placed shapes
    fn next_shape_id(&self) -> u32 {
        (self.shapes.len() + 2) as u32
    }

    /// Add a text box to the slide and return it for further formatting.
    pub fn add_text_box(
        &mut self,
        text: &str,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> &mut MutableShape {
        let shape =
            MutableShape::new_text_box(self.next_shape_id(), text.to_string(), x, y, width, height);
        self.shapes.push(shape);
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    /// Add a picture to the slide from encoded image bytes.
    pub fn add_picture_from_bytes(
        &mut self,
        data: Vec<u8>,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: Option<String>,
    ) -> Result<()> {
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| OoxmlError::InvalidFormat("Unknown image format".to_string()))?;

        let desc = description.unwrap_or_else(|| "Picture".to_string());
        let shape = MutableShape::new_picture(
            self.next_shape_id(),
            data,
            format,
            x,
            y,
            width,
            height,
            desc,
        );
        self.shapes.push(shape);
        Ok(())
    }

    /// Number of shapes on the slide.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Shapes in z-order.
    pub fn shapes(&self) -> &[MutableShape] {
        &self.shapes
    }

    /// Formats of this slide's pictures in shape order.
    pub(crate) fn image_formats(&self) -> impl Iterator<Item = ImageFormat> + '_ {
        self.shapes.iter().filter_map(MutableShape::image_format)
    }

    /// Move this slide's encoded pictures out, in the same order as
    /// [`Self::image_formats`].
    pub(crate) fn into_images(self) -> impl Iterator<Item = (Vec<u8>, ImageFormat)> {
        self.shapes.into_iter().filter_map(MutableShape::into_image_data)
    }

    /// Generate slide XML content with image relationship IDs from the mapper.
    pub(crate) fn to_xml_with_rels(
        &self,
        slide_index: usize,
        rel_mapper: &RelationshipMapper,
    ) -> Result<String> {
        let mut xml = String::with_capacity(1024 + self.shapes.len() * 512);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        );
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        );
        xml.push_str(r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        let mut image_counter = 0;
        for shape in &self.shapes {
            let rel_id = if shape.image_format().is_some() {
                let rid = rel_mapper.get_image_id(slide_index, image_counter);
                if rid.is_none() {
                    return Err(OoxmlError::Xml(format!(
                        "no relationship for image {} on slide {}",
                        image_counter + 1,
                        slide_index + 1
                    )));
                }
                image_counter += 1;
                rid
            } else {
                None
            };
            shape.to_xml(&mut xml, rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_shape_ids_start_after_group() {
        let mut slide = MutableSlide::new(256);
        let label_id = slide.add_text_box("S1", 0, 0, 10, 10).shape_id();
        slide
            .add_picture_from_bytes(PNG_MAGIC.to_vec(), 0, 10, 10, 10, None)
            .unwrap();
        assert_eq!(label_id, 2);
        assert_eq!(slide.shapes()[1].shape_id(), 3);
        assert_eq!(slide.image_formats().collect::<Vec<_>>(), [ImageFormat::Png]);

        let images: Vec<_> = slide.into_images().collect();
        assert_eq!(images, [(PNG_MAGIC.to_vec(), ImageFormat::Png)]);
    }

    #[test]
    fn test_rejects_unknown_image_bytes() {
        let mut slide = MutableSlide::new(256);
        let err = slide
            .add_picture_from_bytes(b"not an image".to_vec(), 0, 0, 1, 1, None)
            .unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidFormat(_)));
        assert_eq!(slide.shape_count(), 0);
    }

    #[test]
    fn test_slide_xml_references_mapped_images() {
        let mut slide = MutableSlide::new(256);
        slide.add_text_box("S1", 0, 0, 10, 10);
        slide
            .add_picture_from_bytes(PNG_MAGIC.to_vec(), 0, 10, 10, 10, None)
            .unwrap();
        slide
            .add_picture_from_bytes(PNG_MAGIC.to_vec(), 20, 10, 10, 10, None)
            .unwrap();

        let mut mapper = RelationshipMapper::new();
        mapper.add_image(0, 0, "rId2".to_string());
        mapper.add_image(0, 1, "rId3".to_string());

        let xml = slide.to_xml_with_rels(0, &mapper).unwrap();
        let first = xml.find(r#"r:embed="rId2""#).unwrap();
        let second = xml.find(r#"r:embed="rId3""#).unwrap();
        assert!(first < second);
        assert!(xml.ends_with("</p:sld>"));
    }

    #[test]
    fn test_slide_xml_requires_image_mapping() {
        let mut slide = MutableSlide::new(256);
        slide
            .add_picture_from_bytes(PNG_MAGIC.to_vec(), 0, 0, 1, 1, None)
            .unwrap();
        assert!(slide.to_xml_with_rels(0, &RelationshipMapper::new()).is_err());
    }
}
