/// Shape types and XML serialization for PPTX slides.
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

pub use super::super::format::{ImageFormat, TextFormat};

/// A shape on a slide: a text box or a picture.
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID, unique within its slide
    pub(crate) shape_id: u32,
    pub(crate) shape_type: ShapeType,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    TextBox {
        text: String,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        format: TextFormat,
    },
    Picture {
        data: Vec<u8>,
        format: ImageFormat,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: String,
    },
}

impl MutableShape {
    pub(crate) fn new_text_box(
        shape_id: u32,
        text: String,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::TextBox {
                text,
                x,
                y,
                width,
                height,
                format: TextFormat::default(),
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_picture(
        shape_id: u32,
        data: Vec<u8>,
        format: ImageFormat,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: String,
    ) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Picture {
                data,
                format,
                x,
                y,
                width,
                height,
                description,
            },
        }
    }

    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Builder method: set font size in points (text boxes only).
    pub fn font_size(&mut self, size: f64) -> &mut Self {
        if let ShapeType::TextBox {
            format: ref mut f, ..
        } = self.shape_type
        {
            f.size = Some(size);
        }
        self
    }

    /// Text of a text box.
    pub fn text(&self) -> Option<&str> {
        match &self.shape_type {
            ShapeType::TextBox { text, .. } => Some(text),
            ShapeType::Picture { .. } => None,
        }
    }

    /// Image format if this shape is a picture.
    pub(crate) fn image_format(&self) -> Option<ImageFormat> {
        match &self.shape_type {
            ShapeType::Picture { format, .. } => Some(*format),
            ShapeType::TextBox { .. } => None,
        }
    }

    /// Take the encoded image out of a picture, consuming the shape.
    pub(crate) fn into_image_data(self) -> Option<(Vec<u8>, ImageFormat)> {
        match self.shape_type {
            ShapeType::Picture { data, format, .. } => Some((data, format)),
            ShapeType::TextBox { .. } => None,
        }
    }

    /// Append this shape's `p:sp` or `p:pic` element to `xml`.
    ///
    /// `rel_id` is the slide-level relationship of a picture's media part and
    /// is ignored for text boxes.
    pub(crate) fn to_xml(&self, xml: &mut String, rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::TextBox {
                text,
                x,
                y,
                width,
                height,
                format,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, *x, *y, *width, *height)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("<a:noFill/>");
                xml.push_str("</p:spPr>");

                // labels never wrap; the box grows to fit its text
                xml.push_str("<p:txBody>");
                xml.push_str(r#"<a:bodyPr wrap="none" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#);
                xml.push_str("<a:lstStyle/>");
                xml.push_str("<a:p>");
                xml.push_str("<a:r>");
                xml.push_str(r#"<a:rPr lang="en-US" dirty="0""#);
                if let Some(size) = format.size {
                    write!(xml, r#" sz="{}""#, (size * 100.0).round() as u32)?;
                }
                xml.push_str("/>");
                write!(xml, "<a:t>{}</a:t>", escape_xml(text))?;
                xml.push_str("</a:r>");
                xml.push_str("</a:p>");
                xml.push_str("</p:txBody>");
                xml.push_str("</p:sp>");
            },
            ShapeType::Picture {
                x,
                y,
                width,
                height,
                description,
                ..
            } => {
                xml.push_str("<p:pic>");
                xml.push_str("<p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
                    self.shape_id,
                    self.shape_id - 1,
                    escape_xml(description)
                )?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                let rid = rel_id.unwrap_or("rIdImagePlaceholder");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, rid)?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
                xml.push_str("</p:blipFill>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, *x, *y, *width, *height)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr>");
                xml.push_str("</p:pic>");
            },
        }

        Ok(())
    }
}

fn write_xfrm(xml: &mut String, x: i64, y: i64, width: i64, height: i64) -> Result<()> {
    xml.push_str("<a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, x, y)?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, width, height)?;
    xml.push_str("</a:xfrm>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_box_xml() {
        let mut shape = MutableShape::new_text_box(2, "A&B".to_string(), 10, 20, 30, 40);
        shape.font_size(14.0);
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        assert!(xml.starts_with("<p:sp>"));
        assert!(xml.contains(r#"<a:off x="10" y="20"/>"#));
        assert!(xml.contains(r#"<a:ext cx="30" cy="40"/>"#));
        assert!(xml.contains(r#"wrap="none""#));
        assert!(xml.contains(r#"sz="1400""#));
        assert!(xml.contains("<a:t>A&amp;B</a:t>"));
    }

    #[test]
    fn test_text_box_without_font_size() {
        let shape = MutableShape::new_text_box(2, "x".to_string(), 0, 0, 1, 1);
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(!xml.contains("sz="));
    }

    #[test]
    fn test_picture_xml_uses_rel_id() {
        let shape = MutableShape::new_picture(
            3,
            vec![1, 2, 3],
            ImageFormat::Png,
            100,
            200,
            300,
            400,
            "S1_blue.png".to_string(),
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();

        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains(r#"descr="S1_blue.png""#));
        assert!(xml.contains(r#"<a:off x="100" y="200"/>"#));
        assert!(xml.contains(r#"<a:ext cx="300" cy="400"/>"#));
        assert_eq!(shape.image_format(), Some(ImageFormat::Png));
        assert_eq!(shape.text(), None);
        assert_eq!(shape.into_image_data(), Some((vec![1, 2, 3], ImageFormat::Png)));
    }

    #[test]
    fn test_text_box_has_no_image() {
        let shape = MutableShape::new_text_box(2, "S1".to_string(), 0, 0, 1, 1);
        assert_eq!(shape.image_format(), None);
        assert_eq!(shape.into_image_data(), None);
    }
}
