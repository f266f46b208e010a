//! Package writer for OPC packages.
//!
//! Serializes an [`OpcPackage`] into a ZIP container: `[Content_Types].xml`,
//! `_rels/.rels`, then every part followed by its relationships.

use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use crate::common::xml::escape_xml;
use std::collections::HashMap;

const CONTENT_TYPES_MEMBER: &str = "[Content_Types].xml";
const PACKAGE_RELS_MEMBER: &str = "_rels/.rels";

/// Package writer that serializes an OPC package to a ZIP file.
///
/// # Example
///
/// ```
/// use images2pptx::ooxml::opc::{OpcPackage, Part};
/// use images2pptx::ooxml::opc::pkgwriter::PackageWriter;
///
/// let mut pkg = OpcPackage::new();
/// pkg.add_part(Part::xml("/docProps/app.xml", "application/xml", "<Properties/>")?);
/// let bytes = PackageWriter::to_bytes(&pkg)?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), images2pptx::ooxml::OoxmlError>(())
/// ```
pub struct PackageWriter;

impl PackageWriter {
    /// Write an OPC package to a stream.
    pub fn write_to_stream<W: std::io::Write>(mut writer: W, package: &OpcPackage) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Serialize an OPC package to bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut phys_writer = PhysPkgWriter::new();

        let cti = ContentTypesItem::from_package(package);
        phys_writer.write(CONTENT_TYPES_MEMBER, cti.to_xml().as_bytes())?;

        phys_writer.write(PACKAGE_RELS_MEMBER, package.rels().to_xml().as_bytes())?;

        Self::write_parts(&mut phys_writer, package)?;

        phys_writer.finish()
    }

    /// Write all parts and their relationships.
    fn write_parts(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        for part in package.iter_parts() {
            // already-compressed media gains nothing from deflate
            if matches!(part.content_type(), ct::PNG | ct::JPEG | ct::GIF) {
                phys_writer.write_stored(part.membername(), part.blob())?;
            } else {
                phys_writer.write(part.membername(), part.blob())?;
            }

            if !part.rels().is_empty() {
                let rels_xml = part.rels().to_xml();
                phys_writer.write(&part.rels_membername(), rels_xml.as_bytes())?;
            }
        }
        Ok(())
    }
}

/// Helper for building `[Content_Types].xml` content.
///
/// Manages Default and Override elements for content type mapping.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: HashMap<String, String>,

    /// Override content types by partname
    overrides: HashMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }

    /// Build ContentTypesItem from an OPC package.
    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.ext(), part.content_type());
        }
        cti
    }

    /// Use a default mapping if the extension matches a well-known type,
    /// otherwise an override for the specific partname.
    fn add_content_type(&mut self, partname: &str, ext: &str, content_type: &str) {
        if Self::is_default_content_type(ext, content_type) {
            self.defaults
                .insert(ext.to_string(), content_type.to_string());
        } else {
            self.overrides
                .insert(partname.to_string(), content_type.to_string());
        }
    }

    fn is_default_content_type(ext: &str, content_type: &str) -> bool {
        matches!(
            (ext, content_type),
            ("rels", ct::OPC_RELATIONSHIPS)
                | ("xml", ct::XML)
                | ("png", ct::PNG)
                | ("jpg", ct::JPEG)
                | ("jpeg", ct::JPEG)
                | ("gif", ct::GIF)
                | ("bmp", ct::BMP)
                | ("tif", ct::TIFF)
                | ("tiff", ct::TIFF)
        )
    }

    /// Generate the XML for `[Content_Types].xml`.
    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES));

        let mut exts: Vec<_> = self.defaults.keys().collect();
        exts.sort();
        for ext in exts {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(&self.defaults[ext])
            ));
        }

        let mut partnames: Vec<_> = self.overrides.keys().collect();
        partnames.sort();
        for partname in partnames {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(&self.overrides[partname])
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;
    use crate::ooxml::opc::part::Part;
    use std::io::{Cursor, Read};

    #[test]
    fn test_content_types_xml() {
        let mut cti = ContentTypesItem::new();
        cti.add_content_type("/ppt/media/image1.png", "png", ct::PNG);
        cti.add_content_type("/ppt/slides/slide1.xml", "xml", ct::PML_SLIDE);

        let xml = cti.to_xml();
        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"<Override PartName="/ppt/slides/slide1.xml""#));
        assert!(!xml.contains(r#"PartName="/ppt/media/image1.png""#));
    }

    #[test]
    fn test_package_members() {
        let mut pkg = OpcPackage::new();
        pkg.rels_mut().add(rt::OFFICE_DOCUMENT, "ppt/presentation.xml");
        let mut slide = Part::xml("/ppt/slides/slide1.xml", ct::PML_SLIDE, "<p:sld/>").unwrap();
        slide.rels_mut().add(rt::IMAGE, "../media/image1.png");
        pkg.add_part(slide);
        pkg.add_part(Part::new("/ppt/media/image1.png", ct::PNG, vec![0x89, b'P']).unwrap());

        let bytes = PackageWriter::to_bytes(&pkg).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            [
                "[Content_Types].xml",
                "_rels/.rels",
                "ppt/media/image1.png",
                "ppt/slides/_rels/slide1.xml.rels",
                "ppt/slides/slide1.xml",
            ]
        );

        let mut rels = String::new();
        archive
            .by_name("ppt/slides/_rels/slide1.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains(r#"Target="../media/image1.png""#));
    }
}
