/// Assembly of a [`MutablePresentation`] into an OPC package.
///
/// Relationship layout:
///
/// - package: `officeDocument`, core and extended properties
/// - presentation: slide master (`rId1`), slides, then presProps, viewProps,
///   theme and tableStyles
/// - slide master: blank layout (`rId1`), theme (`rId2`)
/// - slide: blank layout (`rId1`), then one image relationship per picture
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, Part, Relationships};
use crate::ooxml::pptx::format::ImageFormat;
use crate::ooxml::pptx::template;
use chrono::Utc;

use super::pres::MutablePresentation;
use super::relmap::RelationshipMapper;
use super::slide::MutableSlide;

const PRESENTATION_PARTNAME: &str = "/ppt/presentation.xml";

/// Build the full package for `pres`, moving picture data into media parts.
pub(crate) fn build_package(pres: MutablePresentation) -> Result<OpcPackage> {
    let mut package = OpcPackage::new();

    package
        .rels_mut()
        .add(rt::OFFICE_DOCUMENT, &PRESENTATION_PARTNAME[1..]);
    package.rels_mut().add(rt::CORE_PROPERTIES, "docProps/core.xml");
    package
        .rels_mut()
        .add(rt::EXTENDED_PROPERTIES, "docProps/app.xml");

    // presentation relationships first, since presentation.xml refers to them
    let mut pres_rels = Relationships::new();
    pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    let slide_rel_ids: Vec<String> = (1..=pres.slide_count())
        .map(|n| pres_rels.add(rt::SLIDE, &format!("slides/slide{}.xml", n)))
        .collect();
    pres_rels.add(rt::PRES_PROPS, "presProps.xml");
    pres_rels.add(rt::VIEW_PROPS, "viewProps.xml");
    pres_rels.add(rt::THEME, "theme/theme1.xml");
    pres_rels.add(rt::TABLE_STYLES, "tableStyles.xml");

    let pres_xml = pres.generate_presentation_xml(&slide_rel_ids)?;
    package.add_part(
        Part::xml(PRESENTATION_PARTNAME, ct::PML_PRESENTATION_MAIN, pres_xml)?.with_rels(pres_rels),
    );

    let core = Part::xml(
        "/docProps/core.xml",
        ct::OPC_CORE_PROPERTIES,
        template::core_properties_xml(pres.title(), Utc::now()),
    )?;
    let app = Part::xml(
        "/docProps/app.xml",
        ct::OFC_EXTENDED_PROPERTIES,
        template::app_properties_xml(pres.slide_count()),
    )?;

    add_master_parts(&mut package)?;
    add_slide_parts(&mut package, pres)?;

    package.add_part(core);
    package.add_part(app);

    Ok(package)
}

fn add_master_parts(package: &mut OpcPackage) -> Result<()> {
    let mut master =
        Part::xml("/ppt/slideMasters/slideMaster1.xml", ct::PML_SLIDE_MASTER, template::SLIDE_MASTER_XML)?;
    master
        .rels_mut()
        .add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master.rels_mut().add(rt::THEME, "../theme/theme1.xml");
    package.add_part(master);

    let mut layout =
        Part::xml("/ppt/slideLayouts/slideLayout1.xml", ct::PML_SLIDE_LAYOUT, template::BLANK_LAYOUT_XML)?;
    layout
        .rels_mut()
        .add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    package.add_part(layout);

    package.add_part(Part::xml("/ppt/theme/theme1.xml", ct::OFC_THEME, template::THEME_XML)?);
    package.add_part(Part::xml("/ppt/presProps.xml", ct::PML_PRES_PROPS, template::PRES_PROPS_XML)?);
    package.add_part(Part::xml("/ppt/viewProps.xml", ct::PML_VIEW_PROPS, template::VIEW_PROPS_XML)?);
    package.add_part(Part::xml(
        "/ppt/tableStyles.xml",
        ct::PML_TABLE_STYLES,
        template::TABLE_STYLES_XML,
    )?);
    Ok(())
}

fn add_slide_parts(package: &mut OpcPackage, pres: MutablePresentation) -> Result<()> {
    let mut rel_mapper = RelationshipMapper::new();
    let mut slide_rels: Vec<Relationships> = (0..pres.slide_count())
        .map(|_| {
            let mut rels = Relationships::new();
            rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
            rels
        })
        .collect();

    // one media part per picture, numbered across the whole presentation
    let mut image_in_slide = vec![0usize; pres.slide_count()];
    for (media_index, (slide_index, format)) in pres.image_formats().into_iter().enumerate() {
        let r_id = slide_rels[slide_index].add(rt::IMAGE, &format!("../{}", media_path(media_index, format)));
        rel_mapper.add_image(slide_index, image_in_slide[slide_index], r_id);
        image_in_slide[slide_index] += 1;
    }

    let mut slide_parts = Vec::with_capacity(pres.slide_count());
    for (slide_index, (slide, rels)) in pres.slides.iter().zip(slide_rels).enumerate() {
        let xml = slide.to_xml_with_rels(slide_index, &rel_mapper)?;
        let partname = format!("/ppt/slides/slide{}.xml", slide_index + 1);
        slide_parts.push(Part::xml(&partname, ct::PML_SLIDE, xml)?.with_rels(rels));
    }

    // same traversal order as image_formats, so indices line up with the rels
    let images = pres.slides.into_iter().flat_map(MutableSlide::into_images);
    for (media_index, (data, format)) in images.enumerate() {
        package.add_part(Part::new(
            &format!("/ppt/{}", media_path(media_index, format)),
            format.mime_type(),
            data,
        )?);
    }

    for part in slide_parts {
        package.add_part(part);
    }
    Ok(())
}

fn media_path(media_index: usize, format: ImageFormat) -> String {
    format!("media/image{}.{}", media_index + 1, format.extension())
}
