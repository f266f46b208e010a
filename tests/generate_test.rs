//! End-to-end generation tests: image folders in, `.pptx` packages out.

use images2pptx::{AssetCatalog, Error, LayoutConfig, LayoutOptions, generate_to_path};
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 200]))
        .save(dir.join(name))
        .unwrap();
}

fn config(channels: &str, per_slide: usize) -> LayoutConfig {
    let mut options = LayoutOptions {
        extension: ".png".to_string(),
        images_per_slide: per_slide,
        ..Default::default()
    };
    options.set_channels_str(channels);
    LayoutConfig::try_from(options).unwrap()
}

fn open(path: &Path) -> ZipArchive<Cursor<Vec<u8>>> {
    ZipArchive::new(Cursor::new(std::fs::read(path).unwrap())).unwrap()
}

fn read_member(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

fn slide_names(archive: &ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

#[test]
fn test_one_group_per_slide() {
    let images = tempfile::tempdir().unwrap();
    write_png(images.path(), "Sample1_blue.png", 64, 64);
    write_png(images.path(), "Sample1_green.png", 32, 64);
    write_png(images.path(), "Sample2_blue.png", 64, 64);
    write_png(images.path(), "Sample2_green.png", 64, 64);
    // not a first-channel file and not part of any group
    write_png(images.path(), "Sample3_green.png", 64, 64);

    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("grid.pptx");
    let catalog = AssetCatalog::from_dir(images.path()).unwrap();
    let summary = generate_to_path(&config("blue green", 1), &catalog, &out).unwrap();

    assert_eq!(summary.groups, 2);
    assert_eq!(summary.slides, 2);

    let mut archive = open(&out);
    assert_eq!(
        slide_names(&archive),
        ["ppt/slides/slide1.xml", "ppt/slides/slide2.xml"]
    );

    for (slide, label) in [("ppt/slides/slide1.xml", "Sample1"), ("ppt/slides/slide2.xml", "Sample2")] {
        let xml = read_member(&mut archive, slide);
        assert_eq!(xml.matches("<p:sp>").count(), 1);
        assert_eq!(xml.matches("<p:pic>").count(), 2);
        assert!(xml.contains(&format!("<a:t>{}</a:t>", label)));
    }

    // 6 cm default image size, the tall green image is half as wide
    let slide1 = read_member(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide1.contains(r#"<a:ext cx="2160000" cy="2160000"/>"#));
    assert!(slide1.contains(r#"<a:ext cx="1080000" cy="2160000"/>"#));

    // 2 * 6 cm + 0.2 cm + 2 * 3 cm wide, 6 cm + 1 cm + 2 * 3 cm high
    let presentation = read_member(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains(r#"<p:sldSz cx="6552000" cy="4680000"/>"#));

    let content_types = read_member(&mut archive, "[Content_Types].xml");
    assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    assert!(content_types.contains(r#"PartName="/ppt/slides/slide2.xml""#));

    let app = read_member(&mut archive, "docProps/app.xml");
    assert!(app.contains("<Slides>2</Slides>"));
}

#[test]
fn test_missing_channel_aborts_without_output() {
    let images = tempfile::tempdir().unwrap();
    write_png(images.path(), "Sample1_blue.png", 10, 10);
    write_png(images.path(), "Sample2_blue.png", 10, 10);
    write_png(images.path(), "Sample2_green.png", 10, 10);

    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("grid.pptx");
    let catalog = AssetCatalog::from_dir(images.path()).unwrap();
    let err = generate_to_path(&config("blue green", 3), &catalog, &out).unwrap_err();

    match err {
        Error::MissingAsset {
            group,
            channel,
            file_name,
        } => {
            assert_eq!(group, "Sample1");
            assert_eq!(channel, "green");
            assert_eq!(file_name, "Sample1_green.png");
        },
        other => panic!("unexpected error: {}", other),
    }
    assert!(!out.exists());
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_rows_split_across_slides() {
    let images = tempfile::tempdir().unwrap();
    for i in 1..=7 {
        write_png(images.path(), &format!("G{}_dapi.png", i), 20, 10);
    }

    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("grid.pptx");
    let catalog = AssetCatalog::from_dir(images.path()).unwrap();
    let summary = generate_to_path(&config("dapi", 3), &catalog, &out).unwrap();
    assert_eq!(summary.slides, 3);

    let mut archive = open(&out);
    let rows: Vec<usize> = slide_names(&archive)
        .iter()
        .map(|name| read_member(&mut archive, name).matches("<p:sp>").count())
        .collect();
    assert_eq!(rows, [3, 3, 1]);

    let slide3 = read_member(&mut archive, "ppt/slides/slide3.xml");
    assert!(slide3.contains("<a:t>G7</a:t>"));
}

#[test]
fn test_no_matching_files_gives_empty_presentation() {
    let images = tempfile::tempdir().unwrap();
    write_png(images.path(), "Sample1_red.png", 10, 10);

    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("empty.pptx");
    let catalog = AssetCatalog::from_dir(images.path()).unwrap();
    let summary = generate_to_path(&config("blue", 3), &catalog, &out).unwrap();

    assert_eq!(summary.groups, 0);
    assert_eq!(summary.slides, 0);
    let mut archive = open(&out);
    assert!(slide_names(&archive).is_empty());
    assert!(!read_member(&mut archive, "ppt/presentation.xml").contains("sldIdLst"));
}

#[test]
fn test_yaml_configuration() {
    let yaml = "extension: .png\nchannels: [blue, green]\nunit: mm\nimage_size: 50\nspacing: 2\nmargin: 10\nimages_per_slide: 2\n";
    let config = LayoutConfig::try_from(LayoutOptions::from_yaml_str(yaml).unwrap()).unwrap();
    assert_eq!(config.image_size(), 1_800_000);
    assert_eq!(config.spacing(), 72_000);
    assert_eq!(config.margin(), 360_000);
    assert_eq!(config.images_per_slide(), 2);
}

#[test]
fn test_title_written_to_core_properties() {
    let images = tempfile::tempdir().unwrap();
    write_png(images.path(), "Sample1_blue.png", 16, 16);

    let mut options = LayoutOptions {
        extension: ".png".to_string(),
        title: Some("Retina <whole mount>".to_string()),
        ..Default::default()
    };
    options.set_channels_str("blue");
    let config = LayoutConfig::try_from(options).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("titled.pptx");
    let catalog = AssetCatalog::from_dir(images.path()).unwrap();
    generate_to_path(&config, &catalog, &out).unwrap();

    let mut archive = open(&out);
    let core = read_member(&mut archive, "docProps/core.xml");
    assert!(core.contains("<dc:title>Retina &lt;whole mount&gt;</dc:title>"));

    // the media part holds the source file unchanged
    let mut media = Vec::new();
    archive
        .by_name("ppt/media/image1.png")
        .unwrap()
        .read_to_end(&mut media)
        .unwrap();
    assert_eq!(media, std::fs::read(images.path().join("Sample1_blue.png")).unwrap());
}
