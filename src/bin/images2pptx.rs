//! Command-line front end: lay out a folder (or list) of channel images as a
//! PowerPoint grid.
//!
//! # Usage
//!
//! ```sh
//! images2pptx --dir images --extension .png --channels "blue green" -o grid.pptx
//! ```
//!
//! Layout parameters can come from a YAML file; flags override it:
//! ```sh
//! images2pptx --config layout.yaml --per-slide 4 images/*.tif
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use images2pptx::common::unit::{LengthUnit, emu_to_cm};
use images2pptx::layout::{GroupDiscovery, LayoutPlan};
use images2pptx::{AssetCatalog, LayoutConfig, LayoutOptions, generate_to_path};
use std::path::PathBuf;
use tracing::info;

/// Arrange multi-channel images into a PowerPoint grid
#[derive(Parser, Debug)]
#[command(
    name = "images2pptx",
    about = "Arrange <group>_<channel> images into a PowerPoint grid, one row per group",
    version
)]
struct Args {
    /// Image files to lay out
    #[arg(value_name = "IMAGE", conflicts_with = "dir")]
    images: Vec<PathBuf>,

    /// Folder whose files are laid out (not recursive)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// YAML layout configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File extension shared by all images, including the dot
    #[arg(short, long)]
    extension: Option<String>,

    /// Channel names, separated by whitespace, in column order
    #[arg(long, value_name = "\"C1 C2 ...\"")]
    channels: Option<String>,

    /// Length of each image's longer side
    #[arg(long)]
    size: Option<f64>,

    /// Horizontal gap between images
    #[arg(long)]
    spacing: Option<f64>,

    /// Slide margin on every side
    #[arg(long)]
    margin: Option<f64>,

    /// Rows (groups) per slide
    #[arg(long)]
    per_slide: Option<usize>,

    /// Unit of --size, --spacing and --margin
    #[arg(long, value_enum)]
    unit: Option<UnitArg>,

    /// Pixel density used to compute each image's native size
    #[arg(long)]
    dpi: Option<u32>,

    /// Only lay out groups that have a file for every channel
    #[arg(long)]
    all_channels: bool,

    /// Document title stored in the presentation properties
    #[arg(long)]
    title: Option<String>,

    /// Output presentation
    #[arg(short, long, value_name = "OUTPUT", default_value = "Presentation.pptx")]
    output: PathBuf,

    /// Plan the layout and print it without writing a presentation
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Length units for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    /// Millimeters
    Mm,
    /// Centimeters
    Cm,
    /// Inches
    In,
    /// Points
    Pt,
}

impl From<UnitArg> for LengthUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Mm => LengthUnit::Millimeter,
            UnitArg::Cm => LengthUnit::Centimeter,
            UnitArg::In => LengthUnit::Inch,
            UnitArg::Pt => LengthUnit::Point,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let directive = if args.verbose {
        "images2pptx=debug"
    } else {
        "images2pptx=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    let config = LayoutConfig::try_from(layout_options(&args)?)
        .context("Invalid layout configuration")?;

    let catalog = match &args.dir {
        Some(dir) => AssetCatalog::from_dir(dir)
            .with_context(|| format!("Failed to list {}", dir.display()))?,
        None if !args.images.is_empty() => AssetCatalog::from_paths(&args.images)?,
        None => bail!("No images given: pass image files or --dir <DIR>"),
    };
    info!(files = catalog.len(), "collected images");

    if args.dry_run {
        let plan = LayoutPlan::build(&config, &catalog)?;
        println!(
            "{} groups on {} slides, slide size {:.2} x {:.2} cm",
            plan.groups.len(),
            plan.slide_count(),
            emu_to_cm(plan.canvas.width),
            emu_to_cm(plan.canvas.height),
        );
        for (index, page) in plan.pages.iter().enumerate() {
            let keys: Vec<&str> = plan.groups[page.clone()]
                .iter()
                .map(|g| g.key.as_str())
                .collect();
            println!("  slide {}: {}", index + 1, keys.join(", "));
        }
        return Ok(());
    }

    let summary = generate_to_path(&config, &catalog, &args.output)
        .with_context(|| format!("Failed to generate {}", args.output.display()))?;
    println!(
        "✓ {} groups on {} slides -> {}",
        summary.groups,
        summary.slides,
        args.output.display()
    );
    Ok(())
}

/// Start from the YAML file, if any, and apply command-line overrides.
fn layout_options(args: &Args) -> Result<LayoutOptions> {
    let mut options = match &args.config {
        Some(path) => LayoutOptions::from_yaml_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => LayoutOptions::default(),
    };

    if let Some(extension) = &args.extension {
        options.extension = extension.clone();
    }
    if let Some(channels) = &args.channels {
        options.set_channels_str(channels);
    }
    if let Some(unit) = args.unit {
        options.unit = unit.into();
    }
    if let Some(size) = args.size {
        options.image_size = size;
    }
    if let Some(spacing) = args.spacing {
        options.spacing = spacing;
    }
    if let Some(margin) = args.margin {
        options.margin = margin;
    }
    if let Some(per_slide) = args.per_slide {
        options.images_per_slide = per_slide;
    }
    if let Some(dpi) = args.dpi {
        options.dpi = dpi;
    }
    if args.all_channels {
        options.discovery = GroupDiscovery::AllChannels;
    }
    if let Some(title) = &args.title {
        options.title = Some(title.clone());
    }
    Ok(options)
}
