//! Render command implementation.
//!
//! Loads one image, runs the pattern pipeline and writes the pattern PNG.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{PatternConfig, ReferenceAxis, SampleFilter};
use crate::error::{Result, StitchError};
use crate::output::{display_path, Printer};
use crate::render::write_grid_json;
use crate::session::process;
use crate::source::SourceImage;

/// Render an image as a bordered grid pattern
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Image to convert
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output PNG path (default: <name>.pattern.png next to the input)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Cells along the reference axis (values below 1 are raised to 1)
    #[arg(long, short)]
    pub resolution: Option<u32>,

    /// Pixel size of the long axis of the output
    #[arg(long)]
    pub display_size: Option<u32>,

    /// Resampling filter used when shrinking the image
    #[arg(long, value_enum)]
    pub filter: Option<SampleFilter>,

    /// Axis the resolution counts cells along
    #[arg(long, value_enum)]
    pub axis: Option<ReferenceAxis>,

    /// Also write the cell grid as JSON to this path
    #[arg(long)]
    pub grid: Option<PathBuf>,

    /// Print the cell grid as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Config file (default: ./stitchify.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl RenderArgs {
    /// Layer command-line overrides on top of a loaded config.
    fn apply(&self, mut config: PatternConfig) -> PatternConfig {
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(display_size) = self.display_size {
            config.display_size = display_size;
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(axis) = self.axis {
            config.reference_axis = axis;
        }
        config.resolution = config.resolution.max(1);
        config
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

pub fn run(args: RenderArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = args.apply(PatternConfig::discover(args.config.as_deref(), &cwd)?);

    printer.status("Loading", &display_path(&args.input));
    let source = SourceImage::open(&args.input)?;

    let rendered = process(&source, &config)?;
    let quantized = rendered.quantized();
    printer.status(
        "Sampled",
        &format!(
            "{}x{} -> {}x{} grid ({}, {})",
            source.natural_width(),
            source.natural_height(),
            quantized.cols(),
            quantized.rows(),
            config.filter,
            config.reference_axis
        ),
    );

    if quantized.rows() > config.resolution {
        printer.warning(
            "Portrait",
            &format!(
                "{} rows exceed the resolution of {}; use --axis longest to size by the taller side",
                quantized.rows(),
                config.resolution
            ),
        );
    }

    let output = args.output_path();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StitchError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    rendered.save(&output)?;
    printer.status(
        "Rendered",
        &format!(
            "{} ({}x{}, {}px cells)",
            display_path(&output),
            rendered.width(),
            rendered.height(),
            rendered.cell_pixel_size()
        ),
    );

    if let Some(grid_path) = &args.grid {
        write_grid_json(&rendered, grid_path)?;
        printer.status("Wrote", &display_path(grid_path));
    }

    if args.json {
        println!("{}", rendered.grid_json()?);
    }

    Ok(())
}

/// `photo.jpg` -> `photo.pattern.png` in the same directory.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pattern".to_string());
    input.with_file_name(format!("{}.pattern.png", stem))
}
