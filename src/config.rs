//! Pattern configuration (stitchify.yaml) parsing.
//!
//! The config file supplies defaults for the grid resolution, the display
//! size and how the source image is sampled. The palette is not configurable.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StitchError};
use crate::types::{GridSpec, DEFAULT_DISPLAY_SIZE};

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "stitchify.yaml";

/// Grid resolution used when nothing else is specified.
pub const DEFAULT_RESOLUTION: u32 = 32;

/// Resampling filter used when shrinking the source image to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SampleFilter {
    /// One source pixel per cell, no smoothing.
    Nearest,
    /// Linear interpolation, close to a 2D canvas's default smoothing.
    #[default]
    Triangle,
    /// Cubic (Catmull-Rom) interpolation.
    CatmullRom,
    /// Gaussian smoothing.
    Gaussian,
    /// Lanczos with a 3-lobe window.
    Lanczos3,
}

impl SampleFilter {
    /// The `image` crate filter this maps to.
    pub fn filter_type(self) -> FilterType {
        match self {
            SampleFilter::Nearest => FilterType::Nearest,
            SampleFilter::Triangle => FilterType::Triangle,
            SampleFilter::CatmullRom => FilterType::CatmullRom,
            SampleFilter::Gaussian => FilterType::Gaussian,
            SampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for SampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleFilter::Nearest => write!(f, "nearest"),
            SampleFilter::Triangle => write!(f, "triangle"),
            SampleFilter::CatmullRom => write!(f, "catmull-rom"),
            SampleFilter::Gaussian => write!(f, "gaussian"),
            SampleFilter::Lanczos3 => write!(f, "lanczos3"),
        }
    }
}

/// Which image axis the grid resolution counts cells along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceAxis {
    /// Always the width: `cols = resolution`, `rows = round(resolution * h / w)`.
    #[default]
    Width,
    /// Whichever side is longer gets `resolution` cells.
    Longest,
}

impl fmt::Display for ReferenceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceAxis::Width => write!(f, "width"),
            ReferenceAxis::Longest => write!(f, "longest"),
        }
    }
}

/// Pattern configuration loaded from stitchify.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PatternConfig {
    /// Cells along the reference axis.
    pub resolution: u32,

    /// On-screen size of the long axis; cell size is `display_size / resolution`.
    pub display_size: u32,

    /// Resampling filter for the grid sampler.
    pub filter: SampleFilter,

    /// Axis the resolution is measured along.
    pub reference_axis: ReferenceAxis,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            display_size: DEFAULT_DISPLAY_SIZE,
            filter: SampleFilter::default(),
            reference_axis: ReferenceAxis::default(),
        }
    }
}

impl PatternConfig {
    /// Load config from a stitchify.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StitchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from YAML string. An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| StitchError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load an explicit config path, else `stitchify.yaml` in `dir` if it
    /// exists, else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate: PathBuf = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Grid spec for the configured resolution and display size.
    pub fn grid_spec(&self) -> GridSpec {
        GridSpec::new(self.resolution, self.display_size)
    }
}
