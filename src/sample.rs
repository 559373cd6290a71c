//! Grid sampler.
//!
//! Shrinks a source image to one pixel per grid cell. By default the width is
//! the reference axis: `cols = resolution` and
//! `rows = round(resolution * h / w)`, whatever the orientation.

use image::imageops;

use crate::config::{ReferenceAxis, SampleFilter};
use crate::error::{Result, StitchError};
use crate::source::SourceImage;
use crate::types::PixelGrid;

/// Compute `(cols, rows)` for a grid over a `width x height` image.
///
/// The resolution is clamped to at least 1, and so is the derived short
/// side, so an extremely wide image still yields one row.
pub fn grid_dimensions(
    resolution: u32,
    width: u32,
    height: u32,
    axis: ReferenceAxis,
) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(StitchError::DecodeNotReady);
    }

    let resolution = resolution.max(1);
    let scaled = |long: u32, short: u32| -> u32 {
        let ratio = short as f64 / long as f64;
        ((resolution as f64 * ratio).round() as u32).max(1)
    };

    let dims = match axis {
        ReferenceAxis::Width => (resolution, scaled(width, height)),
        ReferenceAxis::Longest if height > width => (scaled(height, width), resolution),
        ReferenceAxis::Longest => (resolution, scaled(width, height)),
    };

    Ok(dims)
}

/// Sample a source image into a grid with one pixel per cell.
pub fn sample(
    image: &SourceImage,
    resolution: u32,
    axis: ReferenceAxis,
    filter: SampleFilter,
) -> Result<PixelGrid> {
    if !image.is_decoded() {
        return Err(StitchError::DecodeNotReady);
    }

    let (cols, rows) = grid_dimensions(
        resolution,
        image.natural_width(),
        image.natural_height(),
        axis,
    )?;

    let rgba = image.image().to_rgba8();
    let resized = imageops::resize(&rgba, cols, rows, filter.filter_type());

    PixelGrid::from_rgba_image(&resized).ok_or(StitchError::Surface {
        width: cols,
        height: rows,
    })
}
