//! Grid sizing and pixel buffers.

use image::RgbaImage;

use super::Colour;

/// Default on-screen size of the long axis, in pixels.
pub const DEFAULT_DISPLAY_SIZE: u32 = 400;

/// Grid resolution and the on-screen size of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Cells along the reference axis (always >= 1).
    pub resolution: u32,
    /// Pixel size of one rendered cell, `floor(display_size / resolution)`.
    pub cell_pixel_size: u32,
}

impl GridSpec {
    /// Derive a grid spec. A resolution of 0 is clamped up to 1.
    pub fn new(resolution: u32, display_size: u32) -> Self {
        let resolution = resolution.max(1);
        Self {
            resolution,
            cell_pixel_size: display_size / resolution,
        }
    }

    /// Grid spec against the default 400px display size.
    pub fn with_resolution(resolution: u32) -> Self {
        Self::new(resolution, DEFAULT_DISPLAY_SIZE)
    }
}

/// A row-major, top-to-bottom, left-to-right buffer of RGBA pixels.
///
/// Used for both the sampled grid and the quantized grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    cols: u32,
    rows: u32,
    pixels: Vec<Colour>,
}

impl PixelGrid {
    /// Build a grid from its pixels. Returns `None` if the pixel count does
    /// not match `cols * rows` or either dimension is zero.
    pub fn new(cols: u32, rows: u32, pixels: Vec<Colour>) -> Option<Self> {
        if cols == 0 || rows == 0 || pixels.len() != cols as usize * rows as usize {
            return None;
        }
        Some(Self { cols, rows, pixels })
    }

    /// A grid filled with one colour.
    pub fn filled(cols: u32, rows: u32, colour: Colour) -> Option<Self> {
        Self::new(cols, rows, vec![colour; cols as usize * rows as usize])
    }

    /// Copy pixels out of a decoded RGBA image.
    pub fn from_rgba_image(img: &RgbaImage) -> Option<Self> {
        let pixels = img.pixels().map(|p| Colour::from_rgba(p.0)).collect();
        Self::new(img.width(), img.height(), pixels)
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.pixels.get((y * self.cols + x) as usize).copied()
    }

    /// Iterate `(x, y, colour)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, Colour)> + '_ {
        let cols = self.cols;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, c)| (i as u32 % cols, i as u32 / cols, *c))
    }

    /// Apply `f` to every pixel, keeping dimensions.
    pub fn map(&self, f: impl Fn(Colour) -> Colour) -> PixelGrid {
        PixelGrid {
            cols: self.cols,
            rows: self.rows,
            pixels: self.pixels.iter().map(|c| f(*c)).collect(),
        }
    }
}
