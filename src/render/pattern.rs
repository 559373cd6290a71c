//! Pattern renderer - draws a quantized grid as bordered cells.
//!
//! Each cell is filled with its quantized colour (alpha composited over what
//! is already there), then outlined with a 1px black stroke. The outline sits
//! on the cell's own edges at `x0` and `x0 + size`, so neighbouring cells
//! share border pixels and the far right/bottom edge is clipped.

use image::{Rgba, RgbaImage};

use crate::error::{Result, StitchError};
use crate::types::{Colour, PixelGrid};

use super::quantize::{quantize, QuantizedGrid};

/// Border colour for every cell.
pub const BORDER: Colour = Colour::BLACK;

/// A rendered pattern raster plus the grid it was drawn from.
#[derive(Debug, Clone)]
pub struct RenderedPattern {
    image: RgbaImage,
    quantized: QuantizedGrid,
    cell_pixel_size: u32,
}

impl RenderedPattern {
    /// The output raster.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The quantized grid the raster was drawn from.
    pub fn quantized(&self) -> &QuantizedGrid {
        &self.quantized
    }

    pub fn cell_pixel_size(&self) -> u32 {
        self.cell_pixel_size
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Largest surface, in pixels, the renderer will allocate.
pub const MAX_SURFACE_PIXELS: u64 = 1 << 26;

/// Output size for a `cols x rows` grid of `cell_pixel_size` cells.
///
/// Fails with `Surface` when the output would have zero area (the
/// resolution exceeds the display size and the cell size rounds to 0),
/// when a side overflows `u32`, or when the area exceeds
/// `MAX_SURFACE_PIXELS`.
pub fn surface_size(cols: u32, rows: u32, cell_pixel_size: u32) -> Result<(u32, u32)> {
    let width = cols.checked_mul(cell_pixel_size);
    let height = rows.checked_mul(cell_pixel_size);

    match (width, height) {
        (Some(w), Some(h))
            if w > 0 && h > 0 && (w as u64) * (h as u64) <= MAX_SURFACE_PIXELS =>
        {
            Ok((w, h))
        }
        _ => Err(StitchError::Surface {
            width: width.unwrap_or(u32::MAX),
            height: height.unwrap_or(u32::MAX),
        }),
    }
}

/// Quantize a sampled grid and draw it as bordered cells.
pub fn render(grid: &PixelGrid, cell_pixel_size: u32) -> Result<RenderedPattern> {
    let (width, height) = surface_size(grid.cols(), grid.rows(), cell_pixel_size)?;

    let quantized = quantize(grid);
    let mut canvas = Canvas::new(width, height);

    for (x, y, colour) in quantized.grid().cells() {
        let x0 = x * cell_pixel_size;
        let y0 = y * cell_pixel_size;
        canvas.fill_rect(x0, y0, cell_pixel_size, cell_pixel_size, colour);
        canvas.stroke_rect(x0, y0, cell_pixel_size, cell_pixel_size, BORDER);
    }

    Ok(RenderedPattern {
        image: canvas.into_image(),
        quantized,
        cell_pixel_size,
    })
}

/// A transparent RGBA surface with clipped rectangle drawing.
struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbaImage::new(width, height),
        }
    }

    /// Composite `colour` over a single pixel, ignoring out-of-bounds writes.
    fn blend(&mut self, x: u32, y: u32, colour: Colour) {
        if x >= self.img.width() || y >= self.img.height() {
            return;
        }
        let dst = Colour::from_rgba(self.img.get_pixel(x, y).0);
        self.img.put_pixel(x, y, Rgba(colour.over(dst).to_rgba()));
    }

    fn fill_rect(&mut self, x0: u32, y0: u32, w: u32, h: u32, colour: Colour) {
        for y in y0..y0.saturating_add(h) {
            for x in x0..x0.saturating_add(w) {
                self.blend(x, y, colour);
            }
        }
    }

    /// 1px outline covering columns `x0..=x0+w` and rows `y0..=y0+h`.
    fn stroke_rect(&mut self, x0: u32, y0: u32, w: u32, h: u32, colour: Colour) {
        let x1 = x0.saturating_add(w);
        let y1 = y0.saturating_add(h);

        for x in x0..=x1 {
            self.blend(x, y0, colour);
            self.blend(x, y1, colour);
        }
        for y in y0 + 1..y1 {
            self.blend(x0, y, colour);
            self.blend(x1, y, colour);
        }
    }

    fn into_image(self) -> RgbaImage {
        self.img
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{is_palette_colour, GridSpec};

    const RED: Colour = Colour::rgb(170, 0, 0);

    #[test]
    fn test_render_dimensions() {
        let grid = PixelGrid::filled(4, 2, Colour::rgb(255, 0, 0)).unwrap();
        let rendered = render(&grid, 5).unwrap();

        assert_eq!(rendered.width(), 20);
        assert_eq!(rendered.height(), 10);
        assert_eq!(rendered.cell_pixel_size(), 5);
        assert_eq!(rendered.quantized().cols(), 4);
    }

    #[test]
    fn test_render_fill_and_shared_borders() {
        let grid = PixelGrid::filled(2, 2, Colour::rgb(255, 0, 0)).unwrap();
        let rendered = render(&grid, 4).unwrap();
        let img = rendered.image();

        // Top-left corner and the shared edge between cells
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(4, 1).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 4).0, [0, 0, 0, 255]);

        // Interior pixels carry the quantized colour
        assert_eq!(img.get_pixel(1, 1).0, RED.to_rgba());
        assert_eq!(img.get_pixel(6, 6).0, RED.to_rgba());

        // The outer right/bottom edge falls outside the surface
        assert_eq!(img.get_pixel(7, 7).0, RED.to_rgba());
    }

    #[test]
    fn test_render_translucent_cells() {
        let grid = PixelGrid::filled(1, 1, Colour::new(255, 0, 0, 128)).unwrap();
        let rendered = render(&grid, 3).unwrap();

        assert_eq!(rendered.image().get_pixel(1, 1).0, [170, 0, 0, 128]);
        assert_eq!(rendered.image().get_pixel(0, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_render_transparent_cells_show_only_borders() {
        let grid = PixelGrid::filled(1, 1, Colour::TRANSPARENT).unwrap();
        let rendered = render(&grid, 3).unwrap();

        assert_eq!(rendered.image().get_pixel(1, 1).0, [0, 0, 0, 0]);
        assert_eq!(rendered.image().get_pixel(1, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_render_cell_size_one_is_all_border() {
        let grid = PixelGrid::filled(3, 3, Colour::WHITE).unwrap();
        let rendered = render(&grid, 1).unwrap();
        assert!(rendered.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_render_zero_cell_size_fails() {
        let grid = PixelGrid::filled(401, 1, Colour::WHITE).unwrap();
        let spec = GridSpec::with_resolution(401);
        let err = render(&grid, spec.cell_pixel_size).unwrap_err();
        assert!(matches!(err, StitchError::Surface { width: 0, height: 0 }));
    }

    #[test]
    fn test_surface_size_overflow_and_area_limit() {
        assert_eq!(surface_size(4, 2, 100).unwrap(), (400, 200));

        let err = surface_size(u32::MAX, 1, 2).unwrap_err();
        assert!(matches!(err, StitchError::Surface { width: u32::MAX, .. }));

        // Each side fits in u32 but the area is far too large
        let err = surface_size(400, 40_000_000, 1).unwrap_err();
        assert!(matches!(err, StitchError::Surface { .. }));
    }

    #[test]
    fn test_render_huge_cell_size_fails_cleanly() {
        let grid = PixelGrid::filled(2, 2, Colour::WHITE).unwrap();
        let err = render(&grid, 1_000_000).unwrap_err();
        assert!(matches!(err, StitchError::Surface { .. }));
    }

    #[test]
    fn test_render_only_palette_colours_and_black() {
        let pixels = (0..64u32)
            .map(|i| Colour::new((i * 4) as u8, (255 - i * 3) as u8, (i * 2) as u8, 255))
            .collect();
        let grid = PixelGrid::new(8, 8, pixels).unwrap();
        let rendered = render(&grid, 6).unwrap();

        assert!(rendered
            .image()
            .pixels()
            .all(|p| is_palette_colour(Colour::from_rgba(p.0))));
    }

    #[test]
    fn test_render_is_deterministic() {
        let pixels = (0..20u32)
            .map(|i| Colour::new((i * 13) as u8, (i * 7) as u8, (i * 31) as u8, (i * 12) as u8))
            .collect();
        let grid = PixelGrid::new(5, 4, pixels).unwrap();

        let a = render(&grid, 7).unwrap();
        let b = render(&grid, 7).unwrap();
        assert_eq!(a.image().as_raw(), b.image().as_raw());
    }
}
