//! Nearest-colour quantization of a sampled grid to the CGA palette.

use crate::types::{nearest_index, quantize_colour, PixelGrid};

/// A sampled grid with every pixel's RGB replaced by a palette entry.
///
/// Alpha is carried over from the sample unchanged. The palette index of
/// each cell is kept alongside the colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedGrid {
    grid: PixelGrid,
    indices: Vec<u8>,
}

impl QuantizedGrid {
    /// The quantized pixels.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Palette index per cell, row-major.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn cols(&self) -> u32 {
        self.grid.cols()
    }

    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Palette index at column `x`, row `y`.
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.cols() || y >= self.rows() {
            return None;
        }
        self.indices.get((y * self.cols() + x) as usize).copied()
    }

    /// Palette indices grouped into rows, top to bottom.
    pub fn index_rows(&self) -> Vec<Vec<u8>> {
        self.indices
            .chunks(self.cols() as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Quantize every pixel to its nearest palette entry.
pub fn quantize(grid: &PixelGrid) -> QuantizedGrid {
    QuantizedGrid {
        grid: grid.map(quantize_colour),
        indices: grid.pixels().iter().map(|c| nearest_index(*c)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{is_palette_colour, Colour};
    use pretty_assertions::assert_eq;

    fn gradient(cols: u32, rows: u32) -> PixelGrid {
        let pixels = (0..rows)
            .flat_map(|y| {
                (0..cols).map(move |x| {
                    Colour::new(
                        ((x * 37) % 256) as u8,
                        ((y * 53) % 256) as u8,
                        (((x + y) * 29) % 256) as u8,
                        ((x * 11 + y * 7) % 256) as u8,
                    )
                })
            })
            .collect();
        PixelGrid::new(cols, rows, pixels).unwrap()
    }

    #[test]
    fn test_quantize_solid_red() {
        let grid = PixelGrid::filled(4, 4, Colour::rgb(255, 0, 0)).unwrap();
        let q = quantize(&grid);

        assert_eq!(q.indices(), &[4u8; 16][..]);
        assert!(q.grid().pixels().iter().all(|c| *c == Colour::rgb(170, 0, 0)));
    }

    #[test]
    fn test_every_output_pixel_is_a_palette_entry_with_alpha_kept() {
        let grid = gradient(9, 7);
        let q = quantize(&grid);

        for (src, out) in grid.pixels().iter().zip(q.grid().pixels()) {
            assert!(is_palette_colour(*out));
            assert_eq!(src.a, out.a);
        }
        assert_eq!((q.cols(), q.rows()), (9, 7));
    }

    #[test]
    fn test_quantize_is_idempotent() {
        let once = quantize(&gradient(6, 5));
        let twice = quantize(once.grid());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_tie_resolves_to_lower_index() {
        let grid = PixelGrid::new(
            2,
            1,
            vec![Colour::rgb(0, 0, 85), Colour::rgb(85, 85, 170)],
        )
        .unwrap();
        let q = quantize(&grid);
        assert_eq!(q.indices(), &[0, 8]);
    }

    #[test]
    fn test_index_rows_and_lookup() {
        let grid = PixelGrid::new(
            2,
            2,
            vec![
                Colour::BLACK,
                Colour::WHITE,
                Colour::rgb(0, 170, 0),
                Colour::rgb(255, 255, 85),
            ],
        )
        .unwrap();
        let q = quantize(&grid);

        assert_eq!(q.index_rows(), vec![vec![0, 15], vec![2, 14]]);
        assert_eq!(q.index_at(1, 1), Some(14));
        assert_eq!(q.index_at(2, 0), None);
    }
}
