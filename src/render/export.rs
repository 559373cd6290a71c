//! JSON export of a rendered pattern's cell grid.
//!
//! Lists the palette and the palette index of every cell, row by row, so a
//! pattern can be charted without reading pixels back out of the PNG.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, StitchError};
use crate::types::{CGA_NAMES, CGA_PALETTE};

use super::RenderedPattern;

/// Serializable view of a pattern grid.
#[derive(Debug, Serialize)]
pub struct GridExport {
    pub cols: u32,
    pub rows: u32,
    pub cell_pixel_size: u32,
    pub palette: Vec<PaletteExport>,
    /// Palette index per cell, `cells[row][col]`.
    pub cells: Vec<Vec<u8>>,
}

/// One palette entry in the export.
#[derive(Debug, Serialize)]
pub struct PaletteExport {
    pub index: u8,
    pub name: &'static str,
    pub hex: String,
}

impl GridExport {
    pub fn from_pattern(rendered: &RenderedPattern) -> Self {
        let quantized = rendered.quantized();

        let palette = CGA_PALETTE
            .iter()
            .zip(CGA_NAMES)
            .enumerate()
            .map(|(i, (colour, name))| PaletteExport {
                index: i as u8,
                name,
                hex: colour.to_string(),
            })
            .collect();

        Self {
            cols: quantized.cols(),
            rows: quantized.rows(),
            cell_pixel_size: rendered.cell_pixel_size(),
            palette,
            cells: quantized.index_rows(),
        }
    }
}

impl RenderedPattern {
    /// Pretty-printed JSON describing the cell grid.
    pub fn grid_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&GridExport::from_pattern(self)).map_err(|e| {
            StitchError::Encode {
                message: format!("Failed to serialize grid: {}", e),
            }
        })
    }
}

/// Write the grid JSON next to a pattern.
pub fn write_grid_json(rendered: &RenderedPattern, path: &Path) -> Result<()> {
    let json = rendered.grid_json()?;
    fs::write(path, json).map_err(|e| StitchError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write grid JSON: {}", e),
    })?;
    Ok(())
}
