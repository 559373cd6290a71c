//! Rendering module for stitchify.
//!
//! This module quantizes sampled grids to the CGA palette, draws them as
//! bordered cells and encodes the result.

mod export;
mod pattern;
mod png;
mod quantize;

pub use export::{write_grid_json, GridExport, PaletteExport};
pub use pattern::{render, surface_size, RenderedPattern, BORDER, MAX_SURFACE_PIXELS};
pub use png::{encode_png, png_data_url, write_png};
pub use quantize::{quantize, QuantizedGrid};
