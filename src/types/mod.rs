//! Core domain types for stitchify.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values
//! - `CGA_PALETTE` - The fixed 16-colour lookup table
//! - `GridSpec`, `PixelGrid` - Grid sizing and pixel buffers

mod colour;
mod grid;
mod palette;

pub use colour::Colour;
pub use grid::{GridSpec, PixelGrid, DEFAULT_DISPLAY_SIZE};
pub use palette::{
    is_palette_colour, nearest_index, quantize_colour, CGA_NAMES, CGA_PALETTE, PALETTE_LEN,
};
