//! stitchify - Image to crochet grid pattern converter
//!
//! Shrinks an image to a coarse grid, maps every cell to the fixed CGA
//! 16-colour palette and draws the result as bordered cells.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod sample;
pub mod session;
pub mod source;
pub mod types;

pub use config::{PatternConfig, ReferenceAxis, SampleFilter};
pub use error::{Result, StitchError};
pub use render::{render, quantize, QuantizedGrid, RenderedPattern};
pub use sample::{grid_dimensions, sample};
pub use session::{process, DecodedImage, Outcome, PendingDecode, RequestToken, Session, SessionState};
pub use source::SourceImage;
pub use types::{Colour, GridSpec, PixelGrid, CGA_PALETTE};
