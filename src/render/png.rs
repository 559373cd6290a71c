//! PNG output for rendered patterns.
//!
//! Encodes the pattern raster as PNG bytes, a `data:` URL for display, or a
//! file on disk.

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, RgbaImage};

use crate::error::{Result, StitchError};

use super::RenderedPattern;

/// Encode an RGBA raster as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| StitchError::Encode {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(out.into_inner())
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL.
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", general_purpose::STANDARD.encode(png))
}

/// Write a rendered pattern to a PNG file.
pub fn write_png(rendered: &RenderedPattern, path: &Path) -> Result<()> {
    rendered
        .image()
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| StitchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}

impl RenderedPattern {
    /// The pattern as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(self.image())
    }

    /// The pattern as a `data:` URL, ready for an `<img src>`.
    pub fn to_data_url(&self) -> Result<String> {
        Ok(png_data_url(&self.to_png()?))
    }

    /// Write the pattern to a PNG file.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_png(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::types::{Colour, PixelGrid};
    use tempfile::tempdir;

    fn pattern() -> RenderedPattern {
        let grid = PixelGrid::new(
            2,
            1,
            vec![Colour::rgb(255, 0, 0), Colour::new(0, 0, 255, 128)],
        )
        .unwrap();
        render(&grid, 4).unwrap()
    }

    #[test]
    fn test_write_png_simple() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pattern.png");

        pattern().save(&path).unwrap();
        assert!(path.exists());

        // Read back and verify
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 8);
        assert_eq!(img.height(), 4);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]); // Border
        assert_eq!(img.get_pixel(1, 1).0, [170, 0, 0, 255]); // Red
        assert_eq!(img.get_pixel(5, 1).0, [0, 0, 170, 128]); // Translucent blue
    }

    #[test]
    fn test_to_png_decodes_to_same_raster() {
        let rendered = pattern();
        let png = rendered.to_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), rendered.image().as_raw());
    }

    #[test]
    fn test_data_url_prefix() {
        let url = pattern().to_data_url().unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_write_png_bad_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("pattern.png");
        let err = pattern().save(&path).unwrap_err();
        assert!(matches!(err, StitchError::Io { .. }));
    }
}
