//! Source image intake.
//!
//! Validates uploaded bytes (MIME type must start with `image/`), decodes
//! them and exposes the natural size. The decoded image is kept as-is so the
//! caller can show the original next to the rendered pattern.

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::{Result, StitchError};

/// A decoded, read-only source image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    mime: String,
}

impl SourceImage {
    /// Validate and decode uploaded bytes.
    ///
    /// `declared_mime` is the type reported alongside the upload, if any.
    /// Without one the type is sniffed from the bytes.
    pub fn from_upload(bytes: &[u8], declared_mime: Option<&str>) -> Result<Self> {
        let mime = check_upload(bytes, declared_mime)?;
        let image = decode_bytes(bytes)?;
        Ok(Self { image, mime })
    }

    /// Read and decode an image file.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| StitchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", e),
        })?;
        Self::from_upload(&bytes, None)
    }

    /// Decode a `data:image/...;base64,` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let (mime, bytes) = parse_data_url(url)?;
        Self::from_upload(&bytes, Some(&mime))
    }

    /// Wrap an already-decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image,
            mime: ImageFormat::Png.to_mime_type().to_string(),
        }
    }

    pub(crate) fn set_mime(&mut self, mime: String) {
        self.mime = mime;
    }

    pub fn natural_width(&self) -> u32 {
        self.image.width()
    }

    pub fn natural_height(&self) -> u32 {
        self.image.height()
    }

    /// Whether both natural dimensions are known (non-zero).
    pub fn is_decoded(&self) -> bool {
        let (w, h) = self.image.dimensions();
        w > 0 && h > 0
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// MIME type of the upload.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// The original image re-encoded as PNG, for a "show original" view.
    pub fn original_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.image
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| StitchError::Encode {
                message: format!("Failed to encode original: {}", e),
            })?;
        Ok(out.into_inner())
    }
}

/// Check an upload and return its effective MIME type.
pub fn check_upload(bytes: &[u8], declared_mime: Option<&str>) -> Result<String> {
    if bytes.is_empty() {
        return Err(StitchError::InvalidInput {
            message: "Please upload a valid image file.".to_string(),
            help: Some("The upload contained no data".to_string()),
        });
    }

    let mime = match declared_mime {
        Some(mime) => mime.trim().to_ascii_lowercase(),
        None => image::guess_format(bytes)
            .map(|f| f.to_mime_type().to_string())
            .map_err(|_| StitchError::InvalidInput {
                message: "Please upload an image file.".to_string(),
                help: Some("The file type could not be recognised as an image".to_string()),
            })?,
    };

    if !mime.starts_with("image/") {
        return Err(StitchError::InvalidInput {
            message: "Please upload an image file.".to_string(),
            help: Some(format!("Got type {}", mime)),
        });
    }

    Ok(mime)
}

/// Decode image bytes, guessing the container format.
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    let format = image::guess_format(bytes).map_err(|e| StitchError::Decode {
        message: format!("Unsupported image format: {}", e),
    })?;

    image::load_from_memory_with_format(bytes, format).map_err(|e| StitchError::Decode {
        message: format!("Unable to decode image: {}", e),
    })
}

/// Split a base64 data URL into its MIME type and payload.
fn parse_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let invalid = |message: &str| StitchError::InvalidInput {
        message: message.to_string(),
        help: Some("Expected data:image/<type>;base64,<payload>".to_string()),
    };

    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| invalid("Not a data URL"))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| invalid("Data URL is missing the base64 marker"))?;

    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| invalid(&format!("Invalid base64 payload: {}", e)))?;

    Ok((mime.to_string(), bytes))
}
