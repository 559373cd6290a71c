use miette::Diagnostic;
use thiserror::Error;

/// Main error type for stitchify operations
#[derive(Error, Diagnostic, Debug)]
pub enum StitchError {
    #[error("IO error: {0}")]
    #[diagnostic(code(stitchify::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(stitchify::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid input: {message}")]
    #[diagnostic(code(stitchify::input))]
    InvalidInput {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Decode error: {message}")]
    #[diagnostic(code(stitchify::decode))]
    Decode { message: String },

    /// The image has no natural size yet; processing waits for a full decode.
    #[error("Image dimensions are not available yet")]
    #[diagnostic(code(stitchify::decode_not_ready))]
    DecodeNotReady,

    #[error("Cannot acquire a {width}x{height} rendering surface")]
    #[diagnostic(
        code(stitchify::surface),
        help("The grid resolution is larger than the display size; lower the resolution")
    )]
    Surface { width: u32, height: u32 },

    #[error("Parse error: {message}")]
    #[diagnostic(code(stitchify::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Encode error: {message}")]
    #[diagnostic(code(stitchify::encode))]
    Encode { message: String },
}

pub type Result<T> = std::result::Result<T, StitchError>;
