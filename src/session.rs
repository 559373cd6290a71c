//! Pattern session - the image-to-pattern pipeline and its state machine.
//!
//! A session holds at most one source image and one rendered pattern. It
//! moves `Empty -> Loaded -> Processing -> Rendered`, re-entering
//! `Processing -> Rendered` whenever the resolution or config changes while
//! an image is held. `clear` returns to `Empty` from any state.
//!
//! Decoding is a single-shot step outside the session: `open` hands back a
//! `PendingDecode` tagged with a request token, and `complete` honours only
//! the most recently issued token. Opening another upload or clearing makes
//! older decodes stale.

use crate::config::PatternConfig;
use crate::error::{Result, StitchError};
use crate::render::{render, surface_size, RenderedPattern};
use crate::sample::{grid_dimensions, sample};
use crate::source::{check_upload, decode_bytes, SourceImage};

/// Run the whole pipeline once: sample the image, then quantize and render.
///
/// The output surface is sized up front so an unusable resolution or
/// display size fails with `Surface` before any resampling happens.
pub fn process(image: &SourceImage, config: &PatternConfig) -> Result<RenderedPattern> {
    let spec = config.grid_spec();
    let (cols, rows) = grid_dimensions(
        spec.resolution,
        image.natural_width(),
        image.natural_height(),
        config.reference_axis,
    )?;
    surface_size(cols, rows, spec.cell_pixel_size)?;

    let grid = sample(image, spec.resolution, config.reference_axis, config.filter)?;
    render(&grid, spec.cell_pixel_size)
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No image.
    Empty,
    /// An image is held but no pattern has been rendered for it.
    Loaded,
    /// A pipeline run is in progress.
    Processing,
    /// A pattern is available.
    Rendered,
}

/// Result of a pipeline trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new pattern replaced the previous one.
    Rendered,
    /// The image has no natural size yet; nothing was produced.
    Deferred,
    /// The rendering surface could not be acquired; the prior pattern is kept.
    SurfaceUnavailable,
    /// The decode was superseded by a later upload or a clear.
    Stale,
    /// There is no image to process.
    Idle,
}

/// Identifies one upload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Validated upload bytes waiting to be decoded.
#[derive(Debug)]
pub struct PendingDecode {
    token: RequestToken,
    bytes: Vec<u8>,
    mime: String,
}

impl PendingDecode {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Decode the bytes. Safe to run away from the session.
    pub fn decode(self) -> DecodedImage {
        let mime = self.mime;
        let result = decode_bytes(&self.bytes).map(|image| {
            let mut source = SourceImage::from_image(image);
            source.set_mime(mime);
            source
        });
        DecodedImage {
            token: self.token,
            result,
        }
    }
}

/// A finished decode, ready to hand back to `Session::complete`.
#[derive(Debug)]
pub struct DecodedImage {
    token: RequestToken,
    result: Result<SourceImage>,
}

impl DecodedImage {
    pub fn token(&self) -> RequestToken {
        self.token
    }
}

/// Holds the current image, config and rendered pattern.
#[derive(Debug)]
pub struct Session {
    config: PatternConfig,
    state: SessionState,
    next_token: u64,
    latest: Option<RequestToken>,
    image: Option<SourceImage>,
    pattern: Option<RenderedPattern>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PatternConfig::default())
    }
}

impl Session {
    pub fn new(config: PatternConfig) -> Self {
        Self {
            config,
            state: SessionState::Empty,
            next_token: 0,
            latest: None,
            image: None,
            pattern: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Current grid resolution (always >= 1).
    pub fn resolution(&self) -> u32 {
        self.config.resolution.max(1)
    }

    /// The current rendered pattern, if any.
    pub fn pattern(&self) -> Option<&RenderedPattern> {
        self.pattern.as_ref()
    }

    /// The held source image, for showing the original.
    pub fn original(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Validate an upload and issue a decode request for it.
    ///
    /// Invalid input is rejected before a token is issued, leaving the
    /// session untouched. A valid upload supersedes any in-flight decode.
    pub fn open(&mut self, bytes: Vec<u8>, declared_mime: Option<&str>) -> Result<PendingDecode> {
        let mime = check_upload(&bytes, declared_mime)?;
        let token = self.issue_token();
        Ok(PendingDecode { token, bytes, mime })
    }

    /// Accept a finished decode and run the pipeline on it.
    ///
    /// Stale decodes are dropped without touching the session. A decode
    /// error on the current request is returned and the session keeps
    /// whatever it held before.
    pub fn complete(&mut self, decoded: DecodedImage) -> Result<Outcome> {
        if self.latest != Some(decoded.token) {
            return Ok(Outcome::Stale);
        }
        self.latest = None;

        let image = decoded.result?;
        self.image = Some(image);
        self.state = SessionState::Loaded;
        self.rerun()
    }

    /// Load an already-decoded image and run the pipeline.
    pub fn load(&mut self, image: SourceImage) -> Result<Outcome> {
        let token = self.issue_token();
        self.complete(DecodedImage {
            token,
            result: Ok(image),
        })
    }

    /// Change the grid resolution (clamped to >= 1) and re-render.
    pub fn set_resolution(&mut self, resolution: u32) -> Result<Outcome> {
        self.config.resolution = resolution.max(1);
        self.rerun()
    }

    /// Replace the whole config and re-render.
    pub fn set_config(&mut self, config: PatternConfig) -> Result<Outcome> {
        self.config = config;
        self.rerun()
    }

    /// Drop the image and pattern and invalidate in-flight decodes.
    pub fn clear(&mut self) {
        self.latest = None;
        self.image = None;
        self.pattern = None;
        self.state = SessionState::Empty;
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest = Some(token);
        token
    }

    /// Run the pipeline on the held image.
    fn rerun(&mut self) -> Result<Outcome> {
        let Some(image) = &self.image else {
            return Ok(Outcome::Idle);
        };

        let previous = self.state;
        self.state = SessionState::Processing;

        match process(image, &self.config) {
            Ok(pattern) => {
                self.pattern = Some(pattern);
                self.state = SessionState::Rendered;
                Ok(Outcome::Rendered)
            }
            Err(StitchError::DecodeNotReady) => {
                self.state = self.settled_state();
                Ok(Outcome::Deferred)
            }
            Err(StitchError::Surface { .. }) => {
                self.state = self.settled_state();
                Ok(Outcome::SurfaceUnavailable)
            }
            Err(e) => {
                self.state = previous;
                Err(e)
            }
        }
    }

    fn settled_state(&self) -> SessionState {
        if self.pattern.is_some() {
            SessionState::Rendered
        } else {
            SessionState::Loaded
        }
    }
}
