//! Format dispatch: the single entry point that turns a matrix into a finished artifact.
//!
//! [`render`] takes an already encoded [`ModuleMatrix`]. [`generate`] is the request boundary
//! used by transport layers: it validates the raw parameters, asks a [`MatrixEncoder`] for the
//! matrix and then renders it.

use core::fmt;
use core::str::FromStr;

use log::{debug, trace, warn};
use serde::Deserialize;

use crate::color::Color;
use crate::error::{RenderError, Result};
use crate::geometry::Geometry;
use crate::matrix::{EcLevel, MatrixEncoder, ModuleMatrix};
use crate::raster::{check_size, render_raster, RasterFormat};
use crate::svg::render_svg;

/// Output size used when a request does not give one.
pub const DEFAULT_SIZE: u32 = 300;
/// Foreground color used when a request does not give one.
pub const DEFAULT_FOREGROUND: &str = "#000000";
/// Background color used when a request does not give one.
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
/// Error correction level requested from the encoder.
pub const DEFAULT_EC_LEVEL: EcLevel = EcLevel::Quartile;

/// Supported output encodings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Svg,
}

impl OutputFormat {
    /// Parses a format name, ignoring case. `jpeg` is accepted as an alias of `jpg`.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(RenderError::UnsupportedFormat(name.to_string())),
        }
    }

    /// MIME type of artifacts in this format.
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Svg => "image/svg+xml",
        }
    }

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        OutputFormat::parse(s)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A fully parsed render request.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    pub matrix: ModuleMatrix,
    pub size_pixels: u32,
    pub foreground: Color,
    pub background: Color,
    pub format: OutputFormat,
}

/// Encoded output of one render. The bytes are complete or the render failed.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RenderedArtifact {
    bytes: Vec<u8>,
    format: OutputFormat,
}

impl RenderedArtifact {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Renders `request.matrix` in the requested format.
///
/// The size is validated against the matrix dimension before any pixel or markup is produced.
///
/// # Errors
///
/// * [`RenderError::InvalidSize`] if the size is zero, smaller than the matrix dimension, or
///   wider than a JPEG can be.
/// * [`RenderError::EncodingFailure`] if the canvas cannot be allocated or the image encoder fails.
///
/// # Example
///
/// ```rust
/// use qirender::color::Color;
/// use qirender::matrix::ModuleMatrix;
/// use qirender::render::{render, OutputFormat, RenderRequest};
///
/// let matrix = ModuleMatrix::from_fn(21, |x, y| (x + y) % 2 == 0);
/// let artifact = render(&RenderRequest {
///     matrix,
///     size_pixels: 210,
///     foreground: Color::BLACK,
///     background: Color::WHITE,
///     format: OutputFormat::Svg,
/// }).unwrap();
///
/// assert_eq!(artifact.content_type(), "image/svg+xml");
/// ```
pub fn render(request: &RenderRequest) -> Result<RenderedArtifact> {
    let geometry = Geometry::new(request.size_pixels, request.matrix.dimension())?;
    let raster = match request.format {
        OutputFormat::Png => Some(RasterFormat::Png),
        OutputFormat::Jpeg => Some(RasterFormat::Jpeg),
        OutputFormat::Svg => None,
    };
    if let Some(format) = raster {
        check_size(geometry.size(), format)?;
    }
    debug!(
        "rendering {}x{} matrix as {} at {}px (module {:.3}px)",
        geometry.dimension(),
        geometry.dimension(),
        request.format,
        geometry.size(),
        geometry.unit()
    );

    let bytes = match raster {
        Some(format) => render_raster(&request.matrix, &geometry, request.foreground, request.background, format)?,
        None => render_svg(&request.matrix, &geometry, request.foreground, request.background),
    };
    trace!(
        "rendered {} dark modules into {} bytes of {}",
        request.matrix.dark_count(),
        bytes.len(),
        request.format.content_type()
    );

    Ok(RenderedArtifact { bytes, format: request.format })
}

/// Raw request parameters as they arrive from a caller, before validation.
///
/// Field names deserialize in camelCase (`foregroundColor`, `backgroundColor`) and missing
/// optional fields take the `DEFAULT_*` values.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrRequest {
    pub text: String,
    pub format: String,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default = "default_foreground")]
    pub foreground_color: String,
    #[serde(default = "default_background")]
    pub background_color: String,
}

fn default_foreground() -> String {
    DEFAULT_FOREGROUND.to_string()
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl QrRequest {
    /// Creates a request with default size and colors.
    pub fn new(text: impl Into<String>, format: impl Into<String>) -> Self {
        QrRequest {
            text: text.into(),
            format: format.into(),
            size: None,
            foreground_color: default_foreground(),
            background_color: default_background(),
        }
    }

    /// Checks everything that does not depend on the matrix.
    fn validate(&self) -> Result<(u32, Color, Color, OutputFormat)> {
        if self.text.trim().is_empty() {
            return Err(RenderError::EmptyText);
        }
        let size = match self.size {
            None => DEFAULT_SIZE,
            Some(size) if size <= 0 => return Err(RenderError::invalid_size(size, "size must be positive")),
            Some(size) => u32::try_from(size)
                .map_err(|_| RenderError::invalid_size(size, format!("size must not exceed {}", u32::MAX)))?,
        };
        let foreground = Color::parse(&self.foreground_color)?;
        let background = Color::parse(&self.background_color)?;
        let format = OutputFormat::parse(&self.format)?;
        Ok((size, foreground, background, format))
    }
}

/// Validates `request`, encodes its text with `encoder` and renders the result.
///
/// Text, size, colors and format are all checked before the encoder is called.
///
/// # Errors
///
/// Any [`RenderError`]; encoder failures are reported as [`RenderError::Matrix`].
///
/// # Example
///
/// ```rust
/// use qirender::matrix::{EcLevel, ModuleMatrix};
/// use qirender::render::{generate, QrRequest};
///
/// let encoder = |_text: &str, _level: EcLevel| -> Result<ModuleMatrix, String> {
///     Ok(ModuleMatrix::from_fn(21, |x, y| x == y))
/// };
/// let artifact = generate(&encoder, &QrRequest::new("Hello, World!", "PNG")).unwrap();
/// assert_eq!(artifact.content_type(), "image/png");
/// ```
pub fn generate<E: MatrixEncoder>(encoder: &E, request: &QrRequest) -> Result<RenderedArtifact> {
    let (size_pixels, foreground, background, format) = request.validate().inspect_err(|e| {
        warn!("rejected QR request: {}", e);
    })?;
    let matrix = encoder
        .encode(&request.text, DEFAULT_EC_LEVEL)
        .map_err(|e| RenderError::Matrix(e.to_string()))?;

    render(&RenderRequest { matrix, size_pixels, foreground, background, format })
}
