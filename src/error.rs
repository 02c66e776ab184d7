//! Error types for rendering QR module matrices.

use thiserror::Error;

/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// The kind of a [`RenderError`], without its message.
///
/// Transport layers map these to their own status codes: everything except
/// [`ErrorKind::EncodingFailure`] and [`ErrorKind::Io`] is a caller mistake.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    EmptyText,
    InvalidColor,
    InvalidSize,
    UnsupportedFormat,
    Matrix,
    EncodingFailure,
    Io,
}

/// Errors that can occur while validating a request or rendering it.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The text to encode is empty or only whitespace.
    #[error("text cannot be empty")]
    EmptyText,

    /// A color string is not `#RGB` or `#RRGGBB`.
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: &'static str },

    /// The requested size is zero, negative or smaller than the matrix.
    #[error("invalid size {size}: {reason}")]
    InvalidSize { size: i64, reason: String },

    /// The requested output format is not png, jpg or svg.
    #[error("unsupported format {0:?}, expected one of png, jpg, svg")]
    UnsupportedFormat(String),

    /// The module matrix could not be produced or parsed.
    #[error("module matrix error: {0}")]
    Matrix(String),

    /// The image encoder failed or the canvas could not be allocated.
    #[error("encoding failed: {0}")]
    EncodingFailure(String),

    /// Writing an artifact to disk failed.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Returns the structured kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyText => ErrorKind::EmptyText,
            Self::InvalidColor { .. } => ErrorKind::InvalidColor,
            Self::InvalidSize { .. } => ErrorKind::InvalidSize,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::Matrix(_) => ErrorKind::Matrix,
            Self::EncodingFailure(_) => ErrorKind::EncodingFailure,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn invalid_color(input: &str, reason: &'static str) -> Self {
        Self::InvalidColor { input: input.to_string(), reason }
    }

    pub(crate) fn invalid_size(size: impl Into<i64>, reason: impl Into<String>) -> Self {
        Self::InvalidSize { size: size.into(), reason: reason.into() }
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        Self::EncodingFailure(err.to_string())
    }
}
