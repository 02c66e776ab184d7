//! # qirender
//!
//! A Rust library for rendering QR code module matrices as PNG, JPEG or SVG.
//!
//! `qirender` takes the finished module grid of a QR symbol, produced by any QR encoder, and
//! draws it at a chosen pixel size with custom foreground and background colors. Raster and
//! vector output share one geometry, so all three formats describe the same picture.
//!
//! ## Features
//!
//! - Parse `#RGB` and `#RRGGBB` colors, case-insensitive, with or without `#`.
//! - Render lossless PNG, JPEG at quality 100, or deterministic standalone SVG.
//! - Bring your own encoder through the [`matrix::MatrixEncoder`] trait, or build matrices by hand.
//! - Validate every request parameter before any rendering work starts.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qirender = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render a hand-built matrix:
//!
//! ```rust
//! use qirender::color::Color;
//! use qirender::matrix::ModuleMatrix;
//! use qirender::render::{render, OutputFormat, RenderRequest};
//!
//! let matrix: ModuleMatrix = "#.#\n.#.\n#.#".parse().unwrap();
//! let artifact = render(&RenderRequest {
//!     matrix,
//!     size_pixels: 90,
//!     foreground: Color::parse("#0F0").unwrap(),
//!     background: Color::WHITE,
//!     format: OutputFormat::Png,
//! }).unwrap();
//! assert_eq!(artifact.content_type(), "image/png");
//! ```
//!
//! Serve a request with your own encoder:
//!
//! ```rust
//! use qirender::matrix::{EcLevel, ModuleMatrix};
//! use qirender::render::{generate, QrRequest};
//!
//! let encoder = |_text: &str, _level: EcLevel| -> Result<ModuleMatrix, String> {
//!     Ok(ModuleMatrix::from_fn(21, |x, y| x % 2 == y % 2))
//! };
//! let request = QrRequest {
//!     size: Some(350),
//!     ..QrRequest::new("Hello, World!", "svg")
//! };
//! let svg = generate(&encoder, &request).unwrap();
//! assert_eq!(svg.content_type(), "image/svg+xml");
//! ```
//!
//! ## Building matrices
//!
//! [`ModuleMatrix::from_rows`] and text-art parsing (`str::parse`) validate their input and
//! return [`RenderError::Matrix`] for empty or non-square grids. [`ModuleMatrix::from_fn`]
//! takes a dimension from the caller and panics if it is zero.
//!
//! ## Modules
//!
//! - [`color`]: Hex color parsing.
//! - [`geometry`]: Module-to-pixel mapping.
//! - [`matrix`]: Module matrices and the encoder trait.
//! - [`render`]: Format dispatch, the crate's entry point.
//! - [`helper`]: Saving rendered artifacts.
//! - [`error`]: Error types.
#![forbid(unsafe_code)]

pub mod color;
pub mod error;
pub mod geometry;
pub mod helper;
pub mod matrix;
pub mod render;

mod raster;
mod svg;

pub use color::Color;
pub use error::{ErrorKind, RenderError, Result};
pub use matrix::{EcLevel, MatrixEncoder, ModuleMatrix};
pub use render::{generate, render, OutputFormat, QrRequest, RenderRequest, RenderedArtifact};
