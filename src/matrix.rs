//! Module matrices and the encoder capability that produces them.
//!
//! A [`ModuleMatrix`] is the finished output of a QR symbol encoder: a square grid of dark and
//! light modules. This crate never looks inside the encoding, so any QR library can supply
//! matrices through [`MatrixEncoder`], and tests can build them by hand.

use core::fmt;
use core::str::FromStr;

use crate::error::{RenderError, Result};

/// Error correction level requested from the encoder.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum EcLevel {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    #[default]
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

/// Anything that turns text into a module matrix.
///
/// Closures of the form `Fn(&str, EcLevel) -> Result<ModuleMatrix, E>` implement this trait.
pub trait MatrixEncoder {
    type Error: fmt::Display;

    fn encode(&self, text: &str, level: EcLevel) -> core::result::Result<ModuleMatrix, Self::Error>;
}

impl<F, E> MatrixEncoder for F
where
    F: Fn(&str, EcLevel) -> core::result::Result<ModuleMatrix, E>,
    E: fmt::Display,
{
    type Error = E;

    fn encode(&self, text: &str, level: EcLevel) -> core::result::Result<ModuleMatrix, E> {
        self(text, level)
    }
}

/// An immutable square grid of modules, `true` meaning dark.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ModuleMatrix {
    dimension: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Builds a matrix from rows of modules, top row first.
    ///
    /// # Errors
    ///
    /// [`RenderError::Matrix`] if there are no rows or any row length differs from the row count.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(RenderError::Matrix("matrix has no modules".into()));
        }
        let mut modules = Vec::with_capacity(dimension * dimension);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dimension {
                return Err(RenderError::Matrix(format!(
                    "row {} has {} modules, expected {}",
                    y,
                    row.len(),
                    dimension
                )));
            }
            modules.extend_from_slice(row);
        }
        Ok(ModuleMatrix { dimension, modules })
    }

    /// Builds a `dimension` by `dimension` matrix from a function of `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero. Unlike [`ModuleMatrix::from_rows`] and `FromStr`, which
    /// take untrusted input and return [`RenderError::Matrix`], this constructor is meant for
    /// dimensions the caller already knows.
    pub fn from_fn(dimension: usize, mut is_dark: impl FnMut(usize, usize) -> bool) -> Self {
        assert!(dimension > 0, "Matrix dimension must be positive");
        let mut modules = Vec::with_capacity(dimension * dimension);
        for y in 0..dimension {
            for x in 0..dimension {
                modules.push(is_dark(x, y));
            }
        }
        ModuleMatrix { dimension, modules }
    }

    /// Width and height of the matrix, in modules.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the module at column `x`, row `y`. Coordinates outside the matrix are light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.dimension && y < self.dimension && self.modules[y * self.dimension + x]
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }

    /// Coordinates of the dark modules in row-major order.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let dimension = self.dimension;
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, &dark)| dark)
            .map(move |(i, _)| (i % dimension, i / dimension))
    }

    /// Renders the matrix as block characters for a terminal, two characters per module and
    /// `border` light modules on every side.
    pub fn to_console_string(&self, border: usize) -> String {
        let span = self.dimension + 2 * border;
        let mut result = String::with_capacity(span * (span * 2 * 3 + 1));
        for y in 0..span {
            for x in 0..span {
                let dark = x >= border && y >= border && self.get(x - border, y - border);
                let c = if dark { '█' } else { ' ' };
                result.push(c);
                result.push(c);
            }
            result.push('\n');
        }
        result
    }
}

impl FromStr for ModuleMatrix {
    type Err = RenderError;

    /// Parses text art, one line per row. `#`, `1`, `X` and `█` are dark; `.`, `0`, `-` and
    /// space are light. Spaces are significant, so every row must hold exactly as many
    /// modules as there are rows. Only empty lines are skipped; a trailing `\r` is dropped.
    fn from_str(s: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_no, line) in s.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            let row = line
                .chars()
                .map(|c| match c {
                    '#' | '1' | 'X' | 'x' | '█' => Ok(true),
                    '.' | '0' | '-' | ' ' => Ok(false),
                    other => Err(RenderError::Matrix(format!(
                        "unexpected character {:?} on line {}",
                        other,
                        line_no + 1
                    ))),
                })
                .collect::<Result<Vec<bool>>>()?;
            rows.push(row);
        }
        ModuleMatrix::from_rows(&rows)
    }
}
