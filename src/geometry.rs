//! Mapping from module coordinates to output coordinates.
//!
//! One module is `size / dimension` units wide, in `f64`, with no quiet zone around the
//! symbol. Both renderers take the unit from the same [`Geometry`] so the PNG, JPEG and SVG
//! outputs describe the same picture.

use core::ops::Range;

use crate::error::{RenderError, Result};

/// Returns the width of one module for a symbol of `dimension` modules drawn at `size_pixels`.
///
/// # Errors
///
/// [`RenderError::InvalidSize`] when `size_pixels` is zero or smaller than `dimension`, since
/// modules would then be narrower than one pixel.
pub fn module_size(size_pixels: u32, dimension: usize) -> Result<f64> {
    if size_pixels == 0 {
        return Err(RenderError::invalid_size(size_pixels, "size must be positive"));
    }
    if dimension == 0 {
        return Err(RenderError::Matrix("matrix has no modules".into()));
    }
    if (size_pixels as usize) < dimension {
        return Err(RenderError::invalid_size(
            size_pixels,
            format!("size must be at least the matrix dimension {dimension}"),
        ));
    }
    Ok(f64::from(size_pixels) / dimension as f64)
}

/// Returns the rectangle covered by module `(x, y)`.
pub fn module_rect(x: usize, y: usize, unit: f64) -> ModuleRect {
    ModuleRect {
        left: x as f64 * unit,
        top: y as f64 * unit,
        width: unit,
        height: unit,
    }
}

/// A module's area in output units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ModuleRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Validated geometry for one render.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Geometry {
    size: u32,
    dimension: usize,
    unit: f64,
}

impl Geometry {
    /// Validates `size_pixels` against `dimension` and computes the module unit.
    pub fn new(size_pixels: u32, dimension: usize) -> Result<Self> {
        let unit = module_size(size_pixels, dimension)?;
        Ok(Geometry { size: size_pixels, dimension, unit })
    }

    /// Output width and height.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Width of one module in output units.
    pub fn unit(&self) -> f64 {
        self.unit
    }

    pub fn module_rect(&self, x: usize, y: usize) -> ModuleRect {
        module_rect(x, y, self.unit)
    }

    /// Pixel columns (or rows) covered by module `index` on a raster canvas.
    ///
    /// Each module edge is rounded once, to the nearest pixel, and shared by both neighbours,
    /// so spans of consecutive modules tile `0..size` with no gap or overlap.
    pub fn pixel_span(&self, index: usize) -> Range<u32> {
        self.pixel_edge(index)..self.pixel_edge(index + 1)
    }

    fn pixel_edge(&self, index: usize) -> u32 {
        if index >= self.dimension {
            return self.size;
        }
        let edge = (index as f64 * self.unit).round() as u32;
        edge.min(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_module_size_is_real_valued() {
        assert_eq!(module_size(210, 21).unwrap(), 10.0);
        let unit = module_size(300, 21).unwrap();
        assert!((unit - 14.285714285714286).abs() < 1e-12);
    }

    #[test]
    fn test_module_size_rejects_degenerate_sizes() {
        assert_eq!(module_size(0, 21).unwrap_err().kind(), ErrorKind::InvalidSize);
        assert_eq!(module_size(20, 21).unwrap_err().kind(), ErrorKind::InvalidSize);
        assert_eq!(module_size(21, 21).unwrap(), 1.0);
        assert_eq!(module_size(10, 0).unwrap_err().kind(), ErrorKind::Matrix);
    }

    #[test]
    fn test_module_rect() {
        let rect = module_rect(3, 5, 2.5);
        assert_eq!(rect, ModuleRect { left: 7.5, top: 12.5, width: 2.5, height: 2.5 });
    }

    #[test]
    fn test_pixel_spans_tile_canvas() {
        for (size, dimension) in [(300, 21), (210, 21), (100, 33), (177, 177), (1000, 177)] {
            let geometry = Geometry::new(size, dimension).unwrap();
            let mut next = 0;
            for i in 0..dimension {
                let span = geometry.pixel_span(i);
                assert_eq!(span.start, next, "gap before module {i} at {size}/{dimension}");
                assert!(span.end > span.start, "empty module {i} at {size}/{dimension}");
                next = span.end;
            }
            assert_eq!(next, size);
        }
    }

    #[test]
    fn test_pixel_span_stays_near_exact_rect() {
        let geometry = Geometry::new(300, 21).unwrap();
        for i in 0..21 {
            let rect = geometry.module_rect(i, 0);
            let span = geometry.pixel_span(i);
            assert!((f64::from(span.start) - rect.left).abs() <= 0.5);
            assert!((f64::from(span.end - span.start) - rect.width).abs() <= 1.0);
        }
    }
}
