//! Raster rendering of module matrices to PNG and JPEG.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};

use crate::color::Color;
use crate::error::{RenderError, Result};
use crate::geometry::Geometry;
use crate::matrix::ModuleMatrix;

/// JPEG quality used for every lossy render.
pub const JPEG_QUALITY: u8 = 100;

/// Largest width or height a JPEG frame header can carry.
pub const JPEG_MAX_SIDE: u32 = u16::MAX as u32;

/// Raster output encodings.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum RasterFormat {
    Png,
    Jpeg,
}

/// Rejects canvas sizes the encoder for `format` cannot represent.
pub(crate) fn check_size(size: u32, format: RasterFormat) -> Result<()> {
    if format == RasterFormat::Jpeg && size > JPEG_MAX_SIDE {
        return Err(RenderError::invalid_size(
            size,
            format!("JPEG output must not exceed {JPEG_MAX_SIDE} pixels"),
        ));
    }
    Ok(())
}

/// Renders `matrix` to an encoded PNG or JPEG image of `geometry.size()` pixels square.
pub(crate) fn render_raster(
    matrix: &ModuleMatrix,
    geometry: &Geometry,
    foreground: Color,
    background: Color,
    format: RasterFormat,
) -> Result<Vec<u8>> {
    let canvas = rasterize(matrix, geometry, foreground, background)?;
    let (width, height) = canvas.dimensions();

    let mut bytes = Vec::new();
    match format {
        RasterFormat::Png => PngEncoder::new(&mut bytes).write_image(
            canvas.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        )?,
        RasterFormat::Jpeg => JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).write_image(
            canvas.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        )?,
    }
    log::trace!("encoded {}x{} {:?} canvas into {} bytes", width, height, format, bytes.len());
    Ok(bytes)
}

/// Builds the pixel buffer: background everywhere, foreground over the pixel span of every
/// dark module. The buffer is only handed out once it is complete.
pub(crate) fn rasterize(
    matrix: &ModuleMatrix,
    geometry: &Geometry,
    foreground: Color,
    background: Color,
) -> Result<RgbImage> {
    let size = geometry.size();
    let side = size as usize;
    let len = side
        .checked_mul(side)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| RenderError::EncodingFailure(format!("{size}x{size} canvas is too large")))?;

    let mut pixels: Vec<u8> = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|e| RenderError::EncodingFailure(format!("cannot allocate {size}x{size} canvas: {e}")))?;

    // Module index covering each pixel column; rows use the same table.
    let mut module_of = Vec::with_capacity(side);
    for index in 0..geometry.dimension() {
        for _ in geometry.pixel_span(index) {
            module_of.push(index);
        }
    }

    let Rgb(fg) = to_rgb(foreground);
    let Rgb(bg) = to_rgb(background);
    for &y in &module_of {
        for &x in &module_of {
            let px = if matrix.get(x, y) { fg } else { bg };
            pixels.extend_from_slice(&px);
        }
    }

    RgbImage::from_raw(size, size, pixels)
        .ok_or_else(|| RenderError::EncodingFailure("pixel buffer does not match canvas size".into()))
}

fn to_rgb(color: Color) -> Rgb<u8> {
    Rgb([color.r, color.g, color.b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn corner_matrix() -> ModuleMatrix {
        ModuleMatrix::from_fn(3, |x, y| x == 0 && y == 0)
    }

    #[test]
    fn test_rasterize_dimensions() {
        let geometry = Geometry::new(100, 3).unwrap();
        let canvas = rasterize(&corner_matrix(), &geometry, Color::BLACK, Color::WHITE).unwrap();
        assert_eq!(canvas.dimensions(), (100, 100));
    }

    #[test]
    fn test_rasterize_paints_dark_modules_only() {
        let geometry = Geometry::new(30, 3).unwrap();
        let fg = Color::rgb(200, 10, 10);
        let bg = Color::rgb(10, 10, 200);
        let canvas = rasterize(&corner_matrix(), &geometry, fg, bg).unwrap();

        assert_eq!(*canvas.get_pixel(0, 0), Rgb([200, 10, 10]));
        assert_eq!(*canvas.get_pixel(9, 9), Rgb([200, 10, 10]));
        assert_eq!(*canvas.get_pixel(10, 9), Rgb([10, 10, 200]));
        assert_eq!(*canvas.get_pixel(9, 10), Rgb([10, 10, 200]));
        assert_eq!(*canvas.get_pixel(29, 29), Rgb([10, 10, 200]));

        let dark = canvas.pixels().filter(|p| **p == Rgb([200, 10, 10])).count();
        assert_eq!(dark, 100);
    }

    #[test]
    fn test_rasterize_reports_oversized_canvas() {
        let matrix = ModuleMatrix::from_fn(1, |_, _| true);
        for size in [u32::MAX, 1 << 31] {
            let geometry = Geometry::new(size, 1).unwrap();
            let err = rasterize(&matrix, &geometry, Color::BLACK, Color::WHITE).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::EncodingFailure, "{size}");
        }
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(JPEG_MAX_SIDE, RasterFormat::Jpeg).is_ok());
        let err = check_size(JPEG_MAX_SIDE + 1, RasterFormat::Jpeg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSize);
        assert!(check_size(JPEG_MAX_SIDE + 1, RasterFormat::Png).is_ok());
    }

    #[test]
    fn test_png_signature() {
        let geometry = Geometry::new(21, 3).unwrap();
        let bytes =
            render_raster(&corner_matrix(), &geometry, Color::BLACK, Color::WHITE, RasterFormat::Png).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]));
    }

    #[test]
    fn test_jpeg_signature() {
        let geometry = Geometry::new(21, 3).unwrap();
        let bytes =
            render_raster(&corner_matrix(), &geometry, Color::BLACK, Color::WHITE, RasterFormat::Jpeg).unwrap();
        assert!(bytes.starts_with(&[0xff, 0xd8]));
        assert!(bytes.ends_with(&[0xff, 0xd9]));
    }
}
