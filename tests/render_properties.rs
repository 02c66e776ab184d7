//! Property tests over random matrices, sizes and colors.

use image::{GenericImageView, Rgb};
use proptest::prelude::*;

use qirender::geometry::Geometry;
use qirender::render::{render, OutputFormat, RenderRequest};
use qirender::{Color, ModuleMatrix};

// Strategy for a square matrix of 1..=41 modules with random dark cells
fn matrix() -> impl Strategy<Value = ModuleMatrix> {
    (1usize..=41).prop_flat_map(|dimension| {
        prop::collection::vec(any::<bool>(), dimension * dimension).prop_map(move |cells| {
            ModuleMatrix::from_fn(dimension, |x, y| cells[y * dimension + x])
        })
    })
}

// Strategy for a matrix plus a valid size of one to eight pixels per module, give or take
fn sized_matrix() -> impl Strategy<Value = (ModuleMatrix, u32)> {
    matrix().prop_flat_map(|m| {
        let dimension = m.dimension() as u32;
        (Just(m), dimension..=dimension * 8 + 7)
    })
}

fn color() -> impl Strategy<Value = Color> {
    any::<[u8; 3]>().prop_map(|[r, g, b]| Color::rgb(r, g, b))
}

fn request(matrix: ModuleMatrix, size: u32, format: OutputFormat) -> RenderRequest {
    RenderRequest {
        matrix,
        size_pixels: size,
        foreground: Color::rgb(0, 0, 0),
        background: Color::rgb(255, 255, 255),
        format,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn svg_output_is_deterministic((m, size) in sized_matrix(), fg in color(), bg in color()) {
        let req = RenderRequest {
            matrix: m,
            size_pixels: size,
            foreground: fg,
            background: bg,
            format: OutputFormat::Svg,
        };
        let first = render(&req).unwrap();
        let second = render(&req.clone()).unwrap();
        prop_assert_eq!(first.bytes(), second.bytes());
    }

    #[test]
    fn png_has_requested_dimensions((m, size) in sized_matrix()) {
        let png = render(&request(m, size, OutputFormat::Png)).unwrap();
        let img = image::load_from_memory(png.bytes()).unwrap();
        prop_assert_eq!(img.dimensions(), (size, size));
    }

    #[test]
    fn svg_declares_requested_dimensions((m, size) in sized_matrix()) {
        let dark = m.dark_count();
        let svg = render(&request(m, size, OutputFormat::Svg)).unwrap();
        let text = String::from_utf8(svg.into_bytes()).unwrap();
        let doc = roxmltree::Document::parse(&text).unwrap();
        let root = doc.root_element();
        let size = size.to_string();
        prop_assert_eq!(root.attribute("width"), Some(size.as_str()));
        prop_assert_eq!(root.attribute("height"), Some(size.as_str()));
        let rects = root.children().filter(|n| n.has_tag_name("rect")).count();
        prop_assert_eq!(rects, dark + 1);
    }

    #[test]
    fn raster_modules_tile_canvas((m, size) in sized_matrix()) {
        let geometry = Geometry::new(size, m.dimension()).unwrap();
        let expected_dark: u64 = m
            .dark_modules()
            .map(|(x, y)| {
                let w = geometry.pixel_span(x).len() as u64;
                let h = geometry.pixel_span(y).len() as u64;
                w * h
            })
            .sum();

        let png = render(&request(m, size, OutputFormat::Png)).unwrap();
        let rgb = image::load_from_memory(png.bytes()).unwrap().to_rgb8();
        let dark = rgb.pixels().filter(|p| **p == Rgb([0, 0, 0])).count() as u64;
        let light = rgb.pixels().filter(|p| **p == Rgb([255, 255, 255])).count() as u64;

        prop_assert_eq!(dark, expected_dark);
        prop_assert_eq!(dark + light, u64::from(size) * u64::from(size));
    }

    #[test]
    fn svg_modules_tile_canvas((m, size) in sized_matrix()) {
        let dark = m.dark_count() as f64;
        let unit = f64::from(size) / m.dimension() as f64;
        let svg = render(&request(m, size, OutputFormat::Svg)).unwrap();
        let text = String::from_utf8(svg.into_bytes()).unwrap();
        let doc = roxmltree::Document::parse(&text).unwrap();
        let side = f64::from(size);

        let mut area = 0.0;
        for r in doc.root_element().children().filter(|n| n.has_tag_name("rect") && n.has_attribute("x")) {
            let attr = |name: &str| -> f64 { r.attribute(name).unwrap().parse().unwrap() };
            let (x, y, w, h) = (attr("x"), attr("y"), attr("width"), attr("height"));
            prop_assert_eq!(w, unit);
            prop_assert_eq!(h, unit);
            prop_assert!(x >= 0.0 && x + w <= side + 1e-9);
            prop_assert!(y >= 0.0 && y + h <= side + 1e-9);
            // Every rect starts on the module grid.
            prop_assert!(((x / unit) - (x / unit).round()).abs() < 1e-9);
            prop_assert!(((y / unit) - (y / unit).round()).abs() < 1e-9);
            area += w * h;
        }
        prop_assert!((area - dark * unit * unit).abs() < 1e-6 * side * side);
    }
}
